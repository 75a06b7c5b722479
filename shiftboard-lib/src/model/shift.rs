//! Shift records

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::column_keys;
use super::employee::render_active;
use super::employee::render_skills;
use super::null_as_default;
use super::timestamp;
use crate::view::CellValue;
use crate::view::Column;
use crate::view::Tabular;

/// Day names indexed by `day_of_week` (0 = Monday).
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Returns the name of `day_of_week`, or `None` outside 0..=6.
pub fn weekday_name(day_of_week: u8) -> Option<&'static str> {
    WEEKDAYS.get(usize::from(day_of_week)).copied()
}

/// A recurring weekly shift as returned by `/api/shifts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub id: i64,
    pub name: String,
    /// Start time, `HH:MM`.
    pub start_time: String,
    /// End time, `HH:MM`. May be earlier than the start for overnight shifts.
    pub end_time: String,
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_skills: Vec<String>,
    #[serde(default = "default_one")]
    pub min_employees: u32,
    #[serde(default = "default_one")]
    pub max_employees: u32,
    #[serde(default = "default_multiplier")]
    pub cost_multiplier: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_one() -> u32 {
    1
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

impl Shift {
    /// Name of the shift's weekday.
    pub fn weekday(&self) -> Option<&'static str> {
        weekday_name(self.day_of_week)
    }
}

column_keys! {
    /// Columns of a shift table.
    ShiftColumn {
        Id => "id",
        Name => "name",
        DayOfWeek => "day_of_week",
        StartTime => "start_time",
        EndTime => "end_time",
        RequiredSkills => "required_skills",
        MinEmployees => "min_employees",
        MaxEmployees => "max_employees",
        CostMultiplier => "cost_multiplier",
        IsActive => "is_active",
        CreatedAt => "created_at",
    }
}

impl ShiftColumn {
    /// The columns shown on the shifts screen.
    pub fn defaults() -> Vec<Column<Self>> {
        vec![
            Column::new(Self::Name, "Name").width(20),
            Column::new(Self::DayOfWeek, "Day").width(10).render(render_day),
            Column::new(Self::StartTime, "Start").width(6),
            Column::new(Self::EndTime, "End").width(6),
            Column::new(Self::RequiredSkills, "Skills")
                .width(24)
                .not_sortable()
                .render(render_skills),
            Column::new(Self::MinEmployees, "Min").width(4),
            Column::new(Self::MaxEmployees, "Max").width(4),
            Column::new(Self::CostMultiplier, "Cost")
                .width(6)
                .render(render_multiplier),
            Column::new(Self::IsActive, "Status")
                .width(8)
                .render(render_active),
        ]
    }
}

impl Tabular for Shift {
    type Key = ShiftColumn;

    fn cell(&self, key: ShiftColumn) -> CellValue {
        match key {
            ShiftColumn::Id => self.id.into(),
            ShiftColumn::Name => (&self.name).into(),
            ShiftColumn::DayOfWeek => self.day_of_week.into(),
            ShiftColumn::StartTime => (&self.start_time).into(),
            ShiftColumn::EndTime => (&self.end_time).into(),
            ShiftColumn::RequiredSkills => self.required_skills.as_slice().into(),
            ShiftColumn::MinEmployees => self.min_employees.into(),
            ShiftColumn::MaxEmployees => self.max_employees.into(),
            ShiftColumn::CostMultiplier => self.cost_multiplier.into(),
            ShiftColumn::IsActive => self.is_active.into(),
            ShiftColumn::CreatedAt => self.created_at.into(),
        }
    }
}

fn render_day(value: &CellValue) -> String {
    match value {
        CellValue::Int(day) => u8::try_from(*day)
            .ok()
            .and_then(weekday_name)
            .map(str::to_string)
            .unwrap_or_else(|| day.to_string()),
        other => other.to_search_text(),
    }
}

fn render_multiplier(value: &CellValue) -> String {
    match value {
        CellValue::Float(m) => format!("x{m:.2}"),
        other => other.to_search_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::DataView;

    fn shift(name: &str, day: u8, start: &str) -> Shift {
        Shift {
            id: 1,
            name: name.to_string(),
            start_time: start.to_string(),
            end_time: "16:00".to_string(),
            day_of_week: day,
            required_skills: Vec::new(),
            min_employees: 1,
            max_employees: 2,
            cost_multiplier: 1.5,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_deserialize_with_null_skills() {
        let json = r#"{
            "id": 3, "name": "Mañana", "start_time": "08:00", "end_time": "16:00",
            "day_of_week": 0, "required_skills": null, "min_employees": 2,
            "max_employees": 4, "cost_multiplier": 1.0, "is_active": true,
            "created_at": "2024-05-01T08:00:00"
        }"#;
        let shift: Shift = serde_json::from_str(json).unwrap();
        assert!(shift.required_skills.is_empty());
        assert_eq!(shift.weekday(), Some("Monday"));
    }

    #[test]
    fn test_day_sorts_by_number_not_name() {
        let shifts = vec![shift("a", 6, "08:00"), shift("b", 0, "08:00"), shift("c", 3, "08:00")];
        let mut view = DataView::with_records(ShiftColumn::defaults(), shifts, 10);
        view.click_header(ShiftColumn::DayOfWeek);
        let order: Vec<&str> = view.page_rows().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, ["b", "c", "a"]);
    }

    #[test]
    fn test_render_day_and_multiplier() {
        assert_eq!(render_day(&CellValue::Int(4)), "Friday");
        assert_eq!(render_day(&CellValue::Int(9)), "9");
        assert_eq!(render_multiplier(&CellValue::Float(1.5)), "x1.50");
    }
}
