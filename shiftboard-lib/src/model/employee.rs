//! Employee records

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use super::column_keys;
use super::null_as_default;
use super::timestamp;
use crate::view::CellValue;
use crate::view::Column;
use crate::view::Tabular;

/// An employee as returned by `/api/employees`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    /// Free-form availability settings consumed by the solver.
    #[serde(default, deserialize_with = "null_as_default")]
    pub availability: Map<String, Value>,
    /// Free-form shift preferences consumed by the solver.
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferences: Map<String, Value>,
    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

column_keys! {
    /// Columns of an employee table.
    EmployeeColumn {
        Id => "id",
        Name => "name",
        Email => "email",
        Phone => "phone",
        Position => "position",
        Skills => "skills",
        HourlyRate => "hourly_rate",
        IsActive => "is_active",
        CreatedAt => "created_at",
    }
}

impl EmployeeColumn {
    /// The columns shown on the employees screen.
    pub fn defaults() -> Vec<Column<Self>> {
        vec![
            Column::new(Self::Name, "Name").width(24),
            Column::new(Self::Email, "Email").width(28),
            Column::new(Self::Position, "Position").width(16),
            Column::new(Self::HourlyRate, "Rate/Hour")
                .width(10)
                .render(render_rate),
            Column::new(Self::Skills, "Skills")
                .width(24)
                .not_sortable()
                .render(render_skills),
            Column::new(Self::IsActive, "Status")
                .width(8)
                .render(render_active),
        ]
    }
}

impl Tabular for Employee {
    type Key = EmployeeColumn;

    fn cell(&self, key: EmployeeColumn) -> CellValue {
        match key {
            EmployeeColumn::Id => self.id.into(),
            EmployeeColumn::Name => (&self.name).into(),
            EmployeeColumn::Email => (&self.email).into(),
            EmployeeColumn::Phone => self.phone.as_ref().into(),
            EmployeeColumn::Position => self.position.as_ref().into(),
            EmployeeColumn::Skills => self.skills.as_slice().into(),
            EmployeeColumn::HourlyRate => self.hourly_rate.into(),
            EmployeeColumn::IsActive => self.is_active.into(),
            EmployeeColumn::CreatedAt => self.created_at.into(),
        }
    }
}

fn render_rate(value: &CellValue) -> String {
    match value {
        CellValue::Float(rate) => format!("${rate:.2}"),
        CellValue::Int(rate) => format!("${rate}.00"),
        other => other.to_search_text(),
    }
}

/// First two skills, then a `+N` counter for the rest.
pub(crate) fn render_skills(value: &CellValue) -> String {
    match value {
        CellValue::List(items) if items.is_empty() => "-".to_string(),
        CellValue::List(items) if items.len() > 2 => {
            format!("{}, +{}", items[..2].join(", "), items.len() - 2)
        }
        CellValue::List(items) => items.join(", "),
        other => other.to_search_text(),
    }
}

pub(crate) fn render_active(value: &CellValue) -> String {
    match value {
        CellValue::Bool(true) => "Active".to_string(),
        CellValue::Bool(false) => "Inactive".to_string(),
        other => other.to_search_text(),
    }
}
