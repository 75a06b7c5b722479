//! Shift assignments produced by a solver run

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::column_keys;
use super::render_date;
use super::render_or_na;
use super::timestamp;
use crate::view::CellValue;
use crate::view::Column;
use crate::view::Tabular;

/// One employee placed on one shift for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub employee_id: i64,
    pub shift_id: i64,
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub shift_name: Option<String>,
}

column_keys! {
    /// Columns of an assignment table.
    AssignmentColumn {
        Id => "id",
        EmployeeId => "employee_id",
        ShiftId => "shift_id",
        EmployeeName => "employee_name",
        ShiftName => "shift_name",
        Date => "date",
        Status => "status",
    }
}

impl AssignmentColumn {
    /// The columns shown for a run's assignments, also used for CSV export.
    pub fn defaults() -> Vec<Column<Self>> {
        vec![
            Column::new(Self::EmployeeName, "Employee")
                .width(24)
                .render(render_or_na),
            Column::new(Self::ShiftName, "Shift")
                .width(20)
                .render(render_or_na),
            Column::new(Self::Date, "Date").width(10).render(render_date),
            Column::new(Self::Status, "Status").width(10),
        ]
    }
}

impl Tabular for Assignment {
    type Key = AssignmentColumn;

    fn cell(&self, key: AssignmentColumn) -> CellValue {
        match key {
            AssignmentColumn::Id => self.id.into(),
            AssignmentColumn::EmployeeId => self.employee_id.into(),
            AssignmentColumn::ShiftId => self.shift_id.into(),
            AssignmentColumn::EmployeeName => self.employee_name.as_ref().into(),
            AssignmentColumn::ShiftName => self.shift_name.as_ref().into(),
            AssignmentColumn::Date => self.date.into(),
            AssignmentColumn::Status => (&self.status).into(),
        }
    }
}
