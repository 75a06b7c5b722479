//! Solver runs and their error log

use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Map;
use serde_json::Value;

use super::column_keys;
use super::render_date;
use super::timestamp;
use crate::view::CellValue;
use crate::view::Column;
use crate::view::Tabular;

/// Lifecycle state of a solver run.
///
/// Statuses the client does not know about are kept verbatim in
/// [`RunStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Other(String),
}

impl RunStatus {
    /// The wire name of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Other(s) => s,
        }
    }

    /// Returns `true` once the run will no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Human label for tables and reports.
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for RunStatus {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RunStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RunStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// One optimization run as returned by `/api/solver/runs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverRun {
    pub id: i64,
    pub run_id: String,
    pub status: RunStatus,
    #[serde(default, with = "timestamp::option")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub objective_value: Option<f64>,
    /// Seconds spent solving.
    #[serde(default)]
    pub solve_time: Option<f64>,
    #[serde(default)]
    pub assignments_count: u32,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Response of `POST /api/solver/solve`.
///
/// The backend answers with the freshly created run, which may already be
/// terminal when the solve is synchronous.
pub type SolveResponse = SolverRun;

column_keys! {
    /// Columns of a solver run table.
    SolverRunColumn {
        Id => "id",
        RunId => "run_id",
        Status => "status",
        StartDate => "start_date",
        EndDate => "end_date",
        ObjectiveValue => "objective_value",
        SolveTime => "solve_time",
        AssignmentsCount => "assignments_count",
        CreatedAt => "created_at",
    }
}

impl SolverRunColumn {
    /// The columns shown on the solver runs screen.
    pub fn defaults() -> Vec<Column<Self>> {
        vec![
            Column::new(Self::RunId, "Run").width(12).render(render_short_id),
            Column::new(Self::Status, "Status").width(10),
            Column::new(Self::StartDate, "From").width(10).render(render_date),
            Column::new(Self::EndDate, "To").width(10).render(render_date),
            Column::new(Self::AssignmentsCount, "Assignments").width(11),
            Column::new(Self::SolveTime, "Time (s)")
                .width(8)
                .render(render_seconds),
            Column::new(Self::CreatedAt, "Created")
                .width(10)
                .render(render_date),
        ]
    }
}

impl Tabular for SolverRun {
    type Key = SolverRunColumn;

    fn cell(&self, key: SolverRunColumn) -> CellValue {
        match key {
            SolverRunColumn::Id => self.id.into(),
            SolverRunColumn::RunId => (&self.run_id).into(),
            SolverRunColumn::Status => self.status.as_str().into(),
            SolverRunColumn::StartDate => self.start_date.into(),
            SolverRunColumn::EndDate => self.end_date.into(),
            SolverRunColumn::ObjectiveValue => self.objective_value.into(),
            SolverRunColumn::SolveTime => self.solve_time.into(),
            SolverRunColumn::AssignmentsCount => self.assignments_count.into(),
            SolverRunColumn::CreatedAt => self.created_at.into(),
        }
    }
}

/// First eight characters of a run id.
fn render_short_id(value: &CellValue) -> String {
    match value {
        CellValue::Text(id) => id.chars().take(8).collect(),
        other => other.to_search_text(),
    }
}

fn render_seconds(value: &CellValue) -> String {
    match value {
        CellValue::Float(secs) => format!("{secs:.2}"),
        CellValue::Null => "-".to_string(),
        other => other.to_search_text(),
    }
}

/// One entry of a run's error log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunError {
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Any other fields the log entry carries.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `/api/solver/runs/{run_id}/errors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunErrors {
    #[serde(default)]
    pub errors: Vec<RunError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrips_unknown_values() {
        let status: RunStatus = serde_json::from_str(r#""queued""#).unwrap();
        assert_eq!(status, RunStatus::Other("queued".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""queued""#);
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_status_terminal() {
        assert!(RunStatus::from("completed").is_terminal());
        assert!(RunStatus::from("FAILED").is_terminal());
        assert!(!RunStatus::from("running").is_terminal());
    }

    #[test]
    fn test_deserialize_run() {
        let json = r#"{
            "id": 1, "run_id": "5f1c2a9e-aaaa-bbbb-cccc-123456789012",
            "status": "completed", "start_date": "2024-06-03T00:00:00",
            "end_date": "2024-06-09T00:00:00", "objective_value": 1520.5,
            "solve_time": 3.25, "assignments_count": 42,
            "created_at": "2024-06-01T10:00:00"
        }"#;
        let run: SolverRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.status, RunStatus::Completed);
        assert_eq!(run.assignments_count, 42);
        assert_eq!(
            render_short_id(&run.cell(SolverRunColumn::RunId)),
            "5f1c2a9e"
        );
        assert_eq!(render_seconds(&run.cell(SolverRunColumn::SolveTime)), "3.25");
    }

    #[test]
    fn test_run_error_keeps_extra_fields() {
        let json = r#"{"errors": [{"message": "infeasible", "level": "error"}]}"#;
        let log: RunErrors = serde_json::from_str(json).unwrap();
        assert_eq!(log.errors.len(), 1);
        assert_eq!(log.errors[0].message, "infeasible");
        assert!(log.errors[0].created_at.is_none());
        assert_eq!(log.errors[0].extra["level"], "error");
    }
}
