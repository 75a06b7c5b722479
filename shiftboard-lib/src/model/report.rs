//! Run reports

use serde::Deserialize;
use serde::Serialize;

use super::Assignment;
use super::SolverRun;

/// Full report of a solver run, from `/api/reports/{run_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub solver_run: SolverRun,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    pub metrics: ReportMetrics,
}

impl Report {
    /// Assignments per employee name, in order of first appearance.
    ///
    /// A missing or blank name counts under `N/A`.
    pub fn by_employee(&self) -> Vec<(String, usize)> {
        count_by(&self.assignments, |a| a.employee_name.as_deref())
    }

    /// Assignments per shift name, in order of first appearance.
    pub fn by_shift(&self) -> Vec<(String, usize)> {
        count_by(&self.assignments, |a| a.shift_name.as_deref())
    }
}

fn count_by<'a>(assignments: &'a [Assignment], name: impl Fn(&'a Assignment) -> Option<&'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for assignment in assignments {
        let label = name(assignment).filter(|n| !n.trim().is_empty()).unwrap_or("N/A");
        match counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }
    counts
}

/// Summary figures of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetrics {
    #[serde(default)]
    pub total_assignments: u32,
    #[serde(default)]
    pub solve_time: Option<f64>,
    #[serde(default)]
    pub objective_value: Option<f64>,
    /// Percentage of required slots filled, 0 to 100.
    #[serde(default)]
    pub coverage_percentage: f64,
    #[serde(default)]
    pub status: String,
}

/// Server-rendered printable report, from `/api/reports/{run_id}/printview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintView {
    pub html: String,
}
