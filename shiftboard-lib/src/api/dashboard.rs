//! Dashboard summary

use serde::Serialize;

use super::ListParams;
use crate::ShiftboardClient;
use crate::error::Error;
use crate::model::Employee;
use crate::model::RunStatus;
use crate::model::Shift;
use crate::model::SolverRun;

/// How many records the dashboard asks for per list.
const DASHBOARD_LIMIT: u32 = 1000;

/// Headline numbers for the dashboard screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_employees: usize,
    pub active_employees: usize,
    pub total_shifts: usize,
    pub total_runs: usize,
    pub completed_runs: usize,
    pub failed_runs: usize,
    /// Completed runs as a percentage of finished runs; 0 when none finished.
    pub success_rate: f64,
    /// Most recently created run.
    pub latest_run: Option<SolverRun>,
}

impl DashboardStats {
    /// Computes the figures from already fetched lists.
    pub fn from_records(employees: &[Employee], shifts: &[Shift], runs: &[SolverRun]) -> Self {
        let completed_runs = runs
            .iter()
            .filter(|r| r.status == RunStatus::Completed)
            .count();
        let failed_runs = runs.iter().filter(|r| r.status == RunStatus::Failed).count();
        let finished = completed_runs + failed_runs;
        let success_rate = if finished == 0 {
            0.0
        } else {
            completed_runs as f64 / finished as f64 * 100.0
        };

        Self {
            total_employees: employees.len(),
            active_employees: employees.iter().filter(|e| e.is_active).count(),
            total_shifts: shifts.len(),
            total_runs: runs.len(),
            completed_runs,
            failed_runs,
            success_rate,
            latest_run: runs.iter().max_by_key(|r| r.created_at).cloned(),
        }
    }
}

impl ShiftboardClient {
    /// Fetches employees, shifts and runs concurrently and summarizes them.
    pub async fn dashboard(&self) -> Result<DashboardStats, Error> {
        let params = ListParams::new().limit(DASHBOARD_LIMIT).active_only(false);
        let (employees, shifts, runs) = futures::try_join!(
            self.list_employees(params),
            self.list_shifts(params),
            self.list_runs(params),
        )?;
        Ok(DashboardStats::from_records(&employees, &shifts, &runs))
    }
}
