//! Solver endpoints

use reqwest::Method;
use serde::Serialize;

use super::ListParams;
use super::request::not_found;
use super::request::segment;
use crate::ShiftboardClient;
use crate::error::Error;
use crate::form::SolverConstraints;
use crate::model::Assignment;
use crate::model::RunErrors;
use crate::model::SolveResponse;
use crate::model::SolverRun;

#[derive(Serialize)]
struct SolveRequest<'a> {
    constraints: &'a SolverConstraints,
}

impl ShiftboardClient {
    /// Validates the constraints and starts an optimization run.
    pub async fn solve(&self, constraints: &SolverConstraints) -> Result<SolveResponse, Error> {
        constraints.validate()?;
        let run: SolveResponse = self
            .send_json(Method::POST, "/api/solver/solve", &SolveRequest { constraints })
            .await?;
        log::info!("[solver] started run {} ({})", run.run_id, run.status);
        Ok(run)
    }

    /// Lists solver runs. `active_only` is ignored.
    pub async fn list_runs(&self, params: ListParams) -> Result<Vec<SolverRun>, Error> {
        let query = params.without_filter().to_query();
        self.get_json(&format!("/api/solver/runs{query}")).await
    }

    /// Fetches one run by its run id.
    pub async fn get_run(&self, run_id: &str) -> Result<SolverRun, Error> {
        self.get_json(&format!("/api/solver/runs/{}", segment(run_id)))
            .await
            .map_err(not_found("run", run_id))
    }

    /// Lists the assignments a run produced.
    pub async fn run_assignments(&self, run_id: &str) -> Result<Vec<Assignment>, Error> {
        self.get_json(&format!("/api/solver/runs/{}/assignments", segment(run_id)))
            .await
            .map_err(not_found("run", run_id))
    }

    /// Fetches a run's error log.
    pub async fn run_errors(&self, run_id: &str) -> Result<RunErrors, Error> {
        self.get_json(&format!("/api/solver/runs/{}/errors", segment(run_id)))
            .await
            .map_err(not_found("run", run_id))
    }
}
