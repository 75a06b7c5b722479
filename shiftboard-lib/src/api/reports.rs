//! Report endpoints

use super::request::not_found;
use super::request::segment;
use crate::ShiftboardClient;
use crate::error::Error;
use crate::model::PrintView;
use crate::model::Report;

impl ShiftboardClient {
    /// Fetches the full report of a run.
    pub async fn report(&self, run_id: &str) -> Result<Report, Error> {
        self.get_json(&format!("/api/reports/{}", segment(run_id)))
            .await
            .map_err(not_found("report", run_id))
    }

    /// Fetches the server-rendered printable report.
    pub async fn print_view(&self, run_id: &str) -> Result<PrintView, Error> {
        self.get_json(&format!("/api/reports/{}/printview", segment(run_id)))
            .await
            .map_err(not_found("report", run_id))
    }
}
