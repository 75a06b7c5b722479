//! Shift endpoints

use reqwest::Method;

use super::ListParams;
use super::request::not_found;
use crate::ShiftboardClient;
use crate::error::Error;
use crate::form::ShiftDraft;
use crate::form::ShiftPatch;
use crate::model::Shift;

impl ShiftboardClient {
    /// Lists shifts.
    pub async fn list_shifts(&self, params: ListParams) -> Result<Vec<Shift>, Error> {
        self.get_json(&format!("/api/shifts{}", params.to_query())).await
    }

    /// Fetches one shift.
    pub async fn get_shift(&self, id: i64) -> Result<Shift, Error> {
        self.get_json(&format!("/api/shifts/{id}"))
            .await
            .map_err(not_found("shift", id))
    }

    /// Validates and creates a shift.
    pub async fn create_shift(&self, draft: &ShiftDraft) -> Result<Shift, Error> {
        draft.validate()?;
        let created: Shift = self.send_json(Method::POST, "/api/shifts", draft).await?;
        log::info!("[shifts] created {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Validates and applies a partial update.
    pub async fn update_shift(&self, id: i64, patch: &ShiftPatch) -> Result<Shift, Error> {
        patch.validate()?;
        self.send_json(Method::PUT, &format!("/api/shifts/{id}"), patch)
            .await
            .map_err(not_found("shift", id))
    }

    /// Deletes a shift.
    pub async fn delete_shift(&self, id: i64) -> Result<(), Error> {
        self.send_empty(Method::DELETE, &format!("/api/shifts/{id}"))
            .await
            .map_err(not_found("shift", id))?;
        log::info!("[shifts] deleted {}", id);
        Ok(())
    }
}
