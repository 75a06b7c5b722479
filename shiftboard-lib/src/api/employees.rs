//! Employee endpoints

use reqwest::Method;

use super::ListParams;
use super::request::not_found;
use crate::ShiftboardClient;
use crate::error::Error;
use crate::form::EmployeeDraft;
use crate::form::EmployeePatch;
use crate::model::Employee;

impl ShiftboardClient {
    /// Lists employees.
    pub async fn list_employees(&self, params: ListParams) -> Result<Vec<Employee>, Error> {
        self.get_json(&format!("/api/employees{}", params.to_query())).await
    }

    /// Fetches one employee.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no employee has this id.
    pub async fn get_employee(&self, id: i64) -> Result<Employee, Error> {
        self.get_json(&format!("/api/employees/{id}"))
            .await
            .map_err(not_found("employee", id))
    }

    /// Validates and creates an employee.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] without contacting the backend when the draft is invalid.
    pub async fn create_employee(&self, draft: &EmployeeDraft) -> Result<Employee, Error> {
        draft.validate()?;
        let created: Employee = self.send_json(Method::POST, "/api/employees", draft).await?;
        log::info!("[employees] created {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Validates and applies a partial update.
    pub async fn update_employee(&self, id: i64, patch: &EmployeePatch) -> Result<Employee, Error> {
        patch.validate()?;
        self.send_json(Method::PUT, &format!("/api/employees/{id}"), patch)
            .await
            .map_err(not_found("employee", id))
    }

    /// Deletes an employee.
    pub async fn delete_employee(&self, id: i64) -> Result<(), Error> {
        self.send_empty(Method::DELETE, &format!("/api/employees/{id}"))
            .await
            .map_err(not_found("employee", id))?;
        log::info!("[employees] deleted {}", id);
        Ok(())
    }
}
