//! Employee payloads

use serde::Deserialize;
use serde::Serialize;

use super::is_valid_email;
use super::is_valid_phone;
use crate::error::ValidationErrors;
use crate::model::Employee;

/// Body of `POST /api/employees`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub skills: Vec<String>,
    pub hourly_rate: f64,
}

impl EmployeeDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, &self.name);
        check_email(&mut errors, &self.email);
        if let Some(phone) = &self.phone {
            check_phone(&mut errors, phone);
        }
        check_rate(&mut errors, self.hourly_rate);
        errors.into_result()
    }
}

/// Body of `PUT /api/employees/{id}`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl EmployeePatch {
    /// Returns `true` when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            check_name(&mut errors, name);
        }
        if let Some(email) = &self.email {
            check_email(&mut errors, email);
        }
        if let Some(phone) = &self.phone {
            check_phone(&mut errors, phone);
        }
        if let Some(rate) = self.hourly_rate {
            check_rate(&mut errors, rate);
        }
        errors.into_result()
    }
}

impl From<&Employee> for EmployeeDraft {
    fn from(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            position: employee.position.clone(),
            skills: employee.skills.clone(),
            hourly_rate: employee.hourly_rate,
        }
    }
}

fn check_name(errors: &mut ValidationErrors, name: &str) {
    if name.trim().is_empty() {
        errors.add("name", "Name is required");
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Invalid email format");
    }
}

fn check_phone(errors: &mut ValidationErrors, phone: &str) {
    if !is_valid_phone(phone) {
        errors.add("phone", "Invalid phone number");
    }
}

fn check_rate(errors: &mut ValidationErrors, rate: f64) {
    if !rate.is_finite() || rate < 0.0 {
        errors.add("hourly_rate", "Hourly rate must be zero or more");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft() {
        let mut draft = EmployeeDraft::new("Ana", "ana@example.com");
        draft.phone = Some("+34 600 123 456".to_string());
        draft.hourly_rate = 12.5;
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_reports_every_failing_field() {
        let mut draft = EmployeeDraft::new("  ", "not-an-email");
        draft.hourly_rate = -1.0;
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Invalid email format"));
        assert!(errors.has("hourly_rate"));
    }

    #[test]
    fn test_missing_email_message() {
        let errors = EmployeeDraft::new("Ana", "").validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
    }

    #[test]
    fn test_patch_only_checks_set_fields() {
        assert!(EmployeePatch::default().validate().is_ok());
        assert!(EmployeePatch::default().is_empty());

        let patch = EmployeePatch {
            hourly_rate: Some(f64::NAN),
            ..Default::default()
        };
        assert!(patch.validate().unwrap_err().has("hourly_rate"));
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = EmployeePatch {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"is_active":false}"#);
    }
}
