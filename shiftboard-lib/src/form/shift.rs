//! Shift payloads

use serde::Deserialize;
use serde::Serialize;

use super::is_valid_time;
use crate::error::ValidationErrors;
use crate::model::Shift;

/// Body of `POST /api/shifts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDraft {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub day_of_week: u8,
    pub required_skills: Vec<String>,
    pub min_employees: u32,
    pub max_employees: u32,
    pub cost_multiplier: f64,
}

impl Default for ShiftDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            day_of_week: 0,
            required_skills: Vec::new(),
            min_employees: 1,
            max_employees: 1,
            cost_multiplier: 1.0,
        }
    }
}

impl ShiftDraft {
    pub fn new(
        name: impl Into<String>,
        day_of_week: u8,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            day_of_week,
            start_time: start_time.into(),
            end_time: end_time.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Name is required");
        }
        check_time(&mut errors, "start_time", &self.start_time);
        check_time(&mut errors, "end_time", &self.end_time);
        check_day(&mut errors, self.day_of_week);
        check_staffing(&mut errors, self.min_employees, self.max_employees);
        check_multiplier(&mut errors, self.cost_multiplier);
        errors.into_result()
    }
}

/// Body of `PUT /api/shifts/{id}`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_employees: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_employees: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ShiftPatch {
    /// Returns `true` when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks the set fields.
    ///
    /// Staffing bounds are only compared when both are in the patch; the
    /// backend holds the other value.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                errors.add("name", "Name is required");
            }
        }
        if let Some(start) = &self.start_time {
            check_time(&mut errors, "start_time", start);
        }
        if let Some(end) = &self.end_time {
            check_time(&mut errors, "end_time", end);
        }
        if let Some(day) = self.day_of_week {
            check_day(&mut errors, day);
        }
        match (self.min_employees, self.max_employees) {
            (Some(min), Some(max)) => check_staffing(&mut errors, min, max),
            (Some(min), None) => check_staffing(&mut errors, min, min),
            _ => {}
        }
        if let Some(multiplier) = self.cost_multiplier {
            check_multiplier(&mut errors, multiplier);
        }
        errors.into_result()
    }
}

impl From<&Shift> for ShiftDraft {
    fn from(shift: &Shift) -> Self {
        Self {
            name: shift.name.clone(),
            start_time: shift.start_time.clone(),
            end_time: shift.end_time.clone(),
            day_of_week: shift.day_of_week,
            required_skills: shift.required_skills.clone(),
            min_employees: shift.min_employees,
            max_employees: shift.max_employees,
            cost_multiplier: shift.cost_multiplier,
        }
    }
}

fn check_time(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "Time is required");
    } else if !is_valid_time(value) {
        errors.add(field, "Time must be HH:MM (24h)");
    }
}

fn check_day(errors: &mut ValidationErrors, day: u8) {
    if day > 6 {
        errors.add("day_of_week", "Day must be between 0 (Monday) and 6 (Sunday)");
    }
}

fn check_staffing(errors: &mut ValidationErrors, min: u32, max: u32) {
    if min < 1 {
        errors.add("min_employees", "At least one employee is required");
    }
    if max < min {
        errors.add("max_employees", "Maximum must not be below the minimum");
    }
}

fn check_multiplier(errors: &mut ValidationErrors, multiplier: f64) {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        errors.add("cost_multiplier", "Cost multiplier must be greater than zero");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_overnight_shift() {
        let draft = ShiftDraft::new("Noche", 4, "22:00", "06:00");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_invalid_shift_fields() {
        let draft = ShiftDraft {
            name: String::new(),
            start_time: "25:00".to_string(),
            end_time: String::new(),
            day_of_week: 7,
            required_skills: Vec::new(),
            min_employees: 3,
            max_employees: 2,
            cost_multiplier: 0.0,
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.get("start_time"), Some("Time must be HH:MM (24h)"));
        assert_eq!(errors.get("end_time"), Some("Time is required"));
        assert!(errors.has("name"));
        assert!(errors.has("day_of_week"));
        assert!(errors.has("max_employees"));
        assert!(errors.has("cost_multiplier"));
        assert!(!errors.has("min_employees"));
    }

    #[test]
    fn test_zero_minimum_rejected() {
        let draft = ShiftDraft {
            min_employees: 0,
            ..ShiftDraft::new("Tarde", 1, "14:00", "22:00")
        };
        assert!(draft.validate().unwrap_err().has("min_employees"));
    }

    #[test]
    fn test_patch_with_partial_staffing() {
        let patch = ShiftPatch {
            max_employees: Some(0),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());

        let patch = ShiftPatch {
            min_employees: Some(4),
            max_employees: Some(2),
            ..Default::default()
        };
        assert!(patch.validate().unwrap_err().has("max_employees"));
    }
}
