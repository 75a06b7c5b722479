//! Solver run parameters

use chrono::Days;
use chrono::NaiveDate;
use serde::Serialize;
use serde::Serializer;

use crate::error::ValidationErrors;

/// Constraints sent with `POST /api/solver/solve`.
///
/// Dates are whole days; they go over the wire as midnight timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverConstraints {
    #[serde(serialize_with = "midnight")]
    pub start_date: NaiveDate,
    #[serde(serialize_with = "midnight")]
    pub end_date: NaiveDate,
    /// Solver time budget in seconds.
    #[serde(rename = "max_time")]
    pub max_time_seconds: u32,
    /// Minimum share of required slots to fill, in percent.
    pub min_coverage: u32,
    pub max_consecutive_days: u32,
    pub min_rest_hours: u32,
    pub max_hours_per_employee: u32,
    pub prefer_employee_preferences: bool,
    pub minimize_cost: bool,
}

impl SolverConstraints {
    /// Constraints for `start_date..=end_date` with default limits.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            max_time_seconds: 60,
            min_coverage: 80,
            max_consecutive_days: 6,
            min_rest_hours: 12,
            max_hours_per_employee: 40,
            prefer_employee_preferences: true,
            minimize_cost: true,
        }
    }

    /// Constraints for the seven days starting at `start_date`.
    pub fn for_week(start_date: NaiveDate) -> Self {
        let end_date = start_date
            .checked_add_days(Days::new(6))
            .unwrap_or(start_date);
        Self::new(start_date, end_date)
    }

    /// Number of days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.end_date < self.start_date {
            errors.add("end_date", "End date must not be before the start date");
        }
        if self.max_time_seconds == 0 {
            errors.add("max_time", "Time limit must be greater than zero");
        }
        if self.min_coverage > 100 {
            errors.add("min_coverage", "Coverage must be between 0 and 100");
        }
        if !(1..=7).contains(&self.max_consecutive_days) {
            errors.add("max_consecutive_days", "Consecutive days must be between 1 and 7");
        }
        if self.min_rest_hours > 24 {
            errors.add("min_rest_hours", "Rest hours must be between 0 and 24");
        }
        if self.max_hours_per_employee == 0 {
            errors.add("max_hours_per_employee", "Weekly hours must be greater than zero");
        }
        errors.into_result()
    }
}

fn midnight<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%dT00:00:00"))
}
