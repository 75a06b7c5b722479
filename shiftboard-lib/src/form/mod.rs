//! Create and update payloads with client-side validation
//!
//! Every draft has a `validate()` that reports the first problem of each
//! failing field, so a form can show all of them at once. The client runs
//! `validate()` before sending, and never sends an invalid draft.

mod employee;
mod shift;
mod solver;

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;

pub use employee::*;
pub use shift::*;
pub use solver::*;

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+0-9 ()-]{6,20}$").expect("Invalid regex pattern"));

static TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("Invalid regex pattern"));

/// Splits comma-separated skills into a trimmed list without blanks or
/// repeats, keeping first-seen order.
///
/// # Example
///
/// ```
/// use shiftboard_lib::form::parse_skills;
///
/// assert_eq!(parse_skills(" caja, ,reposicion,caja "), ["caja", "reposicion"]);
/// ```
pub fn parse_skills(input: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !skills.iter().any(|s| s == skill) {
            skills.push(skill.to_string());
        }
    }
    skills
}

/// Returns `true` for a 24h `HH:MM` time.
pub fn is_valid_time(value: &str) -> bool {
    TIME.is_match(value) && NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}

pub(crate) fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

pub(crate) fn is_valid_email(value: &str) -> bool {
    email_address::EmailAddress::is_valid(value.trim())
}
