//! Records exchanged with the scheduling backend.
//!
//! Every list-able record implements [`Tabular`](crate::view::Tabular) with
//! its own column key enum and ships a default column set for display.

mod assignment;
mod employee;
mod report;
mod shift;
mod solver;
pub(crate) mod timestamp;
mod user;

pub use assignment::*;
pub use employee::*;
pub use report::*;
pub use shift::*;
pub use solver::*;
pub use user::*;

/// Error returned when a column name does not match any column key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column '{name}', expected one of: {expected}")]
pub struct UnknownColumn {
    pub name: String,
    pub expected: String,
}

/// Declares a column key enum with string names.
///
/// Names parse case-insensitively, and `-` is accepted in place of `_`, so
/// `--sort hourly-rate` works from the command line.
macro_rules! column_keys {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $key:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every key, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The key's field name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::UnknownColumn;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
                Self::ALL
                    .iter()
                    .copied()
                    .find(|key| key.as_str() == wanted)
                    .ok_or_else(|| $crate::model::UnknownColumn {
                        name: s.to_string(),
                        expected: Self::ALL
                            .iter()
                            .map(|k| k.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

pub(crate) use column_keys;

/// Shows a timestamp as a day-first calendar date.
pub(crate) fn render_date(value: &crate::view::CellValue) -> String {
    use crate::view::CellValue;

    match value {
        CellValue::DateTime(dt) => dt.format("%d/%m/%Y").to_string(),
        CellValue::Date(d) => d.format("%d/%m/%Y").to_string(),
        CellValue::Null => "-".to_string(),
        other => other.to_search_text(),
    }
}

/// Shows a missing optional name as `N/A`.
pub(crate) fn render_or_na(value: &crate::view::CellValue) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_search_text()
    }
}

/// Reads `null` as the type's default, for list and map fields the backend
/// may send as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;

    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
