//! Cell values produced by records for display, search and sorting.

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::Utc;

/// The raw value of one record field, as seen by the view engine.
///
/// Search works on [`CellValue::to_search_text`]; sorting works on the raw
/// value through [`CellValue::compare`], never on rendered text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing value.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Calendar date without time.
    Date(NaiveDate),
    /// Point in time.
    DateTime(DateTime<Utc>),
    /// A list of labels (e.g. skills).
    List(Vec<String>),
}

impl CellValue {
    /// Returns `true` for `Null`, empty text and empty lists.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// The value converted to text, as matched by the search filter.
    ///
    /// Lists are joined with `,` and `Null` is the empty string. Timestamps
    /// use the backend's naive ISO form (`2024-03-01T08:30:00.123456`, the
    /// fraction only when non-zero) so a term copied from an API response
    /// still matches.
    pub fn to_search_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            Self::List(items) => items.join(","),
        }
    }

    /// Native ordering of two values. This is a total order.
    ///
    /// Numbers compare numerically (integers and floats together, NaN after
    /// every other number), text lexicographically, dates and timestamps
    /// chronologically (a date counts as midnight UTC), `false` before
    /// `true`, lists element by element. Values of different kinds order by
    /// kind: `Null`, booleans, numbers, text, dates, lists.
    pub fn compare(&self, other: &Self) -> Ordering {
        use CellValue::*;

        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (List(a), List(b)) => a.cmp(b),
            (Int(_) | Float(_), Int(_) | Float(_)) => compare_numbers(self, other),
            (Date(_) | DateTime(_), Date(_) | DateTime(_)) => compare_instants(self, other),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
            Self::Date(_) | Self::DateTime(_) => 4,
            Self::List(_) => 5,
        }
    }
}

/// Orders numbers by value, then integers before an equal float, then by the
/// exact integer so large `i64`s that round to the same `f64` stay ordered.
fn compare_numbers(a: &CellValue, b: &CellValue) -> Ordering {
    fn key(value: &CellValue) -> (bool, f64, u8, i64) {
        match value {
            CellValue::Int(n) => (false, *n as f64, 0, *n),
            CellValue::Float(f) => (f.is_nan(), *f, 1, 0),
            _ => (false, 0.0, 0, 0),
        }
    }

    let (a_nan, a_val, a_kind, a_int) = key(a);
    let (b_nan, b_val, b_kind, b_int) = key(b);
    a_nan
        .cmp(&b_nan)
        .then_with(|| a_val.total_cmp(&b_val))
        .then(a_kind.cmp(&b_kind))
        .then(a_int.cmp(&b_int))
}

/// Orders dates and timestamps on one timeline; a date sorts before a
/// timestamp at its own midnight.
fn compare_instants(a: &CellValue, b: &CellValue) -> Ordering {
    fn key(value: &CellValue) -> (Option<DateTime<Utc>>, u8) {
        match value {
            CellValue::Date(d) => (Some(d.and_time(NaiveTime::MIN).and_utc()), 0),
            CellValue::DateTime(dt) => (Some(*dt), 1),
            _ => (None, 0),
        }
    }

    key(a).cmp(&key(b))
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u8> for CellValue {
    fn from(value: u8) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl From<Vec<String>> for CellValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<&[String]> for CellValue {
    fn from(value: &[String]) -> Self {
        Self::List(value.to_vec())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_search_text() {
        assert_eq!(CellValue::from(10.0).to_search_text(), "10");
        assert_eq!(CellValue::from(12.5).to_search_text(), "12.5");
        assert_eq!(CellValue::Null.to_search_text(), "");
        assert_eq!(
            CellValue::from(vec!["cocina".to_string(), "caja".to_string()]).to_search_text(),
            "cocina,caja"
        );
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        assert_eq!(CellValue::from(dt).to_search_text(), "2024-03-01T08:30:00");
    }

    #[test]
    fn test_search_text_keeps_microseconds() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap() + chrono::Duration::microseconds(123_456);
        assert_eq!(CellValue::from(dt).to_search_text(), "2024-03-01T08:30:00.123456");
    }

    #[test]
    fn test_numeric_ordering_mixes_ints_and_floats() {
        assert_eq!(CellValue::Int(5).compare(&CellValue::Float(10.0)), Ordering::Less);
        // Equal values: the integer goes first.
        assert_eq!(CellValue::Float(10.0).compare(&CellValue::Int(10)), Ordering::Greater);
        // Numeric, not lexicographic: "9" > "10" as text, but 9 < 10.
        assert_eq!(CellValue::Int(9).compare(&CellValue::Int(10)), Ordering::Less);
    }

    #[test]
    fn test_null_sorts_first() {
        assert_eq!(CellValue::Null.compare(&CellValue::from("a")), Ordering::Less);
        assert_eq!(CellValue::from(0).compare(&CellValue::Null), Ordering::Greater);
    }

    #[test]
    fn test_chronological_ordering() {
        let earlier = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(CellValue::from(earlier).compare(&CellValue::from(later)), Ordering::Less);
    }

    #[test]
    fn test_different_kinds_order_by_kind() {
        assert_eq!(CellValue::from(1).compare(&CellValue::from("n/a")), Ordering::Less);
        assert_eq!(CellValue::from("n/a").compare(&CellValue::from(2)), Ordering::Greater);
        assert_eq!(CellValue::from(true).compare(&CellValue::from(0)), Ordering::Less);
    }

    #[test]
    fn test_nan_sorts_after_numbers() {
        let nan = CellValue::Float(f64::NAN);
        assert_eq!(nan.compare(&CellValue::Float(f64::INFINITY)), Ordering::Greater);
        assert_eq!(CellValue::Int(i64::MAX).compare(&nan), Ordering::Less);
        assert_eq!(nan.compare(&CellValue::from("x")), Ordering::Less);
    }

    #[test]
    fn test_large_integers_stay_ordered() {
        let big = CellValue::Int(1 << 53);
        let bigger = CellValue::Int((1 << 53) + 1);
        let float = CellValue::Float((1u64 << 53) as f64);
        assert_eq!(big.compare(&bigger), Ordering::Less);
        assert_eq!(big.compare(&float), Ordering::Less);
        // Rounds to the same f64 as both, so it sorts after the integers.
        assert_eq!(float.compare(&bigger), Ordering::Greater);
    }
}
