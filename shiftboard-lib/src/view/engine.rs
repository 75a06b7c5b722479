//! The three pure stages of a view: filter, sort, paginate.
//!
//! Each stage works on borrowed records and returns a new ordering of
//! references, so the source collection is never touched.

use super::Column;
use super::SortDirection;
use super::Tabular;

/// Keeps the records where at least one column's text contains `search_term`,
/// ignoring case.
///
/// An empty term keeps every record in its original order.
pub fn filter<'a, R: Tabular>(
    records: &'a [R],
    columns: &[Column<R::Key>],
    search_term: &str,
) -> Vec<&'a R> {
    if search_term.is_empty() {
        return records.iter().collect();
    }

    let needle = search_term.to_lowercase();
    records
        .iter()
        .filter(|record| matches_search(*record, columns, &needle))
        .collect()
}

/// Returns `true` if any column of `record` contains the already lower-cased `needle`.
pub(crate) fn matches_search<R: Tabular>(record: &R, columns: &[Column<R::Key>], needle: &str) -> bool {
    columns.iter().any(|column| {
        record
            .cell(column.key)
            .to_search_text()
            .to_lowercase()
            .contains(needle)
    })
}

/// Orders `records` by the raw value of `sort_field`.
///
/// With no field the input order is returned unchanged. The sort is stable:
/// ties keep their input order in both directions.
pub fn sort<'a, R: Tabular>(
    mut records: Vec<&'a R>,
    sort_field: Option<R::Key>,
    direction: SortDirection,
) -> Vec<&'a R> {
    if let Some(key) = sort_field {
        records.sort_by(|a, b| direction.apply(a.cell(key).compare(&b.cell(key))));
    }
    records
}

/// Returns page `page` (1-based) of `page_size` items.
///
/// Pages past the end, page 0 and a zero page size all yield an empty slice;
/// the caller decides whether to clamp.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }

    let Some(start) = (page - 1).checked_mul(page_size) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total_items` (0 when there are none).
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    }
}
