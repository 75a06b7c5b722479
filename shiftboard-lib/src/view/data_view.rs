//! A stateful view over an owned record collection.

use super::Column;
use super::SortDirection;
use super::Tabular;
use super::ViewEvent;
use super::ViewState;
use super::engine;

/// Records, columns and interaction state of one table.
///
/// Each table owns its own `DataView`; nothing is shared between views.
/// Derived rows are recomputed on every call from the current state, so they
/// always reflect the latest event.
pub struct DataView<R: Tabular> {
    records: Vec<R>,
    columns: Vec<Column<R::Key>>,
    state: ViewState<R::Key>,
    page_size: usize,
}

impl<R: Tabular> DataView<R> {
    /// Creates an empty view with default state.
    pub fn new(columns: Vec<Column<R::Key>>, page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            columns,
            state: ViewState::default(),
            page_size,
        }
    }

    /// Creates a view over `records` with default state.
    pub fn with_records(columns: Vec<Column<R::Key>>, records: Vec<R>, page_size: usize) -> Self {
        Self {
            records,
            ..Self::new(columns, page_size)
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The source records, in the order they were supplied.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn columns(&self) -> &[Column<R::Key>] {
        &self.columns
    }

    pub fn state(&self) -> &ViewState<R::Key> {
        &self.state
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Looks up the column for `key`.
    pub fn column(&self, key: R::Key) -> Option<&Column<R::Key>> {
        self.columns.iter().find(|c| c.key == key)
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Applies one interaction event.
    pub fn apply(&mut self, event: ViewEvent<R::Key, R>) {
        match event {
            ViewEvent::SearchChanged(term) => self.set_search(term),
            ViewEvent::SortHeaderClicked(key) => {
                self.click_header(key);
            }
            ViewEvent::PageChanged(page) => self.set_page(page),
            ViewEvent::DataReplaced(records) => self.replace_data(records),
        }
    }

    /// Updates the search term. The current page is left as is.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
    }

    /// Handles a click on the header of column `key`.
    ///
    /// Returns `false` (and changes nothing) if the column is not sortable or
    /// is not part of this view.
    pub fn click_header(&mut self, key: R::Key) -> bool {
        match self.column(key) {
            Some(column) if column.sortable => {
                self.state.toggle_sort(key);
                true
            }
            _ => false,
        }
    }

    /// Sets the sort column and direction directly.
    ///
    /// Same sortability rules as [`DataView::click_header`].
    pub fn set_sort(&mut self, key: R::Key, direction: SortDirection) -> bool {
        match self.column(key) {
            Some(column) if column.sortable => {
                self.state.sort_field = Some(key);
                self.state.sort_direction = direction;
                true
            }
            _ => false,
        }
    }

    /// Removes any active sort.
    pub fn clear_sort(&mut self) {
        self.state.sort_field = None;
        self.state.sort_direction = SortDirection::Asc;
    }

    /// Moves to `page` (1-based). Page 0 is treated as page 1.
    ///
    /// Pages past the end are accepted and show as empty.
    pub fn set_page(&mut self, page: usize) {
        self.state.current_page = page.max(1);
    }

    /// Replaces the source records, keeping search, sort and page.
    pub fn replace_data(&mut self, records: Vec<R>) {
        self.records = records;
    }

    /// Moves the current page back onto the last page that has rows.
    ///
    /// The view never does this on its own; callers that prefer clamping over
    /// an empty page call it after [`DataView::replace_data`].
    pub fn clamp_page(&mut self) {
        let last = self.total_pages().max(1);
        if self.state.current_page > last {
            self.state.current_page = last;
        }
    }

    // -------------------------------------------------------------------------
    // Derived rows
    // -------------------------------------------------------------------------

    /// Records matching the search term, in source order.
    pub fn filtered(&self) -> Vec<&R> {
        engine::filter(&self.records, &self.columns, &self.state.search_term)
    }

    /// Filtered records in display order.
    ///
    /// A sort field that is not one of this view's columns is ignored.
    pub fn sorted(&self) -> Vec<&R> {
        let sort_field = self
            .state
            .sort_field
            .filter(|key| self.columns.iter().any(|c| c.key == *key));
        engine::sort(self.filtered(), sort_field, self.state.sort_direction)
    }

    /// Rows an export should contain: filtered and sorted, all pages.
    pub fn export_rows(&self) -> Vec<&R> {
        self.sorted()
    }

    /// Rows of the current page.
    pub fn page_rows(&self) -> Vec<&R> {
        let sorted = self.sorted();
        engine::paginate(&sorted, self.state.current_page, self.page_size).to_vec()
    }

    /// Number of records matching the search term.
    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    /// Number of pages for the filtered records.
    pub fn total_pages(&self) -> usize {
        engine::total_pages(self.filtered_count(), self.page_size)
    }

    /// Pagination metadata for the current page.
    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.state.current_page, self.page_size, self.filtered_count())
    }
}

/// Pagination metadata for one page of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-based current page.
    pub page: usize,
    pub page_size: usize,
    /// Records matching the search term.
    pub total_items: usize,
    pub total_pages: usize,
    /// 1-based index of the first row shown, 0 when the page is empty.
    pub first_item: usize,
    /// 1-based index of the last row shown, 0 when the page is empty.
    pub last_item: usize,
}

impl PageInfo {
    /// Computes metadata for `page` of `total_items` records.
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        let total_pages = engine::total_pages(total_items, page_size);
        let page = page.max(1);
        let start = (page - 1).saturating_mul(page_size);
        let (first_item, last_item) = if page_size == 0 || start >= total_items {
            (0, 0)
        } else {
            (start + 1, page.saturating_mul(page_size).min(total_items))
        };

        Self {
            page,
            page_size,
            total_items,
            total_pages,
            first_item,
            last_item,
        }
    }

    /// Returns `true` if the current page shows no rows.
    pub fn is_empty(&self) -> bool {
        self.first_item == 0
    }

    /// Returns `true` if the current page lies past the last page.
    pub fn is_out_of_range(&self) -> bool {
        self.total_items > 0 && self.page > self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::CellValue;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Key {
        Name,
        Rate,
        Notes,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        rate: i64,
        notes: &'static str,
    }

    impl Tabular for Row {
        type Key = Key;

        fn cell(&self, key: Key) -> CellValue {
            match key {
                Key::Name => self.name.into(),
                Key::Rate => self.rate.into(),
                Key::Notes => self.notes.into(),
            }
        }
    }

    fn ana_bob() -> Vec<Row> {
        vec![
            Row { name: "Ana", rate: 10, notes: "" },
            Row { name: "Bob", rate: 5, notes: "" },
        ]
    }

    fn view(page_size: usize) -> DataView<Row> {
        DataView::with_records(
            vec![
                Column::new(Key::Name, "Name"),
                Column::new(Key::Rate, "Rate"),
                Column::new(Key::Notes, "Notes").not_sortable(),
            ],
            ana_bob(),
            page_size,
        )
    }

    fn names(rows: &[&Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_sort_by_rate_ascending() {
        let mut view = view(10);
        view.apply(ViewEvent::SortHeaderClicked(Key::Rate));
        assert_eq!(names(&view.page_rows()), ["Bob", "Ana"]);
    }

    #[test]
    fn test_second_page_of_one() {
        let mut view = view(1);
        view.apply(ViewEvent::SortHeaderClicked(Key::Rate));
        view.apply(ViewEvent::PageChanged(2));
        assert_eq!(names(&view.page_rows()), ["Ana"]);

        let info = view.page_info();
        assert_eq!((info.first_item, info.last_item, info.total_items), (2, 2, 2));
        assert!(info.has_prev() && !info.has_next());
    }

    #[test]
    fn test_export_ignores_pagination() {
        let mut view = view(1);
        view.apply(ViewEvent::SearchChanged("an".to_string()));
        view.apply(ViewEvent::PageChanged(2));
        assert!(view.page_rows().is_empty());
        assert_eq!(names(&view.export_rows()), ["Ana"]);
    }

    #[test]
    fn test_unsortable_header_is_noop() {
        let mut view = view(10);
        assert!(!view.click_header(Key::Notes));
        assert_eq!(view.state().sort_field, None);
        assert_eq!(names(&view.page_rows()), ["Ana", "Bob"]);
    }

    #[test]
    fn test_sort_key_outside_columns_is_ignored() {
        let mut view = DataView::with_records(vec![Column::new(Key::Name, "Name")], ana_bob(), 10);
        assert!(!view.click_header(Key::Rate));

        // Even if the state names it, rows stay unsorted.
        view.state.sort_field = Some(Key::Rate);
        assert_eq!(names(&view.sorted()), ["Ana", "Bob"]);
    }

    #[test]
    fn test_data_replaced_keeps_state_and_page() {
        let mut view = view(1);
        view.apply(ViewEvent::SortHeaderClicked(Key::Rate));
        view.apply(ViewEvent::PageChanged(2));

        view.apply(ViewEvent::DataReplaced(vec![Row { name: "Cy", rate: 1, notes: "" }]));
        assert_eq!(view.state().sort_field, Some(Key::Rate));
        assert_eq!(view.state().current_page, 2);
        assert!(view.page_rows().is_empty());
        assert!(view.page_info().is_out_of_range());

        view.clamp_page();
        assert_eq!(view.state().current_page, 1);
        assert_eq!(names(&view.page_rows()), ["Cy"]);
    }

    #[test]
    fn test_search_does_not_reset_page() {
        let mut view = view(1);
        view.set_page(2);
        view.set_search("bob");
        assert_eq!(view.state().current_page, 2);
        assert!(view.page_rows().is_empty());
    }

    #[test]
    fn test_page_zero_is_page_one() {
        let mut view = view(10);
        view.set_page(0);
        assert_eq!(view.state().current_page, 1);
    }

    #[test]
    fn test_source_is_not_mutated() {
        let mut view = view(10);
        view.click_header(Key::Rate);
        view.click_header(Key::Rate);
        let _ = view.page_rows();
        assert_eq!(view.records(), ana_bob().as_slice());
    }

    #[test]
    fn test_page_info_empty() {
        let info = PageInfo::new(1, 10, 0);
        assert!(info.is_empty());
        assert!(!info.is_out_of_range());
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next());
    }
}
