//! View state and the events that change it.

use std::cmp::Ordering;

/// Sort direction for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Natural order (A-Z, 0-9, oldest first).
    #[default]
    Asc,
    /// Reversed order.
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Applies the direction to a natural-order comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Self::Asc
    }
}

/// Per-view interaction state.
///
/// Starts at defaults when a view is created and only changes through
/// [`ViewEvent`]s. It is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState<K> {
    /// Text typed into the search box.
    pub search_term: String,
    /// Active sort column, if any.
    pub sort_field: Option<K>,
    /// Direction of the active sort.
    pub sort_direction: SortDirection,
    /// 1-based page number.
    pub current_page: usize,
}

impl<K> Default for ViewState<K> {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort_field: None,
            sort_direction: SortDirection::Asc,
            current_page: 1,
        }
    }
}

impl<K: Copy + Eq> ViewState<K> {
    /// Applies a header click.
    ///
    /// Clicking the active column flips the direction; clicking another
    /// column makes it active, ascending. Sortability is checked by the
    /// caller.
    pub fn toggle_sort(&mut self, key: K) {
        if self.sort_field == Some(key) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = Some(key);
            self.sort_direction = SortDirection::Asc;
        }
    }
}

/// Something the user (or a data reload) did to a view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent<K, R> {
    /// New text in the search box.
    SearchChanged(String),
    /// A column header was clicked.
    SortHeaderClicked(K),
    /// A page control was clicked.
    PageChanged(usize),
    /// Fresh records arrived, e.g. after a create/update/delete round-trip.
    DataReplaced(Vec<R>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_column_twice_returns_to_ascending() {
        let mut state = ViewState::<u8>::default();
        state.toggle_sort(1);
        assert_eq!((state.sort_field, state.sort_direction), (Some(1), SortDirection::Asc));
        state.toggle_sort(1);
        assert_eq!(state.sort_direction, SortDirection::Desc);
        state.toggle_sort(1);
        assert_eq!((state.sort_field, state.sort_direction), (Some(1), SortDirection::Asc));
    }

    #[test]
    fn test_switching_column_resets_to_ascending() {
        let mut state = ViewState::<u8>::default();
        state.toggle_sort(1);
        state.toggle_sort(1);
        state.toggle_sort(2);
        assert_eq!((state.sort_field, state.sort_direction), (Some(2), SortDirection::Asc));
    }

    #[test]
    fn test_direction_apply() {
        assert_eq!(SortDirection::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Desc.apply(Ordering::Equal), Ordering::Equal);
    }
}
