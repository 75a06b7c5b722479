//! Column descriptors and the record trait.

use std::fmt;
use std::sync::Arc;

use super::CellValue;

/// A record type the view engine can display.
///
/// `Key` names the record's fields. Every column of a view holds one key, so
/// the set of displayable, searchable and sortable fields is checked at
/// compile time instead of by string lookup.
pub trait Tabular {
    /// Typed field name.
    type Key: Copy + Eq + fmt::Debug;

    /// Returns the raw value of `key` for this record.
    fn cell(&self, key: Self::Key) -> CellValue;
}

/// Formats a cell for display.
pub type Renderer = Arc<dyn Fn(&CellValue) -> String + Send + Sync>;

/// One column of a view: which field, how it is labelled and shown.
///
/// Columns are ordered; the order is both the display order and the set of
/// fields the search filter looks at.
#[derive(Clone)]
pub struct Column<K> {
    /// Field shown in this column.
    pub key: K,
    /// Header text.
    pub label: String,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    /// Custom formatting; `None` shows the plain text value.
    pub render: Option<Renderer>,
    /// Preferred display width in characters.
    pub width: Option<u16>,
}

impl<K> Column<K> {
    /// Creates a sortable column with default rendering.
    pub fn new(key: K, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
            sortable: true,
            render: None,
            width: None,
        }
    }

    /// Marks the column as not sortable.
    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Sets a custom renderer.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellValue) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Sets the preferred display width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Formats `value` for display.
    ///
    /// Without a renderer, empty values are shown as `-`.
    pub fn display(&self, value: &CellValue) -> String {
        match &self.render {
            Some(render) => render(value),
            None if value.is_empty() => "-".to_string(),
            None => value.to_search_text(),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Column<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .field("width", &self.width)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_display() {
        let column = Column::new((), "Phone");
        assert_eq!(column.display(&CellValue::Null), "-");
        assert_eq!(column.display(&CellValue::from("")), "-");
        assert_eq!(column.display(&CellValue::from("555")), "555");
        // Zero and false are values, not blanks.
        assert_eq!(column.display(&CellValue::from(0)), "0");
        assert_eq!(column.display(&CellValue::from(false)), "false");
    }

    #[test]
    fn test_custom_renderer() {
        let column = Column::new((), "Rate").render(|v| match v {
            CellValue::Float(f) => format!("${f:.2}"),
            other => other.to_search_text(),
        });
        assert_eq!(column.display(&CellValue::Float(12.5)), "$12.50");
    }
}
