//! Client-side tabular data view engine.
//!
//! Turns a record collection, an ordered set of column descriptors and a
//! [`ViewState`] into the rows to display: search filter, then sort, then
//! paginate. The engine never mutates the source records and never fails;
//! bad inputs (an out-of-range page, a sort key that is not a column)
//! produce an empty page or an unsorted result.
//!
//! Records opt in by implementing [`Tabular`], which maps a typed column key
//! to a [`CellValue`]. Column keys are plain enums, so a column can only ever
//! name a field the record type actually has.
//!
//! # Example
//!
//! ```
//! use shiftboard_lib::view::{CellValue, Column, DataView, Tabular};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Key { Name, Rate }
//!
//! struct Row { name: &'static str, rate: i64 }
//!
//! impl Tabular for Row {
//!     type Key = Key;
//!     fn cell(&self, key: Key) -> CellValue {
//!         match key {
//!             Key::Name => self.name.into(),
//!             Key::Rate => self.rate.into(),
//!         }
//!     }
//! }
//!
//! let mut view = DataView::new(
//!     vec![Column::new(Key::Name, "Name"), Column::new(Key::Rate, "Rate")],
//!     10,
//! );
//! view.replace_data(vec![Row { name: "Ana", rate: 10 }, Row { name: "Bob", rate: 5 }]);
//! view.click_header(Key::Rate);
//!
//! let names: Vec<_> = view.page_rows().iter().map(|r| r.name).collect();
//! assert_eq!(names, ["Bob", "Ana"]);
//! ```

mod column;
mod data_view;
pub mod engine;
mod state;
mod value;

pub use column::Column;
pub use column::Renderer;
pub use column::Tabular;
pub use data_view::DataView;
pub use data_view::PageInfo;
pub use engine::filter;
pub use engine::paginate;
pub use engine::sort;
pub use state::SortDirection;
pub use state::ViewEvent;
pub use state::ViewState;
pub use value::CellValue;
