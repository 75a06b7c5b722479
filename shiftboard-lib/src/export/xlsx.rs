//! Excel export
//!
//! One worksheet with a bold header row of column labels and one row per
//! exported record. Like the CSV export it honors search and sort and
//! ignores pagination.

use rust_xlsxwriter::Format;
use rust_xlsxwriter::Workbook;

use crate::error::Error;
use crate::view::CellValue;
use crate::view::Column;
use crate::view::DataView;
use crate::view::Tabular;

/// Sheet name used for assignment exports.
pub const ASSIGNMENTS_SHEET: &str = "Assignments";

/// What lands in one spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SheetCell {
    Blank,
    Number(f64),
    Boolean(bool),
    Text(String),
}

impl SheetCell {
    /// Columns with a renderer are written as their rendered text; plain
    /// numbers and booleans keep their type so the sheet can compute on them.
    pub(crate) fn for_column<K>(column: &Column<K>, value: &CellValue) -> Self {
        if column.render.is_some() {
            return Self::Text(column.display(value));
        }
        match value {
            CellValue::Null => Self::Blank,
            CellValue::Int(n) => Self::Number(*n as f64),
            CellValue::Float(f) if f.is_finite() => Self::Number(*f),
            CellValue::Bool(b) => Self::Boolean(*b),
            other if other.is_empty() => Self::Blank,
            other => Self::Text(other.to_search_text()),
        }
    }
}

/// Renders the export rows of `view` as an `.xlsx` file.
pub fn to_xlsx<R: Tabular>(view: &DataView<R>, sheet_name: &str) -> Result<Vec<u8>, Error> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (col, column) in (0u16..).zip(view.columns()) {
        sheet.write_string_with_format(0, col, &column.label, &header)?;
    }

    for (row, record) in (1u32..).zip(view.export_rows()) {
        for (col, column) in (0u16..).zip(view.columns()) {
            match SheetCell::for_column(column, &record.cell(column.key)) {
                SheetCell::Blank => {}
                SheetCell::Number(n) => {
                    sheet.write_number(row, col, n)?;
                }
                SheetCell::Boolean(b) => {
                    sheet.write_boolean(row, col, b)?;
                }
                SheetCell::Text(text) => {
                    sheet.write_string(row, col, &text)?;
                }
            }
        }
    }

    sheet.autofit();
    Ok(workbook.save_to_buffer()?)
}

/// File name used when exporting the assignments of a run to Excel.
pub fn xlsx_filename(run_id: &str) -> String {
    format!("assignments_{}.xlsx", super::csv::safe_file_stem(run_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Key {
        Name,
        Hours,
        Lead,
    }

    struct Row {
        name: &'static str,
        hours: Option<f64>,
        lead: bool,
    }

    impl Tabular for Row {
        type Key = Key;

        fn cell(&self, key: Key) -> CellValue {
            match key {
                Key::Name => self.name.into(),
                Key::Hours => self.hours.into(),
                Key::Lead => self.lead.into(),
            }
        }
    }

    fn columns() -> Vec<Column<Key>> {
        vec![
            Column::new(Key::Name, "Name"),
            Column::new(Key::Hours, "Hours"),
            Column::new(Key::Lead, "Lead"),
        ]
    }

    #[test]
    fn test_cells_keep_their_type() {
        let plain = Column::new((), "Plain");
        assert_eq!(SheetCell::for_column(&plain, &CellValue::from(40)), SheetCell::Number(40.0));
        assert_eq!(SheetCell::for_column(&plain, &CellValue::from(false)), SheetCell::Boolean(false));
        assert_eq!(SheetCell::for_column(&plain, &CellValue::Null), SheetCell::Blank);
        assert_eq!(SheetCell::for_column(&plain, &CellValue::from("")), SheetCell::Blank);
        assert_eq!(
            SheetCell::for_column(&plain, &CellValue::Float(f64::NAN)),
            SheetCell::Text("NaN".to_string())
        );

        let rendered = Column::new((), "Rendered").render(|v| format!("x{}", v.to_search_text()));
        assert_eq!(
            SheetCell::for_column(&rendered, &CellValue::from(2)),
            SheetCell::Text("x2".to_string())
        );
    }

    #[test]
    fn test_workbook_is_a_zip_archive() {
        let rows = vec![
            Row { name: "Ana", hours: Some(38.5), lead: true },
            Row { name: "Bob", hours: None, lead: false },
        ];
        let mut view = DataView::with_records(columns(), rows, 1);
        view.set_page(5);

        let bytes = to_xlsx(&view, ASSIGNMENTS_SHEET).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_invalid_sheet_name_is_an_error() {
        let view = DataView::with_records(columns(), Vec::<Row>::new(), 10);
        assert!(matches!(to_xlsx(&view, "bad/name"), Err(Error::Spreadsheet(_))));
    }

    #[test]
    fn test_xlsx_filename() {
        assert_eq!(xlsx_filename("run 7/b"), "assignments_run_7_b.xlsx");
    }
}
