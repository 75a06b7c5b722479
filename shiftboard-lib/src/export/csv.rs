//! CSV export (RFC 4180, CRLF line endings)
//!
//! Exports honor the view's search and sort but ignore pagination: every
//! matching row is written.

use std::io::Write;

use crate::error::Error;
use crate::view::Column;
use crate::view::DataView;
use crate::view::Tabular;

/// Writes a header row of column labels, then one row per record.
///
/// Cells are rendered the way the table shows them.
pub fn write_csv<R, W>(columns: &[Column<R::Key>], rows: &[&R], mut writer: W) -> Result<(), Error>
where
    R: Tabular,
    W: Write,
{
    write_record(&mut writer, columns.iter().map(|c| c.label.clone()))?;
    for row in rows {
        write_record(&mut writer, columns.iter().map(|c| c.display(&row.cell(c.key))))?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders the export rows of `view` as CSV text.
pub fn to_csv<R: Tabular>(view: &DataView<R>) -> String {
    let mut out = String::new();
    push_record(&mut out, view.columns().iter().map(|c| c.label.clone()));
    for row in view.export_rows() {
        push_record(
            &mut out,
            view.columns().iter().map(|c| c.display(&row.cell(c.key))),
        );
    }
    out
}

/// File name used when exporting the assignments of a run.
pub fn default_filename(run_id: &str) -> String {
    format!("assignments_{}.csv", safe_file_stem(run_id))
}

/// Replaces everything but ASCII letters, digits, `-` and `_` with `_`.
pub(crate) fn safe_file_stem(run_id: &str) -> String {
    run_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn write_record<W: Write>(writer: &mut W, cells: impl Iterator<Item = String>) -> Result<(), Error> {
    let mut line = String::new();
    push_record(&mut line, cells);
    writer.write_all(line.as_bytes())?;
    Ok(())
}

fn push_record(out: &mut String, cells: impl Iterator<Item = String>) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, &cell);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
