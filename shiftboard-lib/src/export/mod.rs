//! Exporting views and reports

pub mod csv;
pub mod print;
pub mod xlsx;

pub use csv::default_filename;
pub use csv::to_csv;
pub use csv::write_csv;
pub use print::report_html;
pub use xlsx::ASSIGNMENTS_SHEET;
pub use xlsx::to_xlsx;
pub use xlsx::xlsx_filename;
