//! Subcommand handlers

mod employees;
mod report;
mod runs;
mod shifts;
mod status;

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use shiftboard_lib::ShiftboardClient;
use shiftboard_lib::export;
use shiftboard_lib::model::UnknownColumn;
use shiftboard_lib::view::Column;
use shiftboard_lib::view::DataView;
use shiftboard_lib::view::SortDirection;
use shiftboard_lib::view::Tabular;

use crate::cli::Command;
use crate::cli::ViewArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::render;

/// How many records list commands fetch; paging happens locally.
const FETCH_LIMIT: u32 = 1000;

/// Everything a handler needs.
pub struct Context {
    pub client: ShiftboardClient,
    pub settings: Settings,
}

pub async fn run(command: Command, ctx: &Context) -> Result<(), CliError> {
    match command {
        Command::Employees(cmd) => employees::run(cmd, ctx).await,
        Command::Shifts(cmd) => shifts::run(cmd, ctx).await,
        Command::Solve(args) => runs::solve(args, ctx).await,
        Command::Runs(cmd) => runs::run(cmd, ctx).await,
        Command::Report(args) => report::run(args, ctx).await,
        Command::Dashboard => status::dashboard(ctx).await,
        Command::Health => status::health(ctx).await,
        Command::Whoami => status::whoami(ctx).await,
    }
}

/// Builds a view over `records` with the search, sort and page from `args`.
pub(crate) fn build_view<R>(
    records: Vec<R>,
    columns: Vec<Column<R::Key>>,
    args: &ViewArgs,
    page_size: usize,
) -> Result<DataView<R>, CliError>
where
    R: Tabular,
    R::Key: FromStr<Err = UnknownColumn>,
{
    let mut view = DataView::with_records(columns, records, page_size);

    if let Some(term) = &args.search {
        view.set_search(term.as_str());
    }

    if let Some(name) = &args.sort {
        let key: R::Key = name.parse()?;
        let direction = if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        if !view.set_sort(key, direction) {
            return Err(CliError::usage(format!("column '{name}' is not shown or cannot be sorted")));
        }
    }

    view.set_page(args.page);
    Ok(view)
}

/// Prints the view and writes the CSV export if asked for.
pub(crate) fn show_view<R: Tabular>(view: &DataView<R>, args: &ViewArgs, csv_name: &str) -> Result<(), CliError> {
    if args.all_pages {
        print!("{}", render::all_pages(view));
    } else {
        print!("{}", render::page(view));
    }

    if let Some(path) = &args.csv {
        let path = path.clone().unwrap_or_else(|| PathBuf::from(csv_name));
        write_file(&path, &export::to_csv(view))?;
        println!("Wrote {} rows to {}", view.export_rows().len(), path.display());
    }
    Ok(())
}

/// Writes the export rows of an assignment view as an Excel sheet.
///
/// Without a path the file is named after the run.
pub(crate) fn write_xlsx<R: Tabular>(view: &DataView<R>, path: Option<PathBuf>, run_id: &str) -> Result<(), CliError> {
    let path = path.unwrap_or_else(|| PathBuf::from(export::xlsx_filename(run_id)));
    let bytes = export::to_xlsx(view, export::ASSIGNMENTS_SHEET)?;
    write_file(&path, bytes)?;
    println!("Wrote {} rows to {}", view.export_rows().len(), path.display());
    Ok(())
}

pub(crate) fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<(), CliError> {
    fs::write(path, content).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {}", path.display());
    Ok(())
}
