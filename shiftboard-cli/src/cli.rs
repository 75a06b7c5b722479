//! Command-line arguments

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use shiftboard_lib::model::WEEKDAYS;

#[derive(Debug, Parser)]
#[command(name = "shiftboard")]
#[command(version, about = "Manage employees, shifts and schedule optimization runs", long_about = None)]
pub struct Cli {
    /// Backend URL [env: SHIFTBOARD_URL]
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Bearer token [env: SHIFTBOARD_TOKEN]
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Config file (default: config.toml in the config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Rows per page in tables [env: SHIFTBOARD_PAGE_SIZE]
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage employees
    #[command(subcommand)]
    Employees(EmployeesCommand),
    /// Manage shifts
    #[command(subcommand)]
    Shifts(ShiftsCommand),
    /// Start an optimization run
    Solve(SolveArgs),
    /// Inspect optimization runs
    #[command(subcommand)]
    Runs(RunsCommand),
    /// Show or export the report of a run
    Report(ReportArgs),
    /// Show headline numbers
    Dashboard,
    /// Check that the backend is reachable
    Health,
    /// Show the signed-in user
    Whoami,
}

/// Search, sort and paging for list output.
#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Only rows where some column contains this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Column to sort by (e.g. name, hourly-rate)
    #[arg(long, value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Print every page instead of one
    #[arg(long, conflicts_with = "page")]
    pub all_pages: bool,

    /// Also write the matching rows (all pages) as CSV
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub csv: Option<Option<PathBuf>>,
}

// =============================================================================
// Employees
// =============================================================================

/// Which records a list asks the backend for.
///
/// With neither flag the backend default applies (active records only).
#[derive(Debug, Default, Args)]
pub struct ActiveArgs {
    /// Ask for active records only
    #[arg(long, conflicts_with = "include_inactive")]
    pub active_only: bool,
    /// Include inactive records
    #[arg(long)]
    pub include_inactive: bool,
}

impl ActiveArgs {
    /// The `active_only` query value, `None` to leave it to the backend.
    pub fn filter(&self) -> Option<bool> {
        if self.active_only {
            Some(true)
        } else if self.include_inactive {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum EmployeesCommand {
    /// List employees
    List {
        #[command(flatten)]
        view: ViewArgs,
        #[command(flatten)]
        active: ActiveArgs,
    },
    /// Show one employee
    Show { id: i64 },
    /// Create an employee
    Create(EmployeeFields),
    /// Update an employee; only the given fields change
    Update {
        id: i64,
        #[command(flatten)]
        fields: EmployeeUpdateFields,
    },
    /// Delete an employee
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct EmployeeFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    /// Comma-separated skills
    #[arg(long, default_value = "")]
    pub skills: String,
    /// Hourly rate
    #[arg(long, default_value_t = 0.0)]
    pub rate: f64,
}

#[derive(Debug, Args)]
pub struct EmployeeUpdateFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    /// Comma-separated skills, replacing the current ones
    #[arg(long)]
    pub skills: Option<String>,
    #[arg(long)]
    pub rate: Option<f64>,
    /// true or false
    #[arg(long)]
    pub active: Option<bool>,
}

// =============================================================================
// Shifts
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum ShiftsCommand {
    /// List shifts
    List {
        #[command(flatten)]
        view: ViewArgs,
        #[command(flatten)]
        active: ActiveArgs,
    },
    /// Show one shift
    Show { id: i64 },
    /// Create a shift
    Create(ShiftFields),
    /// Update a shift; only the given fields change
    Update {
        id: i64,
        #[command(flatten)]
        fields: ShiftUpdateFields,
    },
    /// Delete a shift
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct ShiftFields {
    #[arg(long)]
    pub name: String,
    /// Day of week: 0-6 (0 = Monday) or a day name
    #[arg(long, value_parser = parse_day)]
    pub day: u8,
    /// Start time, HH:MM
    #[arg(long)]
    pub start: String,
    /// End time, HH:MM
    #[arg(long)]
    pub end: String,
    /// Comma-separated required skills
    #[arg(long, default_value = "")]
    pub skills: String,
    #[arg(long, default_value_t = 1)]
    pub min: u32,
    #[arg(long, default_value_t = 1)]
    pub max: u32,
    #[arg(long, default_value_t = 1.0)]
    pub cost: f64,
}

#[derive(Debug, Args)]
pub struct ShiftUpdateFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, value_parser = parse_day)]
    pub day: Option<u8>,
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub skills: Option<String>,
    #[arg(long)]
    pub min: Option<u32>,
    #[arg(long)]
    pub max: Option<u32>,
    #[arg(long)]
    pub cost: Option<f64>,
    /// true or false
    #[arg(long)]
    pub active: Option<bool>,
}

// =============================================================================
// Solver, runs and reports
// =============================================================================

#[derive(Debug, Args)]
pub struct SolveArgs {
    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub start: NaiveDate,
    /// Last day, YYYY-MM-DD (default: six days after the start)
    #[arg(long)]
    pub end: Option<NaiveDate>,
    /// Solver time limit in seconds
    #[arg(long, default_value_t = 60)]
    pub max_time: u32,
    /// Minimum coverage in percent
    #[arg(long, default_value_t = 80)]
    pub min_coverage: u32,
    #[arg(long, default_value_t = 6)]
    pub max_consecutive_days: u32,
    #[arg(long, default_value_t = 12)]
    pub min_rest_hours: u32,
    #[arg(long, default_value_t = 40)]
    pub max_hours: u32,
    /// Ignore employee preferences
    #[arg(long)]
    pub ignore_preferences: bool,
    /// Do not minimize cost
    #[arg(long)]
    pub ignore_cost: bool,
    /// Wait for the run to finish
    #[arg(long)]
    pub wait: bool,
}

#[derive(Debug, Subcommand)]
pub enum RunsCommand {
    /// List runs
    List {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show one run
    Show { run_id: String },
    /// List the assignments of a run
    Assignments {
        run_id: String,
        #[command(flatten)]
        view: ViewArgs,
        /// Also write an Excel sheet (default name: assignments_<run_id>.xlsx)
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        xlsx: Option<Option<PathBuf>>,
    },
    /// Show the error log of a run
    Errors { run_id: String },
    /// Wait for a run to finish
    Watch {
        run_id: String,
        /// Seconds between polls
        #[arg(long, default_value_t = 2)]
        interval: u64,
        /// Give up after this many seconds
        #[arg(long, default_value_t = 300)]
        timeout: u64,
    },
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    pub run_id: String,
    /// Write the assignments as CSV (default name: assignments_<run_id>.csv)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub csv: Option<Option<PathBuf>>,
    /// Write the assignments as an Excel sheet (default name: assignments_<run_id>.xlsx)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub xlsx: Option<Option<PathBuf>>,
    /// Write a printable HTML page
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,
    /// Use the page rendered by the backend for --html
    #[arg(long, requires = "html")]
    pub server_html: bool,
}

/// Parses a day of week given as 0-6 or as a (prefix of a) day name.
pub fn parse_day(value: &str) -> Result<u8, String> {
    let value = value.trim();
    if let Ok(n) = value.parse::<u8>() {
        return if n <= 6 {
            Ok(n)
        } else {
            Err(format!("day must be 0-6, got {n}"))
        };
    }

    let lower = value.to_ascii_lowercase();
    if lower.len() >= 2 {
        if let Some(i) = WEEKDAYS
            .iter()
            .position(|d| d.to_ascii_lowercase().starts_with(&lower))
        {
            return u8::try_from(i).map_err(|e| e.to_string());
        }
    }
    Err(format!("unknown day '{value}', expected 0-6 or a day name"))
}
