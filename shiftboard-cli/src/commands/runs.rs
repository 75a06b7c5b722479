//! `shiftboard solve` and `shiftboard runs ...`

use std::time::Duration;

use shiftboard_lib::api::DEFAULT_POLL_INTERVAL;
use shiftboard_lib::api::ListParams;
use shiftboard_lib::export;
use shiftboard_lib::form::SolverConstraints;
use shiftboard_lib::model::AssignmentColumn;
use shiftboard_lib::model::RunStatus;
use shiftboard_lib::model::SolverRun;
use shiftboard_lib::model::SolverRunColumn;
use shiftboard_lib::view::Column;

use super::Context;
use super::FETCH_LIMIT;
use super::build_view;
use super::show_view;
use super::write_xlsx;
use crate::cli::RunsCommand;
use crate::cli::SolveArgs;
use crate::error::CliError;
use crate::render;

pub async fn solve(args: SolveArgs, ctx: &Context) -> Result<(), CliError> {
    let constraints = constraints(&args);
    println!(
        "Solving {} to {} ({} days)",
        constraints.start_date,
        constraints.end_date,
        constraints.days()
    );

    let run = ctx.client.solve(&constraints).await?;
    println!("Started run {} ({})", run.run_id, run.status.label());

    if args.wait && !run.status.is_terminal() {
        // Allow the solver its full time budget plus queueing.
        let timeout = Duration::from_secs(u64::from(args.max_time) + 120);
        let run = watch(ctx, &run.run_id, DEFAULT_POLL_INTERVAL, timeout).await?;
        print_outcome(&run);
    }
    Ok(())
}

pub async fn run(command: RunsCommand, ctx: &Context) -> Result<(), CliError> {
    match command {
        RunsCommand::List { view } => {
            let runs = ctx.client.list_runs(ListParams::new().limit(FETCH_LIMIT)).await?;
            let table = build_view(runs, SolverRunColumn::defaults(), &view, ctx.settings.page_size)?;
            show_view(&table, &view, "runs.csv")
        }
        RunsCommand::Show { run_id } => {
            let run = ctx.client.get_run(&run_id).await?;
            print!("{}", render::details(&detail_columns(), &run));
            Ok(())
        }
        RunsCommand::Assignments { run_id, view, xlsx } => {
            let assignments = ctx.client.run_assignments(&run_id).await?;
            let table = build_view(assignments, AssignmentColumn::defaults(), &view, ctx.settings.page_size)?;
            show_view(&table, &view, &export::default_filename(&run_id))?;
            if let Some(path) = xlsx {
                write_xlsx(&table, path, &run_id)?;
            }
            Ok(())
        }
        RunsCommand::Errors { run_id } => {
            let log = ctx.client.run_errors(&run_id).await?;
            if log.errors.is_empty() {
                println!("No errors recorded for run {run_id}");
            }
            for error in &log.errors {
                match &error.created_at {
                    Some(at) => println!("[{at}] {}", error.message),
                    None => println!("{}", error.message),
                }
            }
            Ok(())
        }
        RunsCommand::Watch {
            run_id,
            interval,
            timeout,
        } => {
            let run = watch(ctx, &run_id, Duration::from_secs(interval), Duration::from_secs(timeout)).await?;
            print_outcome(&run);
            Ok(())
        }
    }
}

async fn watch(ctx: &Context, run_id: &str, interval: Duration, timeout: Duration) -> Result<SolverRun, CliError> {
    let run = ctx
        .client
        .watch_run(run_id)
        .interval(interval)
        .timeout(timeout)
        .on_status(|run| println!("  {}", run.status.label()))
        .wait()
        .await?;
    Ok(run)
}

fn print_outcome(run: &SolverRun) {
    match run.status {
        RunStatus::Completed => println!(
            "Run {} completed with {} assignments",
            run.run_id, run.assignments_count
        ),
        RunStatus::Failed => println!(
            "Run {} failed, see `shiftboard runs errors {}`",
            run.run_id, run.run_id
        ),
        _ => println!("Run {} is {}", run.run_id, run.status.label()),
    }
}

fn detail_columns() -> Vec<Column<SolverRunColumn>> {
    let mut columns = vec![
        Column::new(SolverRunColumn::RunId, "Run id"),
        Column::new(SolverRunColumn::ObjectiveValue, "Objective"),
    ];
    columns.extend(
        SolverRunColumn::defaults()
            .into_iter()
            .filter(|c| c.key != SolverRunColumn::RunId),
    );
    columns
}

fn constraints(args: &SolveArgs) -> SolverConstraints {
    let mut constraints = match args.end {
        Some(end) => SolverConstraints::new(args.start, end),
        None => SolverConstraints::for_week(args.start),
    };
    constraints.max_time_seconds = args.max_time;
    constraints.min_coverage = args.min_coverage;
    constraints.max_consecutive_days = args.max_consecutive_days;
    constraints.min_rest_hours = args.min_rest_hours;
    constraints.max_hours_per_employee = args.max_hours;
    constraints.prefer_employee_preferences = !args.ignore_preferences;
    constraints.minimize_cost = !args.ignore_cost;
    constraints
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;
    use crate::cli::Command;

    #[test]
    fn test_constraints_from_flags() {
        let cli = Cli::try_parse_from([
            "shiftboard", "solve", "--start", "2024-06-03", "--min-coverage", "90", "--ignore-cost",
        ])
        .unwrap();
        let Command::Solve(args) = cli.command else {
            panic!("expected solve");
        };
        let constraints = constraints(&args);
        assert_eq!(constraints.days(), 7);
        assert_eq!(constraints.min_coverage, 90);
        assert!(!constraints.minimize_cost);
        assert!(constraints.prefer_employee_preferences);
    }
}
