//! `shiftboard report RUN_ID`

use std::path::PathBuf;

use shiftboard_lib::export;
use shiftboard_lib::model::AssignmentColumn;
use shiftboard_lib::model::Report;
use shiftboard_lib::view::DataView;

use super::Context;
use super::write_file;
use super::write_xlsx;
use crate::cli::ReportArgs;
use crate::error::CliError;
use crate::render;

pub async fn run(args: ReportArgs, ctx: &Context) -> Result<(), CliError> {
    let report = ctx.client.report(&args.run_id).await?;
    print!("{}", summary(&report));
    print!("{}", distribution("Assignments per employee", &report.by_employee()));
    print!("{}", distribution("Assignments per shift", &report.by_shift()));

    let view = DataView::with_records(
        AssignmentColumn::defaults(),
        report.assignments.clone(),
        ctx.settings.page_size,
    );
    print!("{}", render::all_pages(&view));

    if let Some(path) = &args.csv {
        let path = path
            .clone()
            .unwrap_or_else(|| PathBuf::from(export::default_filename(&args.run_id)));
        write_file(&path, &export::to_csv(&view))?;
        println!("Wrote {} assignments to {}", report.assignments.len(), path.display());
    }

    if let Some(path) = args.xlsx.clone() {
        write_xlsx(&view, path, &args.run_id)?;
    }

    if let Some(path) = &args.html {
        let html = if args.server_html {
            ctx.client.print_view(&args.run_id).await?.html
        } else {
            export::report_html(&report)
        };
        write_file(path, &html)?;
        println!("Wrote printable report to {}", path.display());
    }
    Ok(())
}

fn summary(report: &Report) -> String {
    let run = &report.solver_run;
    let metrics = &report.metrics;
    let solve_time = metrics
        .solve_time
        .or(run.solve_time)
        .map(|t| format!("{t:.2}s"))
        .unwrap_or_else(|| "N/A".to_string());
    let objective = metrics
        .objective_value
        .or(run.objective_value)
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "Run          {}\nStatus       {}\nCreated      {}\nAssignments  {}\nSolve time   {}\nObjective    {}\nCoverage     {:.1}%\n\n",
        run.run_id,
        run.status.label(),
        run.created_at.format("%d/%m/%Y %H:%M"),
        metrics.total_assignments,
        solve_time,
        objective,
        metrics.coverage_percentage,
    )
}

/// A titled two-column list of labels and counts, labels padded to align.
fn distribution(title: &str, counts: &[(String, usize)]) -> String {
    let mut out = format!("{title}\n");
    if counts.is_empty() {
        out.push_str("  none\n");
    }
    let width = counts.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    for (label, count) in counts {
        out.push_str(&format!("  {label:<width$}  {count}\n"));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_aligns_counts() {
        let counts = vec![("Ana".to_string(), 3), ("Bernardo".to_string(), 1)];
        assert_eq!(
            distribution("Assignments per employee", &counts),
            "Assignments per employee\n  Ana       3\n  Bernardo  1\n\n"
        );
        assert_eq!(distribution("Assignments per shift", &[]), "Assignments per shift\n  none\n\n");
    }
}
