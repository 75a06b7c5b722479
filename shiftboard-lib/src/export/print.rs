//! Printable HTML report

use std::fmt::Write;

use crate::model::AssignmentColumn;
use crate::model::Report;
use crate::view::Tabular;

/// Escapes text for HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; color: #222; }
.header { text-align: center; margin-bottom: 30px; }
.metrics { display: flex; justify-content: space-around; margin-bottom: 30px; }
.metric { text-align: center; padding: 10px; border: 1px solid #ddd; border-radius: 5px; }
table { width: 100%; border-collapse: collapse; margin-top: 20px; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; }
.footer { margin-top: 30px; text-align: center; font-size: 12px; color: #666; }
@media print { body { margin: 0; } }
";

/// Renders a self-contained printable page for a run report.
///
/// Shows the run id and creation date, metric cards, and an assignments
/// table. Missing employee or shift names read `N/A`.
pub fn report_html(report: &Report) -> String {
    let run = &report.solver_run;
    let metrics = &report.metrics;
    let solve_time = metrics
        .solve_time
        .or(run.solve_time)
        .map(|t| format!("{t:.2}s"))
        .unwrap_or_else(|| "N/A".to_string());
    let status = if metrics.status.is_empty() {
        run.status.label().to_string()
    } else {
        metrics.status.clone()
    };

    let mut html = String::new();
    let _ = writeln!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Schedule report {id}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n\
         <div class=\"header\">\n<h1>Schedule report</h1>\n\
         <p>Run: {id}</p>\n<p>Created: {created}</p>\n</div>",
        id = escape_html(&run.run_id),
        created = run.created_at.format("%d/%m/%Y %H:%M"),
    );

    html.push_str("<div class=\"metrics\">\n");
    for (label, value) in [
        ("Status", status),
        ("Total assignments", metrics.total_assignments.to_string()),
        ("Solve time", solve_time),
        ("Coverage", format!("{:.1}%", metrics.coverage_percentage)),
    ] {
        let _ = writeln!(
            html,
            "<div class=\"metric\"><h3>{}</h3><p>{}</p></div>",
            label,
            escape_html(&value)
        );
    }
    html.push_str("</div>\n");

    let columns = AssignmentColumn::defaults();
    html.push_str("<table>\n<thead>\n<tr>");
    for column in &columns {
        let _ = write!(html, "<th>{}</th>", escape_html(&column.label));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for assignment in &report.assignments {
        html.push_str("<tr>");
        for column in &columns {
            let text = column.display(&assignment.cell(column.key));
            let _ = write!(html, "<td>{}</td>", escape_html(&text));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");

    let _ = writeln!(
        html,
        "<div class=\"footer\">\n<p>{} assignments</p>\n</div>\n</body>\n</html>",
        report.assignments.len()
    );
    html
}
