//! `shiftboard dashboard`, `health` and `whoami`

use shiftboard_lib::api::DashboardStats;

use super::Context;
use crate::error::CliError;

pub async fn dashboard(ctx: &Context) -> Result<(), CliError> {
    let stats = ctx.client.dashboard().await?;
    print!("{}", format_stats(&stats));
    Ok(())
}

pub async fn health(ctx: &Context) -> Result<(), CliError> {
    let status = ctx.client.health().await?;
    if status.is_healthy() {
        println!("{} is healthy", ctx.client.base_url());
        Ok(())
    } else {
        Err(CliError::usage(format!(
            "{} reported status '{}'",
            ctx.client.base_url(),
            status.status
        )))
    }
}

pub async fn whoami(ctx: &Context) -> Result<(), CliError> {
    let user = ctx.client.current_user().await?;
    if user.name.is_empty() {
        println!("{} ({})", user.email, user.role);
    } else {
        println!("{} <{}> ({})", user.name, user.email, user.role);
    }
    Ok(())
}

fn format_stats(stats: &DashboardStats) -> String {
    let latest = match &stats.latest_run {
        Some(run) => format!(
            "{} {} ({})",
            run.run_id,
            run.status.label(),
            run.created_at.format("%d/%m/%Y %H:%M")
        ),
        None => "none".to_string(),
    };

    format!(
        "Employees     {} ({} active)\n\
         Shifts        {}\n\
         Solver runs   {} ({} completed, {} failed)\n\
         Success rate  {:.1}%\n\
         Latest run    {}\n",
        stats.total_employees,
        stats.active_employees,
        stats.total_shifts,
        stats.total_runs,
        stats.completed_runs,
        stats.failed_runs,
        stats.success_rate,
        latest,
    )
}
