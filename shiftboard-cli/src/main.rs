mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod paths;
mod render;

use std::process::ExitCode;

use clap::Parser;
use shiftboard_lib::ShiftboardClient;
use shiftboard_lib::auth::Session;

use crate::cli::Cli;
use crate::commands::Context;
use crate::config::Overrides;
use crate::config::Settings;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let overrides = Overrides {
        url: cli.url,
        token: cli.token,
        page_size: cli.page_size,
    };
    let settings = Settings::load(cli.config.as_deref(), &overrides)?;
    log::debug!("[cli] using backend {}", settings.url);

    let session = match &settings.token {
        Some(token) => Session::with_token(token.as_str()),
        None => Session::new(),
    };
    let client = ShiftboardClient::builder()
        .url(settings.url.as_str())
        .session(session)
        .timeout(settings.timeout)
        .build()?;

    let ctx = Context { client, settings };
    commands::run(cli.command, &ctx).await
}
