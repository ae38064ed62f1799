#![forbid(unsafe_code)]

//! Rankgate CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use rankgate_cli::{Cli, RankgateConfig, Session, execute};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries receipts
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = RankgateConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.state, cli.work_budget)?;
    tracing::debug!(
        state = %config.state_file.display(),
        work_budget = config.revocation.work_budget.get(),
        "Resolved configuration"
    );

    let session = Session::new(config);
    let mut stdout = std::io::stdout().lock();
    let committed = execute(&session, cli.command, &mut stdout)?;

    Ok(if committed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
