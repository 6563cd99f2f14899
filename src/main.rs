use anyhow::{Context, Result};
use clap::Parser;
use resume_analyzer::cli::{handle_command, Cli};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("{}", failure_line(&e));
        std::process::exit(1);
    }

    // stderr already gets the failure line; only the log file needs the event
    let logging_to_file = cli.log_file.is_some();

    if let Err(e) = handle_command(cli).await {
        if logging_to_file {
            tracing::error!("Command failed: {:#}", e);
        }
        eprintln!("{}", failure_line(&e));
        std::process::exit(1);
    }
}

fn failure_line(e: &anyhow::Error) -> String {
    format!("❌ {:#}", e)
}

fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;

            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(Mutex::new(file))
                        .with_current_span(false)
                        .with_span_list(false),
                )
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    }

    Ok(())
}
