// file: src/main.rs
// version: 2.1.0
// guid: h8i9j0k1-l2m3-4567-8901-234567hijklm

//! ec2cmd - Main entry point

use clap::Parser;
use colored::Colorize;
use ec2_cmd::{cli::Cli, logging::logger};
use std::process::ExitCode;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Standard exit code for Ctrl+C
const EXIT_INTERRUPTED: u8 = 130;

/// How long a cancelled invocation may take to unwind before the watcher
/// exits on its behalf.
const CANCEL_GRACE: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logger::init_logger(cli.verbose, cli.quiet, cli.log_json) {
        eprintln!("{}", e);
    }

    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, cancelling the in-flight request...");
            watcher.cancel();
            tokio::time::sleep(CANCEL_GRACE).await;
            std::process::exit(i32::from(EXIT_INTERRUPTED));
        }
    });

    match ec2_cmd::cli::run(cli, cancel).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_cancelled() => {
            eprintln!("{}", e.to_string().yellow());
            // An abandoned prompt still holds stdin on the blocking pool and
            // would stall runtime shutdown.
            std::process::exit(i32::from(EXIT_INTERRUPTED));
        }
        Err(e) => {
            debug!("Command failed: {:?}", e);
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
