//! Data-availability submission demo
//!
//! Submits one piece of data through a client library, waits for the
//! transaction to be included, and prints where it landed.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌────────┐    ┌───────────┐    ┌──────────────┐    ┌─────────────────────┐
//!   │  CLI   │───▶│  config   │───▶│    driver    │───▶│ client (DaClient)   │
//!   │ (clap) │    │ load/valid│    │ state machine│    │ ffi | simulated     │
//!   └────────┘    └───────────┘    └──────┬───────┘    └─────────────────────┘
//!                                         │
//!                                         ▼
//!                                  ┌──────────────┐
//!                                  │ report (hex) │───▶ stdout
//!                                  └──────────────┘
//! ```
//!
//! Logs go to stderr; stdout carries only the report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use avail_demo::config::{BackendKind, ReportStyle};
use avail_demo::driver::error::display_chain;
use avail_demo::lifecycle::{execute, prepare_config, Overrides};
use avail_demo::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "avail-demo")]
#[command(about = "Submit data to a data-availability node and print the receipt", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults reproduce the fixed demo run.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Client implementation to drive.
    #[arg(short, long, value_enum)]
    backend: Option<BackendKind>,

    /// Report layout.
    #[arg(short, long, value_enum)]
    style: Option<ReportStyle>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let overrides = Overrides {
        backend: cli.backend,
        style: cli.style,
    };

    let config = match prepare_config(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // The whole sequence blocks inside the client library; run it off the
    // runtime as a single unit.
    let outcome = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        execute(&config, &mut out)
    })
    .await;

    match outcome {
        Ok(Ok(_)) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            tracing::error!(error = %display_chain(&e), "Demo run failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "Demo task did not complete");
            ExitCode::FAILURE
        }
    }
}
