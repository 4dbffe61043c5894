//! lock-deploy
//!
//! Deploys the `Lock` contract with a value attached and an unlock time one
//! minute in the future, then prints where it landed.
//!
//! # Architecture Overview
//!
//! ```text
//!   flags + lock-deploy.toml
//!            │
//!            ▼
//!   ┌──────────────┐   ┌───────────────┐   ┌──────────────┐
//!   │    config    │──▶│ observability │──▶│  lifecycle   │
//!   │ load/validate│   │ tracing init  │   │   startup    │
//!   └──────────────┘   └───────────────┘   └──────┬───────┘
//!                                                 │
//!            ┌────────────────────┬───────────────┼──────────────────┐
//!            ▼                    ▼               ▼                  ▼
//!   ┌──────────────┐   ┌────────────────┐  ┌────────────┐   ┌──────────────┐
//!   │    wallet    │   │   artifacts    │  │    lock    │──▶│   deployer   │──▶ JSON-RPC
//!   │ env priv key │   │ Hardhat output │  │ time/value │   │ send + wait  │
//!   └──────────────┘   └────────────────┘  └────────────┘   └──────────────┘
//! ```
//!
//! Stdout carries exactly one line on success. Logs and errors go to stderr;
//! any failure exits with status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lock_deploy::config::{resolve_config, Overrides};
use lock_deploy::lifecycle;
use lock_deploy::observability::init_logging;
use lock_deploy::DeployError;

#[derive(Debug, Parser)]
#[command(name = "lock-deploy")]
#[command(about = "Deploy the Lock contract with a timed value lock", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./lock-deploy.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Network to deploy to, as named under [networks].
    #[arg(short, long)]
    network: Option<String>,

    /// Override the selected network's JSON-RPC endpoint.
    #[arg(long)]
    rpc_url: Option<String>,

    /// Hardhat artifacts directory.
    #[arg(long)]
    artifacts: Option<String>,

    /// Print debug logs.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version land here too and are not failures.
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %err, "Deployment failed");
            eprintln!("Error: {}", err);
            err.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), DeployError> {
    let mut config = resolve_config(cli.config.as_deref())?;
    Overrides {
        network: cli.network,
        rpc_url: cli.rpc_url,
        artifacts_dir: cli.artifacts,
    }
    .apply(&mut config)?;

    init_logging(&config.observability.log_level, cli.verbose);
    tracing::debug!(network = %config.network, contract = %config.lock.contract, "Configuration loaded");

    let mut stdout = std::io::stdout().lock();
    lifecycle::run(&config, &mut stdout).await?;
    Ok(())
}
