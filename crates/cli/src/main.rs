//! Gateprobe CLI - Contract checks, journeys, and load generation.
//!
//! # Usage
//!
//! ```bash
//! # Run every contract check against the deployed gateway
//! gateprobe check
//!
//! # Only the product service surface
//! gateprobe check --suite products
//!
//! # Run the end-to-end journeys
//! gateprobe flow
//!
//! # 100 virtual users for five minutes, reproducible
//! gateprobe load --users 100 --duration 300 --seed 42
//! ```
//!
//! # Commands
//!
//! - `check` - Single request/response contract checks
//! - `flow` - Multi-step user journeys
//! - `load` - Sustained load with concurrent virtual users
//!
//! The target gateway comes from `API_GATEWAY_URL` (or `--gateway-url`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use gateprobe_harness::HarnessConfig;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::check::Suite;
use commands::flow::Journey;

#[derive(Parser)]
#[command(name = "gateprobe")]
#[command(version, about = "Black-box test harness for the e-commerce gateway")]
struct Cli {
    /// Gateway base URL (overrides API_GATEWAY_URL)
    #[arg(long, global = true)]
    gateway_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the contract checks
    Check {
        /// Which surface to check
        #[arg(long, value_enum, default_value = "all")]
        suite: Suite,
    },
    /// Run the end-to-end user journeys
    Flow {
        /// Which journey to run
        #[arg(long, value_enum, default_value = "all")]
        journey: Journey,
    },
    /// Generate sustained load with concurrent virtual users
    Load {
        /// Number of concurrent virtual users
        #[arg(long, default_value_t = 10)]
        users: u32,

        /// Run duration in seconds
        #[arg(long, default_value_t = 60)]
        duration: u64,

        /// Minimum think time between actions, in milliseconds
        #[arg(long, default_value_t = 1_000)]
        wait_min_ms: u64,

        /// Maximum think time between actions, in milliseconds
        #[arg(long, default_value_t = 3_000)]
        wait_max_ms: u64,

        /// Base RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Fail the run when the failure rate (percent) exceeds this
        #[arg(long, default_value_t = 5.0)]
        max_failure_rate: f64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = HarnessConfig::from_env()?;
    if let Some(url) = cli.gateway_url {
        config = HarnessConfig::new(url, config.request_timeout, config.consistency_timeout)?;
    }

    match cli.command {
        Commands::Check { suite } => commands::check::run(&config, suite).await?,
        Commands::Flow { journey } => commands::flow::run(&config, journey).await?,
        Commands::Load {
            users,
            duration,
            wait_min_ms,
            wait_max_ms,
            seed,
            max_failure_rate,
        } => {
            let options = gateprobe_harness::load::LoadOptions {
                users,
                duration: std::time::Duration::from_secs(duration),
                wait_min: std::time::Duration::from_millis(wait_min_ms),
                wait_max: std::time::Duration::from_millis(wait_max_ms),
                seed,
            };
            commands::load::run(&config, options, max_failure_rate).await?;
        }
    }
    Ok(())
}
