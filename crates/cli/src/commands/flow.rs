//! `gateprobe flow` - Run the end-to-end user journeys.
//!
//! Each journey is fail-fast internally; journeys are isolated from one
//! another so a failing registration still lets the favourites journey run.

use clap::ValueEnum;
use gateprobe_harness::{GatewayClient, HarnessConfig, flows};
use tracing::{error, info};

/// Which journey to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Journey {
    Registration,
    Authentication,
    Favourites,
    All,
}

impl Journey {
    const fn includes(self, other: Self) -> bool {
        matches!(self, Self::All) || self as u8 == other as u8
    }
}

/// Run the selected journeys.
///
/// # Errors
///
/// Returns an error when any journey failed.
pub async fn run(
    config: &HarnessConfig,
    journey: Journey,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = GatewayClient::new(config)?;
    let mut failed = 0_u32;
    let mut total = 0_u32;

    if journey.includes(Journey::Registration) {
        total += 1;
        if let Err(e) = flows::user_registration(&client, config).await {
            error!(journey = "registration", error = %e, "journey failed");
            failed += 1;
        }
    }
    if journey.includes(Journey::Authentication) {
        total += 1;
        if let Err(e) = flows::user_authentication(&client, config).await {
            error!(journey = "authentication", error = %e, "journey failed");
            failed += 1;
        }
    }
    if journey.includes(Journey::Favourites) {
        total += 1;
        if let Err(e) = flows::favourite_products(&client, config).await {
            error!(journey = "favourites", error = %e, "journey failed");
            failed += 1;
        }
    }

    info!(passed = total - failed, failed, total, "flow run finished");

    if failed > 0 {
        return Err(format!("{failed}/{total} journeys failed").into());
    }
    Ok(())
}
