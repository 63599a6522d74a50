//! `gateprobe load` - Generate sustained load.
//!
//! Runs for the requested duration; Ctrl-C stops the virtual users early and
//! still prints the collected report.

use gateprobe_harness::HarnessConfig;
use gateprobe_harness::load::{self, LoadOptions};
use tracing::info;

/// Run the load generator and enforce the failure-rate threshold.
///
/// # Errors
///
/// Returns an error on setup failure or when the observed failure rate
/// exceeds `max_failure_rate` (percent).
#[allow(clippy::print_stdout)] // the report table is the command's output
pub async fn run(
    config: &HarnessConfig,
    options: LoadOptions,
    max_failure_rate: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = load::run_with_shutdown(config, &options, async {
        // Failing to install the handler would end the run immediately;
        // treat it as "no Ctrl-C support" and wait forever instead.
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    })
    .await?;

    println!("{report}");

    let failure_rate = report.failure_rate();
    if failure_rate > max_failure_rate {
        return Err(format!(
            "failure rate {failure_rate:.2}% exceeds threshold {max_failure_rate:.2}%"
        )
        .into());
    }

    info!(failure_rate, max_failure_rate, "load run within threshold");
    Ok(())
}
