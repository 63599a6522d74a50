//! Concurrent load generation.
//!
//! Spawns N independent virtual users against the gateway, each with its own
//! RNG and action state; the only shared state is the statistics collector.
//! A `watch` channel broadcasts the stop signal, so a run ends promptly when
//! its duration elapses or an external shutdown (Ctrl-C) arrives, without
//! losing in-flight samples.

pub mod sampler;
pub mod stats;
mod user;

pub use sampler::WeightedSampler;
pub use stats::{ActionReport, LoadReport, StatsCollector};
pub use user::Action;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::info;

use crate::client::GatewayClient;
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use user::VirtualUser;

/// Parameters of one load run.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Number of concurrent virtual users.
    pub users: u32,
    /// How long the run lasts unless shut down earlier.
    pub duration: Duration,
    /// Lower bound of the randomized think time between actions.
    pub wait_min: Duration,
    /// Upper bound of the randomized think time between actions.
    pub wait_max: Duration,
    /// Base seed for per-user RNGs; `None` seeds from the OS. With a fixed
    /// seed, user `i` always replays the same action sequence.
    pub seed: Option<u64>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            users: 10,
            duration: Duration::from_secs(60),
            wait_min: Duration::from_secs(1),
            wait_max: Duration::from_secs(3),
            seed: None,
        }
    }
}

/// Run the load generator for the configured duration.
///
/// # Errors
///
/// Returns an error only for setup problems (bad config, HTTP client build);
/// request failures during the run are recorded in the report instead.
pub async fn run(
    config: &HarnessConfig,
    options: &LoadOptions,
) -> Result<LoadReport, HarnessError> {
    run_with_shutdown(config, options, std::future::pending()).await
}

/// Run the load generator until the duration elapses or `shutdown` resolves,
/// whichever comes first.
///
/// # Errors
///
/// Returns an error only for setup problems; see [`run`].
pub async fn run_with_shutdown(
    config: &HarnessConfig,
    options: &LoadOptions,
    shutdown: impl Future<Output = ()>,
) -> Result<LoadReport, HarnessError> {
    let client = GatewayClient::new(config)?;
    let stats = Arc::new(StatsCollector::new());
    let (stop_tx, stop_rx) = watch::channel(false);

    let mut workers = JoinSet::new();
    for index in 0..options.users {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(u64::from(index))),
            None => StdRng::from_os_rng(),
        };
        let worker = VirtualUser::new(
            client.clone(),
            Arc::clone(&stats),
            stop_rx.clone(),
            rng,
            options.wait_min,
            options.wait_max,
        );
        workers.spawn(worker.run());
    }
    drop(stop_rx);

    info!(
        users = options.users,
        duration = ?options.duration,
        gateway = config.gateway_url,
        "load generation started"
    );

    tokio::select! {
        () = tokio::time::sleep(options.duration) => {}
        () = shutdown => info!("shutdown requested, stopping load run early"),
    }

    // Fails only when every worker already exited, which is fine.
    let _ = stop_tx.send(true);
    while workers.join_next().await.is_some() {}

    let report = stats.report();
    info!(
        requests = report.total_requests(),
        failures = report.total_failures(),
        "load generation finished"
    );
    Ok(report)
}
