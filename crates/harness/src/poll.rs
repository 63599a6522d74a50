//! Bounded read-after-write polling.
//!
//! The remote system offers no read-after-write guarantee across service
//! boundaries. Instead of a blind fixed delay, dependent flow steps poll the
//! read with exponential backoff until the expected state is observed or a
//! deadline passes, which then fails with a distinct
//! [`HarnessError::ConsistencyTimeout`].

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::error::HarnessError;

/// First pause between probe attempts.
pub const INITIAL_BACKOFF: Duration = Duration::from_millis(100);

/// Backoff ceiling; pauses double up to this value.
pub const MAX_BACKOFF: Duration = Duration::from_secs(2);

/// Repeatedly run `probe` until it observes the expected state.
///
/// The probe returns `Ok(Some(value))` when the state is observed,
/// `Ok(None)` to keep waiting (e.g. a read that still returns 404 or stale
/// data), and `Err` for failures that polling cannot fix.
///
/// # Errors
///
/// Returns [`HarnessError::ConsistencyTimeout`] when `deadline` elapses
/// before the state is observed, or the probe's own error verbatim.
pub async fn poll_until<T, F, Fut>(
    what: &str,
    deadline: Duration,
    mut probe: F,
) -> Result<T, HarnessError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, HarnessError>>,
{
    let started = Instant::now();
    let mut backoff = INITIAL_BACKOFF;
    let mut attempts = 0_u32;

    loop {
        attempts += 1;
        if let Some(value) = probe().await? {
            debug!(what, attempts, waited = ?started.elapsed(), "state observed");
            return Ok(value);
        }

        if started.elapsed() + backoff > deadline {
            return Err(HarnessError::ConsistencyTimeout {
                what: what.to_string(),
                waited: started.elapsed(),
            });
        }

        debug!(what, attempts, next_backoff = ?backoff, "state not yet observed");
        sleep(backoff).await;
        backoff = (backoff * 2).min(MAX_BACKOFF);
    }
}
