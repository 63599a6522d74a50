//! Concurrent statistics collection for load runs.
//!
//! Every virtual user reports into one shared [`StatsCollector`], keyed by
//! the action's stable label so `/products/42` and `/products/7` aggregate
//! under one name. Recording is a short mutex-guarded update; reporting
//! happens once, after the run.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Thread-safe per-action counters and latency samples.
#[derive(Debug)]
pub struct StatsCollector {
    started: Instant,
    actions: Mutex<HashMap<&'static str, ActionSamples>>,
}

#[derive(Debug, Default)]
struct ActionSamples {
    requests: u64,
    failures: u64,
    latencies: Vec<Duration>,
}

impl StatsCollector {
    /// Create an empty collector; the run clock starts now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            actions: Mutex::new(HashMap::new()),
        }
    }

    /// Record a successful action execution.
    pub fn record_success(&self, action: &'static str, latency: Duration) {
        self.record(action, latency, true);
    }

    /// Record a failed action execution (non-2xx or body-shape mismatch).
    pub fn record_failure(&self, action: &'static str, latency: Duration) {
        self.record(action, latency, false);
    }

    fn record(&self, action: &'static str, latency: Duration, success: bool) {
        let mut actions = self
            .actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let samples = actions.entry(action).or_default();
        samples.requests += 1;
        if !success {
            samples.failures += 1;
        }
        samples.latencies.push(latency);
    }

    /// Aggregate everything recorded so far into a report.
    #[must_use]
    pub fn report(&self) -> LoadReport {
        let actions = self
            .actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut reports: Vec<ActionReport> = actions
            .iter()
            .map(|(name, samples)| ActionReport::from_samples(name, samples))
            .collect();
        reports.sort_by_key(|report| report.name);

        LoadReport {
            elapsed: self.started.elapsed(),
            actions: reports,
        }
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregated outcome of one load run.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
    /// Per-action aggregates, sorted by label.
    pub actions: Vec<ActionReport>,
}

impl LoadReport {
    /// Total requests across all actions.
    #[must_use]
    pub fn total_requests(&self) -> u64 {
        self.actions.iter().map(|action| action.requests).sum()
    }

    /// Total failures across all actions.
    #[must_use]
    pub fn total_failures(&self) -> u64 {
        self.actions.iter().map(|action| action.failures).sum()
    }

    /// Failure rate as a percentage of all requests (0 when idle).
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // request counts stay far below f64 precision
    pub fn failure_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            0.0
        } else {
            self.total_failures() as f64 / total as f64 * 100.0
        }
    }

    /// Sustained request throughput over the whole run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // request counts stay far below f64 precision
    pub fn throughput_rps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_requests() as f64 / secs
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:<28} {:>7} {:>6} {:>9} {:>9} {:>9} {:>9}",
            "action", "reqs", "fail", "min", "avg", "p95", "max"
        )?;
        for action in &self.actions {
            writeln!(
                f,
                "{:<28} {:>7} {:>6} {:>9} {:>9} {:>9} {:>9}",
                action.name,
                action.requests,
                action.failures,
                format_ms(action.min),
                format_ms(action.avg),
                format_ms(action.p95),
                format_ms(action.max),
            )?;
        }
        write!(
            f,
            "total: {} requests, {} failures ({:.2}%), {:.1} req/s over {:.1}s",
            self.total_requests(),
            self.total_failures(),
            self.failure_rate(),
            self.throughput_rps(),
            self.elapsed.as_secs_f64(),
        )
    }
}

/// Aggregates for one logical action.
#[derive(Debug, Clone)]
pub struct ActionReport {
    /// Stable action label, independent of templated path parameters.
    pub name: &'static str,
    pub requests: u64,
    pub failures: u64,
    pub min: Duration,
    pub avg: Duration,
    pub max: Duration,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

impl ActionReport {
    #[allow(clippy::cast_possible_truncation)] // request counts stay far below u32::MAX per action
    fn from_samples(name: &'static str, samples: &ActionSamples) -> Self {
        let mut sorted = samples.latencies.clone();
        sorted.sort_unstable();

        let total: Duration = sorted.iter().sum();
        let avg = if sorted.is_empty() {
            Duration::ZERO
        } else {
            total / sorted.len() as u32
        };

        Self {
            name,
            requests: samples.requests,
            failures: samples.failures,
            min: sorted.first().copied().unwrap_or_default(),
            avg,
            max: sorted.last().copied().unwrap_or_default(),
            p50: percentile(&sorted, 50.0),
            p95: percentile(&sorted, 95.0),
            p99: percentile(&sorted, 99.0),
        }
    }
}

/// Nearest-rank percentile over an ascending-sorted sample set.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn percentile(sorted: &[Duration], pct: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let rank = ((sorted.len() - 1) as f64 * pct / 100.0).round() as usize;
    let index = rank.min(sorted.len() - 1);
    sorted.get(index).copied().unwrap_or_default()
}

fn format_ms(duration: Duration) -> String {
    format!("{:.1}ms", duration.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_aggregate_per_action() {
        let stats = StatsCollector::new();
        stats.record_success("GET /products", Duration::from_millis(10));
        stats.record_success("GET /products", Duration::from_millis(20));
        stats.record_failure("GET /products", Duration::from_millis(30));
        stats.record_success("GET /health", Duration::from_millis(5));

        let report = stats.report();
        assert_eq!(report.total_requests(), 4);
        assert_eq!(report.total_failures(), 1);

        let products = report
            .actions
            .iter()
            .find(|action| action.name == "GET /products")
            .expect("products action present");
        assert_eq!(products.requests, 3);
        assert_eq!(products.failures, 1);
        assert_eq!(products.min, Duration::from_millis(10));
        assert_eq!(products.max, Duration::from_millis(30));
        assert_eq!(products.avg, Duration::from_millis(20));
    }

    #[test]
    fn test_failure_rate_percentage() {
        let stats = StatsCollector::new();
        for _ in 0..99 {
            stats.record_success("GET /health", Duration::from_millis(1));
        }
        stats.record_failure("GET /health", Duration::from_millis(1));

        let report = stats.report();
        assert!((report.failure_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_report_is_quiet() {
        let report = StatsCollector::new().report();
        assert_eq!(report.total_requests(), 0);
        assert!((report.failure_rate() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentile_bounds() {
        let sorted: Vec<Duration> = (1..=100).map(Duration::from_millis).collect();
        assert_eq!(percentile(&sorted, 0.0), Duration::from_millis(1));
        assert_eq!(percentile(&sorted, 100.0), Duration::from_millis(100));
        assert_eq!(percentile(&sorted, 50.0), Duration::from_millis(51));
        assert_eq!(percentile(&[], 95.0), Duration::ZERO);
    }

    #[test]
    fn test_report_display_lists_actions_and_totals() {
        let stats = StatsCollector::new();
        stats.record_success("GET /products", Duration::from_millis(12));
        let rendered = stats.report().to_string();
        assert!(rendered.contains("GET /products"));
        assert!(rendered.contains("total: 1 requests"));
    }

    #[test]
    fn test_actions_sorted_by_label() {
        let stats = StatsCollector::new();
        stats.record_success("GET /users", Duration::from_millis(1));
        stats.record_success("GET /health", Duration::from_millis(1));
        let report = stats.report();
        let names: Vec<&str> = report.actions.iter().map(|action| action.name).collect();
        assert_eq!(names, vec!["GET /health", "GET /users"]);
    }
}
