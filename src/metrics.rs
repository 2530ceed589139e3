//! Prometheus-compatible metrics for the Tandem service core.
//!
//! This module provides observability metrics for bookings, feedback,
//! notification delivery, and dashboard aggregation using the prometheus
//! crate.

use prometheus::{self, Histogram, HistogramOpts, IntCounter, IntGauge, Registry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

/// Global metrics instance.
static METRICS: std::sync::OnceLock<Arc<Metrics>> = std::sync::OnceLock::new();

/// Get or initialize the global metrics instance.
pub fn get_metrics() -> Arc<Metrics> {
    METRICS.get_or_init(|| Arc::new(Metrics::new())).clone()
}

/// Histogram buckets for aggregation latency (in seconds).
fn default_latency_buckets() -> Vec<f64> {
    vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
}

/// All metrics for the Tandem service.
pub struct Metrics {
    /// Prometheus registry for all metrics.
    pub registry: Registry,

    // =========================================================================
    // Counters
    // =========================================================================
    /// Total number of sessions booked.
    pub sessions_booked_total: IntCounter,
    /// Total number of sessions completed.
    pub sessions_completed_total: IntCounter,
    /// Total number of sessions cancelled.
    pub sessions_cancelled_total: IntCounter,
    /// Total number of feedback rows submitted.
    pub feedback_submitted_total: IntCounter,
    /// Total number of notifications delivered.
    pub notifications_delivered_total: IntCounter,
    /// Total number of notifications dropped after retries.
    pub notifications_failed_total: IntCounter,
    /// Total number of profile cache hits.
    pub cache_hits_total: IntCounter,
    /// Total number of profile cache misses.
    pub cache_misses_total: IntCounter,
    /// Total number of dashboard recomputations.
    pub dashboard_refreshes_total: IntCounter,

    // =========================================================================
    // Gauges
    // =========================================================================
    /// Current number of profiles.
    pub profiles_count: IntGauge,
    /// Current number of sessions.
    pub sessions_count: IntGauge,

    // =========================================================================
    // Histograms (durations in seconds)
    // =========================================================================
    /// Dashboard aggregation duration in seconds.
    pub aggregation_duration_seconds: Histogram,

    /// Service start time.
    start_time: RwLock<Instant>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance with all metrics registered.
    pub fn new() -> Self {
        let registry = Registry::new();

        let sessions_booked_total = IntCounter::new(
            "tandem_sessions_booked_total",
            "Total number of sessions booked",
        )
        .expect("failed to create counter");

        let sessions_completed_total = IntCounter::new(
            "tandem_sessions_completed_total",
            "Total number of sessions completed",
        )
        .expect("failed to create counter");

        let sessions_cancelled_total = IntCounter::new(
            "tandem_sessions_cancelled_total",
            "Total number of sessions cancelled",
        )
        .expect("failed to create counter");

        let feedback_submitted_total = IntCounter::new(
            "tandem_feedback_submitted_total",
            "Total number of feedback rows submitted",
        )
        .expect("failed to create counter");

        let notifications_delivered_total = IntCounter::new(
            "tandem_notifications_delivered_total",
            "Total number of notifications delivered",
        )
        .expect("failed to create counter");

        let notifications_failed_total = IntCounter::new(
            "tandem_notifications_failed_total",
            "Total number of notifications dropped after retries",
        )
        .expect("failed to create counter");

        let cache_hits_total = IntCounter::new(
            "tandem_cache_hits_total",
            "Total number of profile cache hits",
        )
        .expect("failed to create counter");

        let cache_misses_total = IntCounter::new(
            "tandem_cache_misses_total",
            "Total number of profile cache misses",
        )
        .expect("failed to create counter");

        let dashboard_refreshes_total = IntCounter::new(
            "tandem_dashboard_refreshes_total",
            "Total number of dashboard recomputations",
        )
        .expect("failed to create counter");

        let profiles_count =
            IntGauge::new("tandem_profiles_count", "Current number of profiles")
                .expect("failed to create gauge");

        let sessions_count =
            IntGauge::new("tandem_sessions_count", "Current number of sessions")
                .expect("failed to create gauge");

        let aggregation_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "tandem_aggregation_duration_seconds",
                "Dashboard aggregation duration in seconds",
            )
            .buckets(default_latency_buckets()),
        )
        .expect("failed to create histogram");

        for collector in [
            Box::new(sessions_booked_total.clone()) as Box<dyn prometheus::core::Collector>,
            Box::new(sessions_completed_total.clone()),
            Box::new(sessions_cancelled_total.clone()),
            Box::new(feedback_submitted_total.clone()),
            Box::new(notifications_delivered_total.clone()),
            Box::new(notifications_failed_total.clone()),
            Box::new(cache_hits_total.clone()),
            Box::new(cache_misses_total.clone()),
            Box::new(dashboard_refreshes_total.clone()),
            Box::new(profiles_count.clone()),
            Box::new(sessions_count.clone()),
            Box::new(aggregation_duration_seconds.clone()),
        ] {
            registry
                .register(collector)
                .expect("failed to register metric");
        }

        Self {
            registry,
            sessions_booked_total,
            sessions_completed_total,
            sessions_cancelled_total,
            feedback_submitted_total,
            notifications_delivered_total,
            notifications_failed_total,
            cache_hits_total,
            cache_misses_total,
            dashboard_refreshes_total,
            profiles_count,
            sessions_count,
            aggregation_duration_seconds,
            start_time: RwLock::new(Instant::now()),
        }
    }

    /// Uptime of this metrics instance in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.read().elapsed().as_secs()
    }

    /// Take a point-in-time snapshot of all counters and gauges.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sessions_booked: self.sessions_booked_total.get(),
            sessions_completed: self.sessions_completed_total.get(),
            sessions_cancelled: self.sessions_cancelled_total.get(),
            feedback_submitted: self.feedback_submitted_total.get(),
            notifications_delivered: self.notifications_delivered_total.get(),
            notifications_failed: self.notifications_failed_total.get(),
            cache_hits: self.cache_hits_total.get(),
            cache_misses: self.cache_misses_total.get(),
            dashboard_refreshes: self.dashboard_refreshes_total.get(),
            profiles: self.profiles_count.get(),
            sessions: self.sessions_count.get(),
            uptime_seconds: self.uptime_seconds(),
        }
    }
}

/// Point-in-time view of the metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub sessions_booked: u64,
    pub sessions_completed: u64,
    pub sessions_cancelled: u64,
    pub feedback_submitted: u64,
    pub notifications_delivered: u64,
    pub notifications_failed: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub dashboard_refreshes: u64,
    pub profiles: i64,
    pub sessions: i64,
    pub uptime_seconds: u64,
}
