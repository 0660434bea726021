//! Prometheus metrics for the factcheck service.
//!
//! [`ServiceMetrics`] owns a dedicated [`Registry`] that the `/metrics`
//! endpoint encodes into the Prometheus text exposition format.

use prometheus::{
    register_histogram_with_registry, register_int_counter_with_registry,
    register_int_gauge_with_registry, Encoder, Histogram, HistogramOpts, IntCounter, IntGauge,
    Opts, Registry, TextEncoder,
};

/// Central collection of service-level metrics.
pub struct ServiceMetrics {
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Verify requests that passed validation.
    pub verify_requests: IntCounter,
    /// Verify requests answered by the external provider.
    pub verify_provider: IntCounter,
    /// Verify requests answered by the heuristic.
    pub verify_heuristic: IntCounter,
    /// Provider calls that failed and fell back to the heuristic.
    pub provider_failures: IntCounter,
    /// Reports successfully stored.
    pub reports_submitted: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Reports currently held by the store.
    pub reports_stored: IntGauge,

    // ── Histograms ──────────────────────────────────────────────────────
    /// End-to-end verify latency, provider call included.
    pub verify_duration_ms: Histogram,
}

impl ServiceMetrics {
    /// Create a fresh set of metrics registered under a new [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let verify_requests = register_int_counter_with_registry!(
            Opts::new("factcheck_verify_requests_total", "Total verify requests"),
            registry
        )
        .expect("failed to register verify_requests counter");

        let verify_provider = register_int_counter_with_registry!(
            Opts::new(
                "factcheck_verify_provider_total",
                "Verify requests answered by the external provider"
            ),
            registry
        )
        .expect("failed to register verify_provider counter");

        let verify_heuristic = register_int_counter_with_registry!(
            Opts::new(
                "factcheck_verify_heuristic_total",
                "Verify requests answered by the heuristic"
            ),
            registry
        )
        .expect("failed to register verify_heuristic counter");

        let provider_failures = register_int_counter_with_registry!(
            Opts::new(
                "factcheck_provider_failures_total",
                "External provider calls that failed"
            ),
            registry
        )
        .expect("failed to register provider_failures counter");

        let reports_submitted = register_int_counter_with_registry!(
            Opts::new(
                "factcheck_reports_submitted_total",
                "Total reports stored"
            ),
            registry
        )
        .expect("failed to register reports_submitted counter");

        let reports_stored = register_int_gauge_with_registry!(
            Opts::new("factcheck_reports_stored", "Reports currently retained"),
            registry
        )
        .expect("failed to register reports_stored gauge");

        // 1 ms → ~16 s.
        let verify_duration_ms = register_histogram_with_registry!(
            HistogramOpts::new(
                "factcheck_verify_duration_ms",
                "Verify request latency in milliseconds"
            )
            .buckets(prometheus::exponential_buckets(1.0, 2.0, 15).expect("valid buckets")),
            registry
        )
        .expect("failed to register verify_duration_ms histogram");

        Self {
            registry,
            verify_requests,
            verify_provider,
            verify_heuristic,
            provider_failures,
            reports_submitted,
            reports_stored,
            verify_duration_ms,
        }
    }

    /// Encode every metric in the Prometheus text format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_registered_metrics() {
        let metrics = ServiceMetrics::new();
        metrics.verify_requests.inc();
        metrics.reports_stored.set(3);

        let text = metrics.encode().unwrap();
        assert!(text.contains("factcheck_verify_requests_total 1"));
        assert!(text.contains("factcheck_reports_stored 3"));
    }
}
