use std::net::SocketAddr;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: admitted intervals. Labels: op (book|block).
pub const ADMISSIONS_TOTAL: &str = "turfbook_admissions_total";

/// Counter: rejected admission attempts. Labels: op, reason.
pub const ADMISSIONS_REJECTED_TOTAL: &str = "turfbook_admissions_rejected_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: registered turfs.
pub const TURFS_ACTIVE: &str = "turfbook_turfs_active";

/// Histogram: admission-log append+fsync duration in seconds.
pub const WAL_APPEND_DURATION_SECONDS: &str = "turfbook_wal_append_duration_seconds";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init_metrics(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Console tracing for embedding applications. Call once at startup.
pub fn init_tracing() {
    tracing_subscriber::fmt::init();
}
