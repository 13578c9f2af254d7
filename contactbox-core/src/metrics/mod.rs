//! Metrics for observability
//!
//! Counters are always recorded through the `metrics` facade; they only go
//! anywhere once an exporter is installed.

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use thiserror::Error;

pub const CONTACTS_SUBMITTED: &str = "contactbox.contacts.submitted";
pub const CONTACTS_REJECTED: &str = "contactbox.contacts.rejected";
pub const CONTACTS_DELETED: &str = "contactbox.contacts.deleted";
pub const ADMIN_UNAUTHORIZED: &str = "contactbox.admin.unauthorized";
pub const STORE_FAILURES: &str = "contactbox.store.failures";

#[derive(Debug, Error)]
#[error("Failed to install metrics exporter: {0}")]
pub struct MetricsError(String);

/// Initialize metrics with descriptions
pub fn init_metrics() {
    describe_counter!(CONTACTS_SUBMITTED, "Contact submissions stored");
    describe_counter!(CONTACTS_REJECTED, "Contact submissions rejected by validation");
    describe_counter!(CONTACTS_DELETED, "Contacts deleted by an admin");
    describe_counter!(ADMIN_UNAUTHORIZED, "Admin requests with a wrong password");
    describe_counter!(STORE_FAILURES, "Store operations that failed unexpectedly");
}

/// Install the Prometheus exporter, serving scrapes on `addr`
///
/// Must be called from inside a Tokio runtime.
pub fn install_prometheus_exporter(addr: SocketAddr) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| MetricsError(e.to_string()))?;

    init_metrics();
    Ok(())
}

/// Record a counter metric
pub fn record_counter(name: &'static str, value: u64) {
    counter!(name).increment(value);
}
