//! Liveness reporting for the `/api/health` endpoint
//!
//! The service has no degraded states: if this code runs, it reports healthy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "contact-form-api";

/// Health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub service: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Produces health reports; remembers when the process started
#[derive(Debug, Clone)]
pub struct HealthChecker {
    start_time: Instant,
    version: String,
}

impl HealthChecker {
    /// Create a new health checker
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            version: version.into(),
        }
    }

    /// Get current health status
    pub fn check_health(&self) -> HealthReport {
        HealthReport {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: Utc::now(),
            message: "API is running successfully".to_string(),
            version: self.version.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}
