//! Server state shared across requests

use crate::auth::AdminGuard;
use crate::config::Config;
use crate::health::HealthChecker;
use crate::store::ContactStore;

/// Everything a handler needs; cloned handles only, no mutable state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Contact persistence
    pub store: ContactStore,

    /// Admin password check for list/delete
    pub guard: AdminGuard,

    /// Health reporting
    pub health: HealthChecker,

    /// Whether admin endpoints return raw storage errors
    pub expose_internal_errors: bool,
}

impl AppState {
    /// Build the state from an initialized store and the loaded config
    pub fn new(store: ContactStore, config: &Config) -> Self {
        Self {
            store,
            guard: AdminGuard::from(&config.admin),
            health: HealthChecker::default(),
            expose_internal_errors: config.admin.expose_internal_errors,
        }
    }
}
