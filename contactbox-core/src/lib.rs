//! ContactBox core library
//!
//! Backend for a portfolio site's contact form: stores submissions in a
//! single SQLite file and exposes them to an admin behind a shared secret.

pub mod auth;
pub mod config;
pub mod contact;
pub mod health;
pub mod http;
pub mod logging;
pub mod metrics;
pub mod shutdown;
pub mod store;

pub use auth::AdminGuard;
pub use config::Config;
pub use contact::{ContactRecord, ContactSubmission, NewContact};
pub use http::{build_router, AppState, ContactServer};
pub use logging::{init_logging, init_logging_with_config, LogConfig, LogLevel};
pub use shutdown::ShutdownCoordinator;
pub use store::{ContactStore, StoreError};
