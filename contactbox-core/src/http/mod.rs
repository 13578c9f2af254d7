//! HTTP API for contact submissions
//!
//! Routes, handlers and the single place where errors become responses.

pub mod api;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;
pub mod types;

pub use api::build_router;
pub use error::{ApiError, ApiResult};
pub use server::{serve, ContactServer};
pub use state::AppState;
