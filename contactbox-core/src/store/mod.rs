//! Storage layer for contact messages
//!
//! Provides SQL-based persistence on a single SQLite file.

pub mod error;
pub mod schema;
pub mod sql_store;

pub use error::StoreError;
pub use schema::init_schema;
pub use sql_store::ContactStore;
