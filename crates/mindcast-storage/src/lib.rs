//! # mindcast-storage
//!
//! SQLite persistence for the Mindcast engines.
//! Implements `IEpisodeStore` and `ICorrelationStore`.
//! One write connection plus read-only connections for file stores (WAL mode).

pub mod connections;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use engine::SqliteStore;

/// Helper to convert a string message into a `MindcastError::StoreError`.
pub fn to_storage_err(message: String) -> mindcast_core::MindcastError {
    mindcast_core::errors::StoreError::Backend { message }.into()
}
