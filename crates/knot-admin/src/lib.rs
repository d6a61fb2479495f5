//! Administrative queries for the knot URL shortener.
//!
//! Thin stats/list/delete wrappers around the record store, with no
//! business logic of their own.

pub mod admin;
pub mod service;

pub use admin::Admin;
pub use service::AdminService;

use knot_core::StorageError;

/// Result type for administrative operations.
pub type Result<T> = std::result::Result<T, StorageError>;
