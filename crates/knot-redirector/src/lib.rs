//! Redirect resolution for the knot URL shortener.
//!
//! This crate provides [`RedirectorService`], which maps a short code
//! back to its destination URL and counts the access as one atomic
//! store operation.

pub mod redirector;
pub mod service;

pub use redirector::Redirector;
pub use service::RedirectorService;

use knot_core::StorageError;

/// Result type for redirect operations.
pub type Result<T> = std::result::Result<T, StorageError>;
