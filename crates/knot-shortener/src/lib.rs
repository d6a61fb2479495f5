//! URL shortening service implementation.
//!
//! This crate provides [`ShortenerService`], the orchestrator that
//! deduplicates repeat submissions and allocates collision-free short
//! codes. Core types are re-exported from `knot_core`.

pub mod service;

pub use knot_core::{ShortenOutcome, Shortener, ShortenerError};
pub use service::ShortenerService;
