//! Core types and traits for the knot URL shortener.
//!
//! This crate provides the shared vocabulary used by the storage
//! backends and the shortening, redirect, and admin services.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{ShortenerError, StorageError};
pub use repository::{Repository, UrlRecord};
pub use shortcode::ShortCode;
pub use shortener::{ShortenOutcome, Shortener};
