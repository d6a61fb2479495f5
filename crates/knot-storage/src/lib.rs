//! Record store implementations for the knot URL shortener.
//!
//! Two backends implement the [`Repository`](knot_core::Repository)
//! contract: [`InMemoryRepository`] for tests and volatile deployments,
//! and [`JsonFileRepository`], the durable store that keeps an
//! authoritative in-memory map and atomically rewrites a JSON file on
//! every mutation.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;
