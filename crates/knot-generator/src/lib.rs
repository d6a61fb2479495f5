//! Short code generation for the knot URL shortener.

pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use knot_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with
/// storage: they may produce a code that is already taken, and
/// collision handling is the caller's responsibility (the store rejects
/// duplicate inserts, and the shortening service retries).
pub trait Generator: Send + Sync + 'static {
    /// Generates a candidate short code.
    fn generate(&self) -> ShortCode;
}
