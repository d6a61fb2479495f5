use crate::Generator;
use knot_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic short code generator using a sequential counter.
///
/// Produces codes like "kn000000", "kn000001", and so on. Useful in
/// tests where the exact sequence of generated codes matters.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            counter: AtomicU64::new(0),
            prefix: prefix.into(),
        }
    }

    /// Creates a new sequential generator starting from a specific
    /// counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_sequential_codes() {
        let generator = SeqGenerator::with_prefix("kn");

        assert_eq!(generator.generate().as_str(), "kn000000");
        assert_eq!(generator.generate().as_str(), "kn000001");
        assert_eq!(generator.generate().as_str(), "kn000002");
    }

    #[test]
    fn with_offset_starts_at_offset() {
        let generator = SeqGenerator::with_offset("kn", 1000);

        assert_eq!(generator.generate().as_str(), "kn001000");
        assert_eq!(generator.generate().as_str(), "kn001001");
    }
}
