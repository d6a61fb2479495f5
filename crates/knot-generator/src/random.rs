use crate::Generator;
use knot_core::ShortCode;
use rand::Rng;

/// Alphanumeric alphabet with visually ambiguous characters removed
/// (`0`/`O`, `1`/`l`/`I`), 57 symbols.
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789";

/// The default length of generated short codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Generates fixed-length codes drawn uniformly at random from
/// [`ALPHABET`] using the thread-local RNG.
///
/// Codes are identifiers, not security tokens, so a non-cryptographic
/// RNG is sufficient. At the default length the code space holds
/// 57^6 (~34 billion) values.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing codes of the given length.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Returns the configured code length.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortCode {
        let mut rng = rand::rng();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}
