use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Characters used to mask positions that have not been revealed yet.
pub const FILLER_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+-={}[]<>?/\\|~";

pub fn filler_chars() -> Vec<char> {
    FILLER_ALPHABET.chars().collect()
}

/// Source of filler characters for scrambled positions.
pub trait FillerSource {
    /// Picks one character from `alphabet`, which is never empty.
    fn pick(&mut self, alphabet: &[char]) -> char;
}

/// Uniform picks from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngFiller<R: Rng> {
    rng: R,
}

impl<R: Rng> RngFiller<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngFiller<SmallRng> {
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FillerSource for RngFiller<R> {
    fn pick(&mut self, alphabet: &[char]) -> char {
        *alphabet.choose(&mut self.rng).unwrap_or(&'#')
    }
}

/// Always yields the same character. Handy for asserting exact frames.
#[derive(Debug, Clone, Copy)]
pub struct FixedFiller(pub char);

impl FillerSource for FixedFiller {
    fn pick(&mut self, _alphabet: &[char]) -> char {
        self.0
    }
}
