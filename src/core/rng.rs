//! Deterministic random number generation for dealing.
//!
//! The only randomness in the engine is the deal-time shuffle of the stock.
//! Same seed, same deal — which makes games reproducible in tests and lets
//! a frontend re-create a deal from a saved seed.
//!
//! ## Usage
//!
//! ```
//! use klondike_engine::core::DealRng;
//!
//! let mut a = DealRng::new(42);
//! let mut b = DealRng::new(42);
//!
//! let mut deck_a: Vec<u32> = (0..52).collect();
//! let mut deck_b: Vec<u32> = (0..52).collect();
//! a.shuffle(&mut deck_a);
//! b.shuffle(&mut deck_b);
//!
//! assert_eq!(deck_a, deck_b);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG for the deal-time shuffle.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality
/// randomness, with O(1) state capture for reproducibility.
#[derive(Clone, Debug)]
pub struct DealRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DealRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> DealRngState {
        DealRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &DealRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of how
/// many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = DealRng::new(42);
        let mut rng2 = DealRng::new(42);

        let mut a: Vec<u32> = (0..52).collect();
        let mut b: Vec<u32> = (0..52).collect();
        rng1.shuffle(&mut a);
        rng2.shuffle(&mut b);

        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut rng1 = DealRng::new(1);
        let mut rng2 = DealRng::new(2);

        let mut a: Vec<u32> = (0..52).collect();
        let mut b: Vec<u32> = (0..52).collect();
        rng1.shuffle(&mut a);
        rng2.shuffle(&mut b);

        assert_ne!(a, b);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = DealRng::new(42);
        let mut data: Vec<u32> = (0..52).collect();

        rng.shuffle(&mut data);

        assert_ne!(data, (0..52).collect::<Vec<_>>());
        data.sort_unstable();
        assert_eq!(data, (0..52).collect::<Vec<_>>());
    }

    #[test]
    fn test_state_restore() {
        let mut rng = DealRng::new(42);

        let mut warmup: Vec<u32> = (0..52).collect();
        rng.shuffle(&mut warmup);

        let state = rng.state();

        let mut expected: Vec<u32> = (0..52).collect();
        rng.shuffle(&mut expected);

        let mut restored = DealRng::from_state(&state);
        let mut actual: Vec<u32> = (0..52).collect();
        restored.shuffle(&mut actual);

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = DealRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: DealRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
