//! Seeded randomness
//!
//! Worlds, encounter rolls and runs all draw from one [`GameRng`]. A save
//! keeps the seed plus how far the stream has advanced, so a restored game
//! picks up where it left off instead of replaying old rolls.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream plus the seed it started from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RngState", into = "RngState")]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

/// Saved form: seed and stream position in 32-bit words
#[derive(Serialize, Deserialize)]
struct RngState {
    seed: u64,
    #[serde(default)]
    word_pos: u64,
}

impl From<RngState> for GameRng {
    fn from(state: RngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.rng.set_word_pos(u128::from(state.word_pos));
        rng
    }
}

impl From<GameRng> for RngState {
    fn from(rng: GameRng) -> Self {
        Self {
            seed: rng.seed,
            word_pos: u64::try_from(rng.rng.get_word_pos()).unwrap_or(u64::MAX),
        }
    }
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Fresh game with an OS-chosen seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform in `0..n`; 0 when `n` is 0
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform in `1..=n`; 0 when `n` is 0
    pub fn rnd(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(1..=n)
    }

    /// True `percent` times out of 100
    pub fn percent(&mut self, percent: u32) -> bool {
        self.rn2(100) < percent
    }

    /// Any element of `items`, `None` when empty
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let idx = self.rn2(items.len() as u32) as usize;
        items.get(idx)
    }

    /// Pick an index with probability proportional to its weight.
    ///
    /// Returns None when the slice is empty or every weight is zero.
    pub fn weighted_index(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.rn2(total);
        weights.iter().position(|&weight| {
            if roll < weight {
                return true;
            }
            roll -= weight;
            false
        })
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
