//! Roll source for target selection.
//!
//! Selection never draws randomness itself: `select` and `get` take one
//! scalar roll in `[0, 1)`. The battle loop draws those rolls from a
//! `GameRng`, so a whole simulation replays from its seed.
//!
//! Streams can be split two ways. `fork` hands out a fresh branch per call
//! (for trying alternative battle outcomes), while `for_context` and
//! `for_pet` derive a stream from a stable key so that adding a pet to the
//! board does not shift the rolls seen by the others.
//!
//! ```
//! use pet_targeting::core::{GameRng, PetId};
//!
//! let mut rng = GameRng::new(42);
//! let roll = rng.roll();
//! assert!((0.0..1.0).contains(&roll));
//!
//! // Same seed, same rolls.
//! assert_eq!(GameRng::new(42).roll(), roll);
//!
//! // Per-pet streams do not depend on draw order.
//! let ant = rng.for_pet(PetId(1)).roll();
//! assert_eq!(GameRng::new(42).for_pet(PetId(1)).roll(), ant);
//! ```

use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use super::pet::PetId;

/// Golden-ratio increment spreading branch seeds apart.
const BRANCH_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic ChaCha8 stream of selection rolls.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    branches: u64,
}

impl GameRng {
    /// Create a stream from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            branches: 0,
        }
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Split off a new branch. Each call yields a different branch; the
    /// sequence of branches is fixed by the seed.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.branches += 1;
        Self::new(self.seed.wrapping_add(self.branches.wrapping_mul(BRANCH_STEP)))
    }

    /// Stream keyed by `context`, independent of how many rolls were drawn.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        self.keyed(context)
    }

    /// Stream keyed by a pet, for that pet's abilities.
    #[must_use]
    pub fn for_pet(&self, pet: PetId) -> Self {
        self.keyed(pet.raw())
    }

    // FxHasher has no per-process random state, so keyed seeds are stable.
    fn keyed(&self, key: impl Hash) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        key.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Draw a roll in `[0, 1)`.
    pub fn roll(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Snapshot the stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            branches: self.branches,
        }
    }

    /// Resume a stream from a snapshot.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.inner.set_word_pos(state.word_pos);
        rng.branches = state.branches;
        rng
    }
}

/// Serializable position of a [`GameRng`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
    /// Branches already handed out by `fork`.
    pub branches: u64,
}
