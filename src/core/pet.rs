//! Pet identification and stats.
//!
//! Every pet on the battlefield carries a `PetId` that is stable across team
//! operations (insertion, summoning, snapshot copies). All "is this the owner"
//! and "is this the event pet" questions are answered by comparing ids, never
//! by comparing memory addresses.
//!
//! ## Usage
//!
//! ```
//! use pet_targeting::core::{Pet, PetId};
//!
//! let ant = Pet::new(PetId(1), "ant", 2, 1).with_temp_stats(1, 0);
//!
//! assert_eq!(ant.attack(), 3);
//! assert_eq!(ant.health(), 1);
//! assert_eq!(ant.strength(), 4);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a pet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PetId(pub u32);

impl PetId {
    /// Create a new pet ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for PetId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pet({})", self.0)
    }
}

/// A pet occupying a team slot.
///
/// Stats are split into permanent and temporary parts; targeting only ever
/// reads the combined values. Changing stats belongs to the effect executor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Stable identity.
    pub id: PetId,
    /// Display name (for debugging).
    pub name: String,
    /// Shop tier.
    pub tier: u8,
    /// Current level.
    pub level: u8,
    /// Attack that persists between battles.
    pub perm_attack: i32,
    /// Health that persists between battles.
    pub perm_health: i32,
    /// Attack granted until the end of the battle.
    pub temp_attack: i32,
    /// Health granted until the end of the battle.
    pub temp_health: i32,
}

impl Pet {
    /// Create a pet with permanent stats.
    pub fn new(id: PetId, name: impl Into<String>, attack: i32, health: i32) -> Self {
        Self {
            id,
            name: name.into(),
            tier: 1,
            level: 1,
            perm_attack: attack,
            perm_health: health,
            temp_attack: 0,
            temp_health: 0,
        }
    }

    /// Set temporary stats (builder pattern).
    #[must_use]
    pub fn with_temp_stats(mut self, attack: i32, health: i32) -> Self {
        self.temp_attack = attack;
        self.temp_health = health;
        self
    }

    /// Set the tier (builder pattern).
    #[must_use]
    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    /// Set the level (builder pattern).
    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    /// Total attack.
    #[must_use]
    pub fn attack(&self) -> i32 {
        self.perm_attack.saturating_add(self.temp_attack)
    }

    /// Total health.
    #[must_use]
    pub fn health(&self) -> i32 {
        self.perm_health.saturating_add(self.temp_health)
    }

    /// Attack plus health. Stat sums saturate at the `i32` bounds.
    #[must_use]
    pub fn strength(&self) -> i32 {
        self.attack().saturating_add(self.health())
    }
}

impl std::fmt::Display for Pet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<{}-{}>", self.name, self.attack(), self.health())
    }
}
