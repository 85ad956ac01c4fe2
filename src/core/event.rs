//! Game events.
//!
//! An `Event` records one occurrence in the battle or shop loop together with
//! borrowed snapshots of up to two teams. The first team that contains a
//! given pet is that pet's friendly team; the other is its enemy team.
//!
//! ## Battlefield Linearization
//!
//! Positional rules (ahead, behind, adjacent) work on a single line built
//! from the owner's point of view: the friendly team reversed (back to
//! front), followed by the enemy team (front to back). "Ahead" therefore
//! always points toward the opposing side. Empty slots are skipped.
//!
//! ```
//! use pet_targeting::core::{Event, EventKind, Pet, PetId, Team};
//!
//! let friendly = Team::from_pets([
//!     Pet::new(PetId(1), "front", 1, 1),
//!     Pet::new(PetId(2), "back", 1, 1),
//! ]).unwrap();
//! let enemy = Team::from_pets([Pet::new(PetId(3), "enemy", 1, 1)]).unwrap();
//!
//! let event = Event::new(EventKind::StartOfBattle)
//!     .with_pet(PetId(1))
//!     .with_teams([&friendly, &enemy])
//!     .unwrap();
//!
//! let line: Vec<_> = event.battlefield(PetId(2)).unwrap().iter().map(|p| p.id.raw()).collect();
//! assert_eq!(line, vec![2, 1, 3]);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

use super::config::{BATTLEFIELD_SIZE, MAX_EVENT_TEAMS};
use super::pet::{Pet, PetId};
use super::team::Team;

/// Kind of game occurrence.
///
/// Names are SCREAMING_SNAKE_CASE in every serialized form. `END_TURN` is
/// accepted as an alias of `END_OF_TURN`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    None,
    StartOfBattle,
    BeforeAttack,
    Attack,
    Hurt,
    BeforeFaint,
    Faint,
    Knockout,
    Summoned,
    Pushed,
    StartOfTurn,
    UpgradeShopTier,
    BuyPet,
    BuyFood,
    EatShopFood,
    Sell,
    Roll,
    LevelUp,
    #[serde(alias = "END_TURN")]
    #[strum(to_string = "END_OF_TURN", serialize = "END_TURN")]
    EndOfTurn,
}

/// Errors raised by event construction and team resolution.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EventError {
    /// More teams than an event can carry.
    #[error("an event carries at most {MAX_EVENT_TEAMS} teams, got {count}")]
    TooManyTeams { count: usize },

    /// A relational rule was evaluated for an owner missing from every team.
    #[error("owner {owner:?} is not in any event team")]
    OwnerNotInTeams { owner: Option<PetId> },
}

/// Pets in battlefield order.
pub type Battlefield<'a> = SmallVec<[&'a Pet; BATTLEFIELD_SIZE]>;

/// A single game occurrence.
///
/// Events are transient: the battle loop builds one per occurrence and
/// drops it once every trigger has seen it.
#[derive(Clone, Debug, PartialEq)]
pub struct Event<'a> {
    /// What happened.
    pub kind: EventKind,
    /// The pet that caused the event.
    pub pet: Option<PetId>,
    /// The food involved (shop events).
    pub food: Option<String>,
    /// Whether a battle is in progress.
    pub in_battle: bool,
    teams: SmallVec<[&'a Team; MAX_EVENT_TEAMS]>,
}

impl<'a> Event<'a> {
    /// Create an event with no pet and no teams.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            pet: None,
            food: None,
            in_battle: false,
            teams: SmallVec::new(),
        }
    }

    /// Set the pet that caused the event (builder pattern).
    #[must_use]
    pub fn with_pet(mut self, pet: PetId) -> Self {
        self.pet = Some(pet);
        self
    }

    /// Set the food involved (builder pattern).
    #[must_use]
    pub fn with_food(mut self, food: impl Into<String>) -> Self {
        self.food = Some(food.into());
        self
    }

    /// Mark the event as happening during battle (builder pattern).
    #[must_use]
    pub fn in_battle(mut self) -> Self {
        self.in_battle = true;
        self
    }

    /// Attach team snapshots (builder pattern).
    ///
    /// Fails when more than two teams are given.
    pub fn with_teams(
        mut self,
        teams: impl IntoIterator<Item = &'a Team>,
    ) -> Result<Self, EventError> {
        let teams: SmallVec<[&'a Team; MAX_EVENT_TEAMS]> = teams.into_iter().collect();
        if teams.len() > MAX_EVENT_TEAMS {
            return Err(EventError::TooManyTeams { count: teams.len() });
        }
        self.teams = teams;
        Ok(self)
    }

    /// The attached teams in the order given.
    #[must_use]
    pub fn teams(&self) -> &[&'a Team] {
        &self.teams
    }

    /// Check if a pet is in any attached team.
    #[must_use]
    pub fn pet_in_teams(&self, pet: PetId) -> bool {
        self.teams.iter().any(|t| t.contains(pet))
    }

    /// Friendly and enemy team relative to `pet`.
    ///
    /// The friendly team is the first team containing `pet`. The enemy team
    /// is `None` when only one team is attached.
    pub fn ordered_teams(&self, pet: PetId) -> Result<(&'a Team, Option<&'a Team>), EventError> {
        match self.teams.as_slice() {
            [first, rest @ ..] if first.contains(pet) => Ok((*first, rest.first().copied())),
            [first, second] if second.contains(pet) => Ok((*second, Some(*first))),
            _ => Err(EventError::OwnerNotInTeams { owner: Some(pet) }),
        }
    }

    /// Occupied pets as `reverse(friendly) + enemy` relative to `owner`.
    pub fn battlefield(&self, owner: PetId) -> Result<Battlefield<'a>, EventError> {
        let (friendly, enemy) = self.ordered_teams(owner)?;
        let mut line: Battlefield<'a> = friendly.pets().rev().collect();
        if let Some(enemy) = enemy {
            line.extend(enemy.pets());
        }
        Ok(line)
    }
}
