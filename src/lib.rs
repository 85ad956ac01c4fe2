//! # pet-targeting
//!
//! Trigger and targeting core for a turn-based pet autobattler.
//!
//! Given a stream of game events, this crate decides whether a pet's ability
//! fires for an event, and which pets on the battlefield it affects. The
//! battle/shop loop and the effects themselves live outside the crate.
//!
//! ## Design Principles
//!
//! 1. **Reproducible**: Target selection is a pure function of one roll in
//!    `[0, 1)`. Random picks rank subsets instead of shuffling.
//!
//! 2. **Owner-relative**: Every positional rule works on one battlefield line,
//!    `reverse(friendly) + enemy`, so "ahead" always points at the enemy.
//!
//! 3. **Data-driven**: Triggers, filters, selectors and generators all have a
//!    dict form for authoring abilities as content.
//!
//! ## Modules
//!
//! - `core`: Pets, teams, events, RNG, constants
//! - `triggers`: Composable trigger tree with per-instance counters
//! - `targets`: Filters, selectors, combination ranking, target generators
//! - `abilities`: Trigger + target generator bound to one owner
//! - `error`: Umbrella error and schema errors

pub mod abilities;
pub mod core;
pub mod error;
pub mod targets;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    Battlefield, Event, EventError, EventKind,
    GameRng, GameRngState,
    Pet, PetId,
    Team, TeamError,
    BATTLEFIELD_SIZE, MAX_TEAM_SIZE,
};

pub use crate::triggers::{
    Combinator, CountCounter, LimitCounter, ModifierDict, ModifierKind,
    Trigger, TriggerDict, TriggerOp,
};

pub use crate::targets::{
    combination_count, nth_combination, CombinationError,
    Filter, FilterDict, FilterName, FilterOp, TargetFilter,
    GeneratorKind, TargetGenerator, TargetGeneratorDict,
    SelectError, SelectorDict, SelectorName, TargetSelector,
};

pub use crate::abilities::{Ability, AbilityDict};

pub use crate::error::{Error, ErrorSeverity, SchemaError};
