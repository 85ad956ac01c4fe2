//! Trigger system for pet abilities.
//!
//! A trigger answers one question per event: should this pet's ability fire?
//! Triggers are trees built from event-kind leaves, OR/AND combinators, and
//! modifiers that add a relational or counting constraint.
//!
//! ## Key Components
//!
//! - [`Trigger`]: the predicate tree and its evaluation
//! - [`LimitCounter`] / [`CountCounter`]: per-node counter state
//! - [`TriggerDict`] / [`ModifierDict`]: the authoring format
//!
//! ## Example Usage
//!
//! ```
//! use pet_targeting::core::{Event, EventKind, Pet, PetId, Team};
//! use pet_targeting::triggers::Trigger;
//!
//! // "Friend ahead faints", at most twice per turn.
//! let mut trigger = Trigger::limit_per_turn(Trigger::ahead(EventKind::Faint), 2).unwrap();
//!
//! let team = Team::from_pets([
//!     Pet::new(PetId(1), "ant", 2, 1),
//!     Pet::new(PetId(2), "flamingo", 3, 1),
//! ]).unwrap();
//! let event = Event::new(EventKind::Faint).with_pet(PetId(1)).with_teams([&team]).unwrap();
//!
//! assert!(trigger.is_triggered(&event, Some(PetId(2))).unwrap());
//! assert!(!trigger.is_triggered(&event, Some(PetId(1))).unwrap());
//! ```

mod schema;
mod trigger;

pub use schema::{Combinator, ModifierDict, ModifierKind, TriggerDict, TriggerOp};
pub use trigger::{CountCounter, LimitCounter, Trigger};
