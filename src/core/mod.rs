//! Core battlefield types: pets, teams, events, RNG, constants.
//!
//! Everything here is data. Triggers and targeting read these types but
//! never mutate pets or teams.

pub mod config;
pub mod event;
pub mod pet;
pub mod rng;
pub mod team;

pub use config::{BATTLEFIELD_SIZE, MAX_TEAM_SIZE};
pub use event::{Battlefield, Event, EventError, EventKind};
pub use pet::{Pet, PetId};
pub use rng::{GameRng, GameRngState};
pub use team::{Team, TeamError};
