//! Engine constants.
//!
//! The targeting core has no runtime configuration. Team capacity and the
//! defaults used by the convenience trigger constructors live here so the
//! battle loop and content pipeline agree on them.

use super::event::EventKind;

/// Number of slots on a team.
pub const MAX_TEAM_SIZE: usize = 5;

/// Number of slots across both sides of the battlefield.
pub const BATTLEFIELD_SIZE: usize = MAX_TEAM_SIZE * 2;

/// Event that resets per-turn counters unless a modifier names another one.
pub const DEFAULT_RESET_EVENT: EventKind = EventKind::StartOfTurn;

/// Activations allowed per reset by a default `LimitCounter`.
pub const DEFAULT_LIMIT: i32 = 3;

/// Activations needed per firing by a default `CountCounter`.
pub const DEFAULT_COUNT: i32 = 2;

/// Maximum number of teams an event may carry (friendly and enemy).
pub const MAX_EVENT_TEAMS: usize = 2;
