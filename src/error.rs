//! Crate-level error types.
//!
//! Domain errors live beside the code that raises them (`TeamError`,
//! `EventError`, `CombinationError`, `SelectError`). This module holds the
//! shared dict-schema error and the umbrella [`Error`] used by operations
//! that cross several domains, such as target generation.
//!
//! Errors fall in two classes:
//! - **Validation**: malformed input (bad dict, unknown name, out-of-range
//!   count or roll, bad slot index). Expected at content-authoring time.
//! - **Precondition**: a relational rule evaluated for an owner that is not
//!   on the battlefield. Signals a bug in the caller.

use thiserror::Error;

use crate::core::{EventError, TeamError};
use crate::targets::{CombinationError, SelectError};

/// Severity class of an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Invalid input; reject without retry.
    Validation,
    /// Caller broke an owner-in-team invariant.
    Precondition,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Precondition => "precondition",
        }
    }
}

/// Errors raised while building triggers, filters, selectors and target
/// generators from their dict form.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Trigger dict has neither a usable `event` nor a usable `op`.
    #[error("trigger dict needs an `event`, an `op` of true/false, or an `op` of ANY/ALL with `triggers`")]
    MissingTriggerBase,

    /// `limit`/`count` modifier without `n`.
    #[error("`{modifier}` modifier requires `n`")]
    MissingCount { modifier: &'static str },

    /// `limit`/`count` modifier with `n < 1`.
    #[error("`{modifier}` modifier requires n >= 1, got {n}")]
    InvalidCount { modifier: &'static str, n: i32 },

    /// `limit`/`count` modifier without `reset_event`.
    #[error("`{modifier}` modifier requires `reset_event`")]
    MissingResetEvent { modifier: &'static str },

    /// Filter dict has neither `filter` nor `op` with `filters`.
    #[error("filter dict needs a `filter` name or an `op` of ANY/ALL with `filters`")]
    MissingFilter,

    /// Value selector without a boolean `highest`.
    #[error("{selector} selector requires a boolean `highest`")]
    MissingHighest { selector: &'static str },
}

/// Umbrella error for operations that span several domains.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Team(#[from] TeamError),

    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Combination(#[from] CombinationError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl Error {
    /// Severity class of this error.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Event(EventError::OwnerNotInTeams { .. }) => ErrorSeverity::Precondition,
            _ => ErrorSeverity::Validation,
        }
    }
}
