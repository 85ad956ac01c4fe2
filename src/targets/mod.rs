//! Targeting: which pets an ability affects.
//!
//! Targeting runs in two stages over a candidate pool built from an event:
//! a [`Filter`] narrows the pool relative to the owner, then a
//! [`TargetSelector`] picks `n` pets from what is left using a single roll.
//!
//! ## Key Components
//!
//! - [`nth_combination`]: rank to `r`-subset, used for reproducible random picks
//! - [`TargetFilter`] / [`Filter`]: positional and relational narrowing
//! - [`TargetSelector`]: first/last/random and value-ranked selection
//! - [`TargetGenerator`]: filter + selector bound to an owner
//!
//! Every type here has a dict form (`FilterDict`, `SelectorDict`,
//! `TargetGeneratorDict`) used for authoring abilities as data.

mod combination;
mod filter;
mod generator;
mod selector;

pub use combination::{combination_count, nth_combination, CombinationError};
pub use filter::{Filter, FilterDict, FilterName, FilterOp, TargetFilter};
pub use generator::{GeneratorKind, TargetGenerator, TargetGeneratorDict};
pub use selector::{SelectError, SelectorDict, SelectorName, TargetSelector};
