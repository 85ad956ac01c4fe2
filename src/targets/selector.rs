//! Target selectors.
//!
//! A selector picks `n` pets from an already filtered candidate list. Every
//! selection is a pure function of the candidates, `n`, and one roll in
//! `[0, 1)`, so replaying a battle with the same rolls picks the same pets.
//!
//! ## Random Selection
//!
//! `Random` does not shuffle. It ranks all `C(len, n)` subsets in
//! lexicographic order and takes the one at `floor(roll * C(len, n))`
//! (see [`nth_combination`]).
//!
//! ## Value Selection
//!
//! `Health`, `Attack` and `Strength` rank candidates by value. When pets tie
//! at the cutoff rank, the pets above the cutoff are kept and the remaining
//! slots are filled by a `Random` selection over the tied pets, using the
//! same roll.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

use crate::core::Pet;
use crate::error::SchemaError;

use super::combination::{combination_count, nth_combination, CombinationError};

/// Errors raised by [`TargetSelector::select`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SelectError {
    /// Negative number of pets requested.
    #[error("number of selected pets must be >= 0, got {count}")]
    NegativeCount { count: i32 },

    /// Roll outside `[0, 1)`.
    #[error("roll must be in [0, 1), got {roll}")]
    RollOutOfRange { roll: f64 },

    #[error(transparent)]
    Combination(#[from] CombinationError),
}

/// Strategy for picking targets from a candidate list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectorDict", into = "SelectorDict")]
pub enum TargetSelector {
    /// The first `n` candidates.
    First,
    /// The last `n` candidates, in input order.
    Last,
    /// A subset chosen by rank from the roll.
    Random,
    /// Highest or lowest health.
    Health { highest: bool },
    /// Highest or lowest attack.
    Attack { highest: bool },
    /// Highest or lowest attack + health.
    Strength { highest: bool },
}

impl TargetSelector {
    /// Select up to `count` pets.
    pub fn select<'p>(&self, pets: &[&'p Pet], count: i32, roll: f64) -> Result<Vec<&'p Pet>, SelectError> {
        if count < 0 {
            return Err(SelectError::NegativeCount { count });
        }
        if !(0.0..1.0).contains(&roll) {
            return Err(SelectError::RollOutOfRange { roll });
        }
        let n = count as usize;

        match *self {
            Self::First => Ok(pets.iter().take(n).copied().collect()),
            Self::Last => Ok(pets[pets.len().saturating_sub(n)..].to_vec()),
            Self::Random => random_select(pets, n, roll),
            Self::Health { highest } => value_select(pets, n, roll, highest, Pet::health),
            Self::Attack { highest } => value_select(pets, n, roll, highest, Pet::attack),
            Self::Strength { highest } => value_select(pets, n, roll, highest, Pet::strength),
        }
    }

    /// Name of this selector.
    #[must_use]
    pub fn name(&self) -> SelectorName {
        match self {
            Self::First => SelectorName::First,
            Self::Last => SelectorName::Last,
            Self::Random => SelectorName::Random,
            Self::Health { .. } => SelectorName::Health,
            Self::Attack { .. } => SelectorName::Attack,
            Self::Strength { .. } => SelectorName::Strength,
        }
    }

    /// Build a selector from its dict form.
    pub fn from_dict(dict: &SelectorDict) -> Result<Self, SchemaError> {
        let highest = || {
            dict.highest.ok_or(SchemaError::MissingHighest {
                selector: dict.selector.into(),
            })
        };
        Ok(match dict.selector {
            SelectorName::First => Self::First,
            SelectorName::Last => Self::Last,
            SelectorName::Random => Self::Random,
            SelectorName::Health => Self::Health { highest: highest()? },
            SelectorName::Attack => Self::Attack { highest: highest()? },
            SelectorName::Strength => Self::Strength { highest: highest()? },
        })
    }

    /// Dict form of this selector.
    #[must_use]
    pub fn to_dict(&self) -> SelectorDict {
        let highest = match *self {
            Self::Health { highest } | Self::Attack { highest } | Self::Strength { highest } => Some(highest),
            Self::First | Self::Last | Self::Random => None,
        };
        SelectorDict {
            selector: self.name(),
            highest,
        }
    }
}

fn random_select<'p>(pets: &[&'p Pet], n: usize, roll: f64) -> Result<Vec<&'p Pet>, SelectError> {
    if n >= pets.len() {
        return Ok(pets.to_vec());
    }
    let count = combination_count(pets.len(), n)?;
    // roll < 1, so the product stays below `count`; the clamp covers rounding.
    let index = ((roll * count as f64).floor() as u128).min(count - 1);
    Ok(nth_combination(pets, n, index)?)
}

fn value_select<'p>(
    pets: &[&'p Pet],
    n: usize,
    roll: f64,
    highest: bool,
    value: fn(&Pet) -> i32,
) -> Result<Vec<&'p Pet>, SelectError> {
    let mut ranked: Vec<(&'p Pet, i32)> = pets.iter().map(|&p| (p, value(p))).collect();
    // Stable: equal values keep their candidate order.
    if highest {
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
    } else {
        ranked.sort_by(|a, b| a.1.cmp(&b.1));
    }

    if n == 0 {
        return Ok(Vec::new());
    }
    if ranked.len() <= n {
        return Ok(ranked.into_iter().map(|(p, _)| p).collect());
    }

    let cutoff = ranked[n - 1].1;
    if ranked[n].1 != cutoff {
        return Ok(ranked[..n].iter().map(|&(p, _)| p).collect());
    }

    let tied: Vec<&'p Pet> = ranked.iter().filter(|(_, v)| *v == cutoff).map(|&(p, _)| p).collect();
    let mut chosen: Vec<&'p Pet> = ranked[..n].iter().filter(|(_, v)| *v != cutoff).map(|&(p, _)| p).collect();
    let needed = n - chosen.len();
    chosen.extend(random_select(&tied, needed, roll)?);
    Ok(chosen)
}

/// Selector names used in dict form.
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
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectorName {
    First,
    Last,
    Random,
    Health,
    Attack,
    Strength,
}

impl SelectorName {
    /// Check if this selector ranks by value and needs `highest`.
    #[must_use]
    pub fn is_ranked(self) -> bool {
        matches!(self, Self::Health | Self::Attack | Self::Strength)
    }
}

/// Dict form: `{selector: <Name>[, highest: bool]}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorDict {
    pub selector: SelectorName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest: Option<bool>,
}

impl TryFrom<SelectorDict> for TargetSelector {
    type Error = SchemaError;

    fn try_from(dict: SelectorDict) -> Result<Self, Self::Error> {
        Self::from_dict(&dict)
    }
}

impl From<TargetSelector> for SelectorDict {
    fn from(selector: TargetSelector) -> Self {
        selector.to_dict()
    }
}
