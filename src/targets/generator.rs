//! Target generation.
//!
//! A `TargetGenerator` is what ability code calls once a trigger fires. It
//! builds the candidate pool from the event's teams, narrows it with its
//! [`Filter`] and picks from the rest with its [`TargetSelector`].
//!
//! ```
//! use pet_targeting::core::{Event, EventKind, Pet, PetId, Team};
//! use pet_targeting::targets::{TargetFilter, TargetGenerator, TargetSelector};
//!
//! let friendly = Team::from_pets([
//!     Pet::new(PetId(1), "ant", 2, 1),
//!     Pet::new(PetId(2), "fish", 2, 3),
//! ]).unwrap();
//! let enemy = Team::from_pets([Pet::new(PetId(3), "otter", 1, 2)]).unwrap();
//! let event = Event::new(EventKind::Faint).with_pet(PetId(2)).with_teams([&friendly, &enemy]).unwrap();
//!
//! let targets = TargetGenerator::new(PetId(2), TargetSelector::First)
//!     .with_filter(TargetFilter::AllOf(vec![TargetFilter::Friendly, TargetFilter::NotSelf]));
//! let picked = targets.get(&event, 1, 0.0).unwrap();
//! assert_eq!(picked[0].id, PetId(1));
//! ```

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::debug;

use crate::core::{Event, Pet, PetId};
use crate::error::{Error, SchemaError};

use super::filter::{Filter, FilterDict, TargetFilter};
use super::selector::{SelectorDict, TargetSelector};

/// Where a generator draws its candidates from.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GeneratorKind {
    /// Every pet on the battlefield, as `reverse(friendly) + enemy`.
    #[default]
    Battlefield,
}

/// Filter plus selector over a candidate pool, bound to one owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetGenerator {
    pub kind: GeneratorKind,
    pub filter: Filter,
    pub selector: TargetSelector,
}

impl TargetGenerator {
    /// Create a battlefield generator with no filtering.
    #[must_use]
    pub fn new(owner: PetId, selector: TargetSelector) -> Self {
        Self {
            kind: GeneratorKind::Battlefield,
            filter: Filter::new(owner, TargetFilter::None),
            selector,
        }
    }

    /// Set the filter rule (builder pattern).
    #[must_use]
    pub fn with_filter(mut self, rule: TargetFilter) -> Self {
        self.filter.rule = rule;
        self
    }

    /// Pet the generator targets for.
    #[must_use]
    pub fn owner(&self) -> PetId {
        self.filter.owner
    }

    /// Candidate pool for `event`, before filtering.
    pub fn candidates<'a>(&self, event: &Event<'a>) -> Result<Vec<&'a Pet>, Error> {
        match self.kind {
            GeneratorKind::Battlefield => Ok(event.battlefield(self.owner())?.into_vec()),
        }
    }

    /// Generate up to `n` targets for `event` using the roll `rand`.
    pub fn get<'a>(&self, event: &Event<'a>, n: i32, rand: f64) -> Result<Vec<&'a Pet>, Error> {
        let pool = self.candidates(event)?;
        let filtered = self.filter.filter(&pool, event)?;
        let picked = self.selector.select(&filtered, n, rand)?;
        debug!(
            owner = %self.owner(),
            event = %event.kind,
            pool = pool.len(),
            filtered = filtered.len(),
            picked = picked.len(),
            "generated targets"
        );
        Ok(picked)
    }

    /// Build a generator from its dict form.
    pub fn from_dict(dict: &TargetGeneratorDict, owner: PetId) -> Result<Self, SchemaError> {
        Ok(Self {
            kind: dict.target_generator,
            filter: Filter::from_dict(&dict.filter, owner)?,
            selector: TargetSelector::from_dict(&dict.selector)?,
        })
    }

    /// Dict form of this generator.
    #[must_use]
    pub fn to_dict(&self) -> TargetGeneratorDict {
        TargetGeneratorDict {
            target_generator: self.kind,
            filter: self.filter.to_dict(),
            selector: self.selector.to_dict(),
        }
    }
}

/// Dict form: `{target_generator, filter, selector}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGeneratorDict {
    pub target_generator: GeneratorKind,
    pub filter: FilterDict,
    pub selector: SelectorDict,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EventError, EventKind, Team};
    use crate::error::ErrorSeverity;
    use crate::targets::filter::FilterName;
    use crate::targets::selector::{SelectError, SelectorName};

    fn pet(id: u32, health: i32) -> Pet {
        Pet::new(PetId(id), format!("pet{}", id), 1, health)
    }

    fn teams() -> (Team, Team) {
        (
            Team::from_pets([pet(1, 1), pet(2, 2), pet(3, 3)]).unwrap(),
            Team::from_pets([pet(4, 4), pet(5, 5)]).unwrap(),
        )
    }

    #[test]
    fn test_pool_is_linearized_battlefield() {
        let (a, b) = teams();
        let event = Event::new(EventKind::StartOfBattle).with_teams([&a, &b]).unwrap();
        let generator = TargetGenerator::new(PetId(1), TargetSelector::First);
        let picked = generator.get(&event, 10, 0.0).unwrap();
        let ids: Vec<u32> = picked.iter().map(|p| p.id.raw()).collect();
        assert_eq!(ids, vec![3, 2, 1, 4, 5]);
    }

    #[test]
    fn test_filter_then_select() {
        let (a, b) = teams();
        let event = Event::new(EventKind::StartOfBattle).with_teams([&a, &b]).unwrap();
        let generator = TargetGenerator::new(PetId(1), TargetSelector::Health { highest: false })
            .with_filter(TargetFilter::Enemy);
        let picked = generator.get(&event, 1, 0.5).unwrap();
        assert_eq!(picked[0].id, PetId(4));
    }

    #[test]
    fn test_errors_propagate() {
        let (a, b) = teams();
        let event = Event::new(EventKind::StartOfBattle).with_teams([&a, &b]).unwrap();

        let missing = TargetGenerator::new(PetId(9), TargetSelector::First);
        let err = missing.get(&event, 1, 0.0).unwrap_err();
        assert_eq!(err, Error::Event(EventError::OwnerNotInTeams { owner: Some(PetId(9)) }));
        assert_eq!(err.severity(), ErrorSeverity::Precondition);

        let generator = TargetGenerator::new(PetId(1), TargetSelector::Random);
        let err = generator.get(&event, 1, 1.5).unwrap_err();
        assert_eq!(err, Error::Select(SelectError::RollOutOfRange { roll: 1.5 }));
    }

    #[test]
    fn test_dict_round_trip() {
        let dict = TargetGeneratorDict {
            target_generator: GeneratorKind::Battlefield,
            filter: FilterDict::single(FilterName::Adjacent),
            selector: SelectorDict { selector: SelectorName::Strength, highest: Some(true) },
        };
        let generator = TargetGenerator::from_dict(&dict, PetId(3)).unwrap();
        assert_eq!(generator.owner(), PetId(3));
        assert_eq!(generator.filter.rule, TargetFilter::Adjacent);
        assert_eq!(generator.to_dict(), dict);
    }
}
