//! Ability bindings.
//!
//! An [`Ability`] ties one trigger to one target generator for one owner. The
//! battle loop offers every event to every ability once; when the trigger
//! fires the ability returns its targets, and applying the effect to them is
//! up to the caller.
//!
//! ```
//! use pet_targeting::abilities::Ability;
//! use pet_targeting::core::{Event, EventKind, Pet, PetId, Team};
//! use pet_targeting::targets::{TargetFilter, TargetGenerator, TargetSelector};
//! use pet_targeting::triggers::Trigger;
//!
//! // Ant: on faint, pick one random friend.
//! let targets = TargetGenerator::new(PetId(1), TargetSelector::Random)
//!     .with_filter(TargetFilter::AllOf(vec![TargetFilter::Friendly, TargetFilter::NotSelf]));
//! let mut ant = Ability::new(PetId(1), Trigger::self_pet(EventKind::Faint), targets);
//!
//! let team = Team::from_pets([
//!     Pet::new(PetId(1), "ant", 2, 1),
//!     Pet::new(PetId(2), "fish", 2, 3),
//! ]).unwrap();
//! let event = Event::new(EventKind::Faint).with_pet(PetId(1)).with_teams([&team]).unwrap();
//!
//! let picked = ant.resolve(&event, 0.3).unwrap().unwrap();
//! assert_eq!(picked[0].id, PetId(2));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Event, Pet, PetId};
use crate::error::Error;
use crate::targets::{TargetGenerator, TargetGeneratorDict};
use crate::triggers::{Trigger, TriggerDict};

fn default_max_targets() -> i32 {
    1
}

/// One pet's ability: when to fire and whom to affect.
#[derive(Clone, Debug, PartialEq)]
pub struct Ability {
    pub owner: PetId,
    pub trigger: Trigger,
    pub targets: TargetGenerator,
    /// Number of targets requested from the generator.
    pub max_targets: i32,
}

impl Ability {
    /// Bind `trigger` and `targets` to `owner`, with one target.
    ///
    /// The generator is re-bound to `owner`.
    #[must_use]
    pub fn new(owner: PetId, trigger: Trigger, mut targets: TargetGenerator) -> Self {
        targets.filter.owner = owner;
        Self {
            owner,
            trigger,
            targets,
            max_targets: default_max_targets(),
        }
    }

    /// Set the number of targets (builder pattern).
    #[must_use]
    pub fn with_max_targets(mut self, max_targets: i32) -> Self {
        self.max_targets = max_targets;
        self
    }

    /// Offer `event` to this ability.
    ///
    /// Evaluates the trigger exactly once. Returns `None` when it does not
    /// fire, otherwise the targets generated with the roll `rand`.
    pub fn resolve<'a>(&mut self, event: &Event<'a>, rand: f64) -> Result<Option<Vec<&'a Pet>>, Error> {
        if !self.trigger.is_triggered(event, Some(self.owner))? {
            return Ok(None);
        }
        let targets = self.targets.get(event, self.max_targets, rand)?;
        debug!(owner = %self.owner, event = %event.kind, targets = targets.len(), "ability fired");
        Ok(Some(targets))
    }

    /// Copy of this ability for a newly acquired pet, with fresh counters.
    #[must_use]
    pub fn instantiate(&self, owner: PetId) -> Self {
        Self::new(owner, self.trigger.instantiate(), self.targets.clone()).with_max_targets(self.max_targets)
    }

    /// Build an ability for `owner` from its dict form.
    pub fn from_dict(dict: &AbilityDict, owner: PetId) -> Result<Self, Error> {
        let trigger = Trigger::from_dict(&dict.trigger)?;
        let targets = TargetGenerator::from_dict(&dict.targets, owner)?;
        Ok(Self::new(owner, trigger, targets).with_max_targets(dict.max_targets))
    }

    /// Dict form of this ability.
    #[must_use]
    pub fn to_dict(&self) -> AbilityDict {
        AbilityDict {
            trigger: self.trigger.to_dict(),
            targets: self.targets.to_dict(),
            max_targets: self.max_targets,
        }
    }
}

/// Dict form: `{trigger, targets, max_targets}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDict {
    pub trigger: TriggerDict,
    pub targets: TargetGeneratorDict,
    #[serde(default = "default_max_targets")]
    pub max_targets: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EventError, EventKind, Team};
    use crate::targets::{TargetFilter, TargetSelector};
    use crate::triggers::LimitCounter;

    fn pet(id: u32, attack: i32) -> Pet {
        Pet::new(PetId(id), format!("pet{}", id), attack, 1)
    }

    #[test]
    fn test_resolve_only_when_triggered() {
        let a = Team::from_pets([pet(1, 1), pet(2, 2)]).unwrap();
        let b = Team::from_pets([pet(3, 5), pet(4, 3)]).unwrap();
        let targets = TargetGenerator::new(PetId(2), TargetSelector::Attack { highest: true })
            .with_filter(TargetFilter::Enemy);
        let mut ability = Ability::new(PetId(2), Trigger::on(EventKind::StartOfBattle), targets);

        let event = Event::new(EventKind::StartOfBattle).with_teams([&a, &b]).unwrap();
        let picked = ability.resolve(&event, 0.0).unwrap().unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, PetId(3));

        let event = Event::new(EventKind::Hurt).with_teams([&a, &b]).unwrap();
        assert!(ability.resolve(&event, 0.0).unwrap().is_none());
    }

    #[test]
    fn test_new_rebinds_owner() {
        let targets = TargetGenerator::new(PetId(9), TargetSelector::First);
        let ability = Ability::new(PetId(1), Trigger::Always, targets);
        assert_eq!(ability.targets.owner(), PetId(1));
    }

    #[test]
    fn test_instantiate_is_independent() {
        let team = Team::from_pets([pet(1, 1), pet(2, 1)]).unwrap();
        let event = Event::new(EventKind::None).with_teams([&team]).unwrap();
        let trigger = Trigger::limit(Trigger::Always, LimitCounter::new(1, EventKind::StartOfTurn).unwrap());
        let mut first = Ability::new(PetId(1), trigger, TargetGenerator::new(PetId(1), TargetSelector::First));

        assert!(first.resolve(&event, 0.0).unwrap().is_some());
        assert!(first.resolve(&event, 0.0).unwrap().is_none());

        let mut second = first.instantiate(PetId(2));
        assert_eq!(second.owner, PetId(2));
        assert!(second.resolve(&event, 0.0).unwrap().is_some());
    }

    #[test]
    fn test_trigger_errors_propagate() {
        let a = Team::from_pets([pet(1, 1)]).unwrap();
        let b = Team::from_pets([pet(2, 1)]).unwrap();
        let event = Event::new(EventKind::Hurt).with_pet(PetId(2)).with_teams([&a, &b]).unwrap();
        let mut ability = Ability::new(
            PetId(7),
            Trigger::enemy(EventKind::Hurt),
            TargetGenerator::new(PetId(7), TargetSelector::First),
        );
        assert_eq!(
            ability.resolve(&event, 0.0),
            Err(Error::Event(EventError::OwnerNotInTeams { owner: Some(PetId(7)) }))
        );
    }

    #[test]
    fn test_dict_default_max_targets() {
        let json = r#"{
            "trigger": {"event": "HURT", "modifiers": [{"type": "self"}]},
            "targets": {
                "target_generator": "BATTLEFIELD",
                "filter": {"filter": "ENEMY"},
                "selector": {"selector": "RANDOM"}
            }
        }"#;
        let dict: AbilityDict = serde_json::from_str(json).unwrap();
        assert_eq!(dict.max_targets, 1);

        let ability = Ability::from_dict(&dict, PetId(4)).unwrap();
        assert_eq!(ability.trigger, Trigger::self_pet(EventKind::Hurt));
        assert_eq!(ability.targets.filter.rule, TargetFilter::Enemy);
        assert_eq!(ability.to_dict(), dict);
    }
}
