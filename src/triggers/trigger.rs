//! The trigger tree.
//!
//! A `Trigger` decides whether an ability fires for an event. Leaves test the
//! event kind, combinators join children with OR/AND, and modifiers wrap one
//! child with a relational check (`SelfPet`, `Friendly`, `Enemy`, `Ahead`)
//! or a counter (`Limit`, `Count`).
//!
//! ## Counters
//!
//! `Limit` and `Count` carry state that lives in the trigger node. Each
//! ability instance owns its own tree; cloning deep-copies the counters, and
//! [`Trigger::instantiate`] gives a fresh copy for a newly acquired pet.
//!
//! On every call a counter first resets if the event is its reset event,
//! even when the call then returns `false`. Call `is_triggered` once per
//! event per trigger: a second call consumes the counter again.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::config::{DEFAULT_COUNT, DEFAULT_LIMIT, DEFAULT_RESET_EVENT, MAX_EVENT_TEAMS};
use crate::core::{Event, EventError, EventKind, PetId};
use crate::error::SchemaError;

use super::schema::{Combinator, ModifierDict, ModifierKind, TriggerDict, TriggerOp};

/// At most `limit` activations between two reset events.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LimitCounter {
    limit: i32,
    reset_on: EventKind,
    remaining: i32,
}

impl LimitCounter {
    /// Create a counter allowing `limit` activations per reset.
    pub fn new(limit: i32, reset_on: EventKind) -> Result<Self, SchemaError> {
        if limit < 1 {
            return Err(SchemaError::InvalidCount { modifier: "limit", n: limit });
        }
        Ok(Self {
            limit,
            reset_on,
            remaining: limit,
        })
    }

    /// Activations allowed per reset.
    #[must_use]
    pub fn limit(&self) -> i32 {
        self.limit
    }

    /// Event kind that restores the counter.
    #[must_use]
    pub fn reset_on(&self) -> EventKind {
        self.reset_on
    }

    /// Activations left before the next reset.
    #[must_use]
    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    /// Restore all activations.
    pub fn reset(&mut self) {
        self.remaining = self.limit;
    }
}

impl Default for LimitCounter {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            reset_on: DEFAULT_RESET_EVENT,
            remaining: DEFAULT_LIMIT,
        }
    }
}

/// Fires on every `required`-th activation of its child.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CountCounter {
    required: i32,
    reset_on: EventKind,
    count: i32,
}

impl CountCounter {
    /// Create a counter firing on every `required`-th activation.
    pub fn new(required: i32, reset_on: EventKind) -> Result<Self, SchemaError> {
        if required < 1 {
            return Err(SchemaError::InvalidCount { modifier: "count", n: required });
        }
        Ok(Self {
            required,
            reset_on,
            count: 0,
        })
    }

    /// Activations needed per firing.
    #[must_use]
    pub fn required(&self) -> i32 {
        self.required
    }

    /// Event kind that clears the counter.
    #[must_use]
    pub fn reset_on(&self) -> EventKind {
        self.reset_on
    }

    /// Activations seen since the last firing or reset.
    #[must_use]
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Clear seen activations.
    pub fn reset(&mut self) {
        self.count = 0;
    }
}

impl Default for CountCounter {
    fn default() -> Self {
        Self {
            required: DEFAULT_COUNT,
            reset_on: DEFAULT_RESET_EVENT,
            count: 0,
        }
    }
}

/// Composable predicate over an event and an owner pet.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TriggerDict", into = "TriggerDict")]
pub enum Trigger {
    /// Never fires.
    Never,
    /// Fires on every event.
    Always,
    /// Fires when the event kind matches.
    OnEvent(EventKind),
    /// Fires when any child fires. Children are evaluated in order and
    /// evaluation stops at the first that fires.
    ///
    /// The order is the canonical order of the children's dict forms, not
    /// the authoring order, so a skipped `Limit`/`Count` child keeps its count.
    AnyOf(Vec<Trigger>),
    /// Fires when every child fires and there is at least one child.
    /// Evaluation stops at the first child that does not fire, in canonical
    /// order as for `AnyOf`.
    AllOf(Vec<Trigger>),
    /// Child fires and the event pet is the owner.
    SelfPet(Box<Trigger>),
    /// Child fires and the event pet is another pet on the owner's team.
    Friendly(Box<Trigger>),
    /// Child fires and the event pet is on the opposing team.
    Enemy(Box<Trigger>),
    /// Child fires and the event pet is the one immediately ahead of the owner.
    Ahead(Box<Trigger>),
    /// Child fires, at most `limit` times per reset.
    Limit { inner: Box<Trigger>, counter: LimitCounter },
    /// Fires on every `required`-th time the child fires.
    Count { inner: Box<Trigger>, counter: CountCounter },
}

impl From<EventKind> for Trigger {
    fn from(kind: EventKind) -> Self {
        Self::OnEvent(kind)
    }
}

impl Trigger {
    /// Fire on events of `kind`.
    #[must_use]
    pub fn on(kind: EventKind) -> Self {
        Self::OnEvent(kind)
    }

    /// OR of `children`, stored in canonical order.
    #[must_use]
    pub fn any_of(children: impl IntoIterator<Item = Trigger>) -> Self {
        Self::AnyOf(canonical_children(children))
    }

    /// AND of `children`, stored in canonical order.
    #[must_use]
    pub fn all_of(children: impl IntoIterator<Item = Trigger>) -> Self {
        Self::AllOf(canonical_children(children))
    }

    /// Require the event pet to be the owner.
    #[must_use]
    pub fn self_pet(inner: impl Into<Trigger>) -> Self {
        Self::SelfPet(Box::new(inner.into()))
    }

    /// Require the event pet to be another pet on the owner's team.
    #[must_use]
    pub fn friendly(inner: impl Into<Trigger>) -> Self {
        Self::Friendly(Box::new(inner.into()))
    }

    /// Require the event pet to be on the opposing team.
    #[must_use]
    pub fn enemy(inner: impl Into<Trigger>) -> Self {
        Self::Enemy(Box::new(inner.into()))
    }

    /// Require the event pet to be immediately ahead of the owner.
    #[must_use]
    pub fn ahead(inner: impl Into<Trigger>) -> Self {
        Self::Ahead(Box::new(inner.into()))
    }

    /// Cap activations with `counter`.
    #[must_use]
    pub fn limit(inner: impl Into<Trigger>, counter: LimitCounter) -> Self {
        Self::Limit {
            inner: Box::new(inner.into()),
            counter,
        }
    }

    /// Fire on every n-th activation, as configured by `counter`.
    #[must_use]
    pub fn count(inner: impl Into<Trigger>, counter: CountCounter) -> Self {
        Self::Count {
            inner: Box::new(inner.into()),
            counter,
        }
    }

    /// At most `n` activations per turn.
    pub fn limit_per_turn(inner: impl Into<Trigger>, n: i32) -> Result<Self, SchemaError> {
        Ok(Self::limit(inner, LimitCounter::new(n, DEFAULT_RESET_EVENT)?))
    }

    /// Every `n`-th activation within a turn.
    pub fn every_nth(inner: impl Into<Trigger>, n: i32) -> Result<Self, SchemaError> {
        Ok(Self::count(inner, CountCounter::new(n, DEFAULT_RESET_EVENT)?))
    }

    /// Evaluate the trigger for `event` from the point of view of `owner`.
    ///
    /// Updates `Limit`/`Count` counters along the evaluated path. Fails only
    /// for `Enemy` and `Ahead` when the event carries two teams and neither
    /// contains the owner.
    pub fn is_triggered(&mut self, event: &Event<'_>, owner: Option<PetId>) -> Result<bool, EventError> {
        match self {
            Self::Never => Ok(false),
            Self::Always => Ok(true),
            Self::OnEvent(kind) => Ok(event.kind == *kind),
            Self::AnyOf(children) => {
                for child in children.iter_mut() {
                    if child.is_triggered(event, owner)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::AllOf(children) => {
                for child in children.iter_mut() {
                    if !child.is_triggered(event, owner)? {
                        return Ok(false);
                    }
                }
                Ok(!children.is_empty())
            }
            Self::SelfPet(inner) => {
                Ok(inner.is_triggered(event, owner)? && owner.is_some() && owner == event.pet)
            }
            Self::Friendly(inner) => Ok(inner.is_triggered(event, owner)? && is_friendly(event, owner)),
            Self::Enemy(inner) => {
                if !inner.is_triggered(event, owner)? {
                    return Ok(false);
                }
                is_enemy(event, owner)
            }
            Self::Ahead(inner) => {
                if !inner.is_triggered(event, owner)? {
                    return Ok(false);
                }
                is_ahead(event, owner)
            }
            Self::Limit { inner, counter } => {
                if event.kind == counter.reset_on {
                    counter.reset();
                    trace!(reset_on = %counter.reset_on, limit = counter.limit, "limit reset");
                }
                if counter.remaining <= 0 {
                    trace!(event = %event.kind, "limit exhausted");
                    return Ok(false);
                }
                let fired = inner.is_triggered(event, owner)?;
                if fired {
                    counter.remaining -= 1;
                }
                Ok(fired)
            }
            Self::Count { inner, counter } => {
                if event.kind == counter.reset_on {
                    counter.reset();
                    trace!(reset_on = %counter.reset_on, "count reset");
                }
                if !inner.is_triggered(event, owner)? {
                    return Ok(false);
                }
                counter.count += 1;
                if counter.count >= counter.required {
                    counter.reset();
                    trace!(event = %event.kind, required = counter.required, "count reached");
                    return Ok(true);
                }
                Ok(false)
            }
        }
    }

    /// Restore every counter in the tree to its initial value.
    pub fn reset(&mut self) {
        match self {
            Self::Never | Self::Always | Self::OnEvent(_) => {}
            Self::AnyOf(children) | Self::AllOf(children) => children.iter_mut().for_each(Self::reset),
            Self::SelfPet(inner) | Self::Friendly(inner) | Self::Enemy(inner) | Self::Ahead(inner) => inner.reset(),
            Self::Limit { inner, counter } => {
                counter.reset();
                inner.reset();
            }
            Self::Count { inner, counter } => {
                counter.reset();
                inner.reset();
            }
        }
    }

    /// Independent copy of this trigger with fresh counters.
    #[must_use]
    pub fn instantiate(&self) -> Self {
        let mut copy = self.clone();
        copy.reset();
        copy
    }

    /// Build a trigger from its dict form.
    ///
    /// The base is chosen by precedence: `event`, then `op: ANY|ALL` with
    /// `triggers`, then `op: true|false`. Modifiers are sorted and folded on
    /// innermost first.
    pub fn from_dict(dict: &TriggerDict) -> Result<Self, SchemaError> {
        let mut trigger = match (dict.event, dict.op, &dict.triggers) {
            (Some(kind), _, _) => Self::OnEvent(kind),
            (None, Some(TriggerOp::Combine(op)), Some(children)) => {
                let children = children.iter().map(Self::from_dict).collect::<Result<Vec<_>, _>>()?;
                match op {
                    Combinator::Any => Self::any_of(children),
                    Combinator::All => Self::all_of(children),
                }
            }
            (None, Some(TriggerOp::Constant(true)), _) => Self::Always,
            (None, Some(TriggerOp::Constant(false)), _) => Self::Never,
            _ => return Err(SchemaError::MissingTriggerBase),
        };

        let mut modifiers = dict.modifiers.clone();
        modifiers.sort();
        for modifier in &modifiers {
            trigger = trigger.with_modifier(modifier)?;
        }
        Ok(trigger)
    }

    /// Wrap this trigger in the modifier described by `modifier`.
    pub fn with_modifier(self, modifier: &ModifierDict) -> Result<Self, SchemaError> {
        let name: &'static str = modifier.kind.into();
        let counted = || -> Result<(i32, EventKind), SchemaError> {
            let n = modifier.n.ok_or(SchemaError::MissingCount { modifier: name })?;
            let reset_on = modifier
                .reset_event
                .ok_or(SchemaError::MissingResetEvent { modifier: name })?;
            Ok((n, reset_on))
        };
        Ok(match modifier.kind {
            ModifierKind::SelfPet => Self::self_pet(self),
            ModifierKind::Friendly => Self::friendly(self),
            ModifierKind::Enemy => Self::enemy(self),
            ModifierKind::Ahead => Self::ahead(self),
            ModifierKind::Limit => {
                let (n, reset_on) = counted()?;
                Self::limit(self, LimitCounter::new(n, reset_on)?)
            }
            ModifierKind::Count => {
                let (n, reset_on) = counted()?;
                Self::count(self, CountCounter::new(n, reset_on)?)
            }
        })
    }

    /// Dict form of this trigger. Counter state is not part of it.
    #[must_use]
    pub fn to_dict(&self) -> TriggerDict {
        let children = |ts: &[Trigger]| -> Vec<TriggerDict> { ts.iter().map(Self::to_dict).collect() };
        match self {
            Self::Never => TriggerDict::constant(false),
            Self::Always => TriggerDict::constant(true),
            Self::OnEvent(kind) => TriggerDict::event(*kind),
            Self::AnyOf(ts) => TriggerDict::combine(Combinator::Any, children(ts)),
            Self::AllOf(ts) => TriggerDict::combine(Combinator::All, children(ts)),
            Self::SelfPet(inner) => inner.to_dict().with_modifier(ModifierDict::plain(ModifierKind::SelfPet)),
            Self::Friendly(inner) => inner.to_dict().with_modifier(ModifierDict::plain(ModifierKind::Friendly)),
            Self::Enemy(inner) => inner.to_dict().with_modifier(ModifierDict::plain(ModifierKind::Enemy)),
            Self::Ahead(inner) => inner.to_dict().with_modifier(ModifierDict::plain(ModifierKind::Ahead)),
            Self::Limit { inner, counter } => inner.to_dict().with_modifier(ModifierDict::counted(
                ModifierKind::Limit,
                counter.limit,
                counter.reset_on,
            )),
            Self::Count { inner, counter } => inner.to_dict().with_modifier(ModifierDict::counted(
                ModifierKind::Count,
                counter.required,
                counter.reset_on,
            )),
        }
    }
}

fn canonical_children(children: impl IntoIterator<Item = Trigger>) -> Vec<Trigger> {
    let mut children: Vec<Trigger> = children.into_iter().collect();
    children.sort_by_cached_key(Trigger::to_dict);
    children
}

/// Event pet is a different pet on the owner's team. Missing teams read as
/// "not friendly".
fn is_friendly(event: &Event<'_>, owner: Option<PetId>) -> bool {
    let (Some(owner), Some(pet)) = (owner, event.pet) else {
        return false;
    };
    if owner == pet {
        return false;
    }
    match event.ordered_teams(owner) {
        Ok((friendly, _)) => friendly.contains(pet),
        Err(_) => false,
    }
}

fn is_enemy(event: &Event<'_>, owner: Option<PetId>) -> Result<bool, EventError> {
    let &[first, second] = event.teams() else {
        return Ok(false);
    };
    let enemy = match owner {
        Some(id) if first.contains(id) => second,
        Some(id) if second.contains(id) => first,
        _ => return Err(EventError::OwnerNotInTeams { owner }),
    };
    Ok(event.pet.is_some_and(|pet| enemy.contains(pet)))
}

/// Only the nearest pet in front of the owner counts.
fn is_ahead(event: &Event<'_>, owner: Option<PetId>) -> Result<bool, EventError> {
    let Some(owner) = owner else {
        return Ok(false);
    };
    if event.teams().is_empty() {
        return Ok(false);
    }
    let line = match event.battlefield(owner) {
        Ok(line) => line,
        Err(err) if event.teams().len() == MAX_EVENT_TEAMS => return Err(err),
        Err(_) => return Ok(false),
    };
    let ahead = line
        .iter()
        .position(|p| p.id == owner)
        .and_then(|idx| line.get(idx + 1));
    Ok(matches!((ahead, event.pet), (Some(next), Some(pet)) if next.id == pet))
}

impl TryFrom<TriggerDict> for Trigger {
    type Error = SchemaError;

    fn try_from(dict: TriggerDict) -> Result<Self, Self::Error> {
        Self::from_dict(&dict)
    }
}

impl From<Trigger> for TriggerDict {
    fn from(trigger: Trigger) -> Self {
        trigger.to_dict()
    }
}
