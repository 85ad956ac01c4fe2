//! Target filters.
//!
//! A filter narrows a candidate list relative to an owner pet. Filters keep
//! the input order, except `Ahead` and `Behind`, which order their result by
//! battlefield distance from the owner (closest first).
//!
//! Relational filters (`Friendly`, `Enemy`, `Ahead`, `Behind`, `Adjacent`)
//! need the owner to be in one of the event's teams and fail with
//! [`EventError::OwnerNotInTeams`] otherwise.
//!
//! ## Combinators
//!
//! | Filter | Empty list | Non-empty list |
//! |---|---|---|
//! | `AllOf` | input unchanged | sequential composition |
//! | `AnyOf` | empty | union, in input order |

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::core::{Event, EventError, Pet, PetId};
use crate::error::SchemaError;

/// Filter rule, independent of any owner.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FilterDict", into = "FilterDict")]
pub enum TargetFilter {
    /// Keep everything.
    None,
    /// Keep only the owner.
    SelfPet,
    /// Drop the owner.
    NotSelf,
    /// Pets on the owner's team, owner included.
    Friendly,
    /// Pets on the opposing team.
    Enemy,
    /// Pets in front of the owner, closest first.
    Ahead,
    /// Pets behind the owner, closest first.
    Behind,
    /// The immediate neighbours of the owner.
    Adjacent,
    /// Union of each child's result.
    AnyOf(Vec<TargetFilter>),
    /// Each child applied to the previous child's result.
    AllOf(Vec<TargetFilter>),
}

impl TargetFilter {
    /// Create a single filter from its name.
    #[must_use]
    pub fn from_name(name: FilterName) -> Self {
        match name {
            FilterName::None => Self::None,
            FilterName::SelfPet => Self::SelfPet,
            FilterName::NotSelf => Self::NotSelf,
            FilterName::Friendly => Self::Friendly,
            FilterName::Enemy => Self::Enemy,
            FilterName::Ahead => Self::Ahead,
            FilterName::Behind => Self::Behind,
            FilterName::Adjacent => Self::Adjacent,
        }
    }

    /// Name of a single filter; `None` for combinators.
    #[must_use]
    pub fn name(&self) -> Option<FilterName> {
        Some(match self {
            Self::None => FilterName::None,
            Self::SelfPet => FilterName::SelfPet,
            Self::NotSelf => FilterName::NotSelf,
            Self::Friendly => FilterName::Friendly,
            Self::Enemy => FilterName::Enemy,
            Self::Ahead => FilterName::Ahead,
            Self::Behind => FilterName::Behind,
            Self::Adjacent => FilterName::Adjacent,
            Self::AnyOf(_) | Self::AllOf(_) => return None,
        })
    }

    /// Apply this rule for `owner`.
    pub fn apply<'p>(
        &self,
        owner: PetId,
        pets: &[&'p Pet],
        event: &Event<'_>,
    ) -> Result<Vec<&'p Pet>, EventError> {
        match self {
            Self::None => Ok(pets.to_vec()),
            Self::SelfPet => Ok(pets.iter().copied().filter(|p| p.id == owner).collect()),
            Self::NotSelf => Ok(pets.iter().copied().filter(|p| p.id != owner).collect()),
            Self::Friendly => {
                let (friendly, _) = event.ordered_teams(owner)?;
                Ok(pets.iter().copied().filter(|p| friendly.contains(p.id)).collect())
            }
            Self::Enemy => {
                let (_, enemy) = event.ordered_teams(owner)?;
                Ok(match enemy {
                    Some(enemy) => pets.iter().copied().filter(|p| enemy.contains(p.id)).collect(),
                    None => Vec::new(),
                })
            }
            Self::Ahead => {
                let (line, idx) = locate(owner, event)?;
                Ok(pick_in_order(pets, line[idx + 1..].iter().map(|p| p.id)))
            }
            Self::Behind => {
                let (line, idx) = locate(owner, event)?;
                Ok(pick_in_order(pets, line[..idx].iter().rev().map(|p| p.id)))
            }
            Self::Adjacent => {
                let (line, idx) = locate(owner, event)?;
                let before = idx.checked_sub(1).map(|i| line[i].id);
                let after = line.get(idx + 1).map(|p| p.id);
                Ok(pets
                    .iter()
                    .copied()
                    .filter(|p| Some(p.id) == before || Some(p.id) == after)
                    .collect())
            }
            Self::AnyOf(filters) => {
                let mut kept: FxHashSet<PetId> = FxHashSet::default();
                for filter in filters {
                    kept.extend(filter.apply(owner, pets, event)?.iter().map(|p| p.id));
                }
                Ok(pets.iter().copied().filter(|p| kept.contains(&p.id)).collect())
            }
            Self::AllOf(filters) => {
                let mut current = pets.to_vec();
                for filter in filters {
                    current = filter.apply(owner, &current, event)?;
                }
                Ok(current)
            }
        }
    }

    /// Build a rule from its dict form.
    pub fn from_dict(dict: &FilterDict) -> Result<Self, SchemaError> {
        match (dict.op, dict.filter, &dict.filters) {
            (Some(FilterOp::Any), _, Some(children)) => Ok(Self::AnyOf(
                children.iter().map(Self::from_dict).collect::<Result<_, _>>()?,
            )),
            (Some(FilterOp::All), _, Some(children)) => Ok(Self::AllOf(
                children.iter().map(Self::from_dict).collect::<Result<_, _>>()?,
            )),
            (None | Some(FilterOp::Single), Some(name), _) => Ok(Self::from_name(name)),
            _ => Err(SchemaError::MissingFilter),
        }
    }

    /// Dict form of this rule.
    #[must_use]
    pub fn to_dict(&self) -> FilterDict {
        let multi = |op, children: &[TargetFilter]| FilterDict {
            filter: None,
            op: Some(op),
            filters: Some(children.iter().map(Self::to_dict).collect()),
        };
        match self {
            Self::AnyOf(children) => multi(FilterOp::Any, children),
            Self::AllOf(children) => multi(FilterOp::All, children),
            single => FilterDict {
                filter: single.name(),
                op: None,
                filters: None,
            },
        }
    }
}

/// Battlefield relative to `owner` and the owner's position in it.
fn locate<'a>(owner: PetId, event: &Event<'a>) -> Result<(crate::core::Battlefield<'a>, usize), EventError> {
    let line = event.battlefield(owner)?;
    let idx = line
        .iter()
        .position(|p| p.id == owner)
        .ok_or(EventError::OwnerNotInTeams { owner: Some(owner) })?;
    Ok((line, idx))
}

/// Candidates whose ids appear in `order`, in that order.
fn pick_in_order<'p>(pets: &[&'p Pet], order: impl Iterator<Item = PetId>) -> Vec<&'p Pet> {
    order
        .filter_map(|id| pets.iter().copied().find(|p| p.id == id))
        .collect()
}

/// A filter rule bound to its owner.
///
/// ```
/// use pet_targeting::core::{Event, EventKind, Pet, PetId, Team};
/// use pet_targeting::targets::{Filter, TargetFilter};
///
/// let friendly = Team::from_pets([
///     Pet::new(PetId(1), "ant", 2, 1),
///     Pet::new(PetId(2), "fish", 2, 3),
/// ]).unwrap();
/// let enemy = Team::from_pets([Pet::new(PetId(3), "otter", 1, 2)]).unwrap();
/// let event = Event::new(EventKind::StartOfBattle).with_teams([&friendly, &enemy]).unwrap();
///
/// let line = event.battlefield(PetId(2)).unwrap();
/// let ahead = Filter::new(PetId(2), TargetFilter::Ahead).filter(&line, &event).unwrap();
/// assert_eq!(ahead.iter().map(|p| p.id).collect::<Vec<_>>(), vec![PetId(1), PetId(3)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    /// Pet the filter is evaluated for.
    pub owner: PetId,
    /// Filter rule.
    pub rule: TargetFilter,
}

impl Filter {
    /// Bind a rule to an owner.
    #[must_use]
    pub fn new(owner: PetId, rule: TargetFilter) -> Self {
        Self { owner, rule }
    }

    /// Narrow `pets` for this owner.
    pub fn filter<'p>(&self, pets: &[&'p Pet], event: &Event<'_>) -> Result<Vec<&'p Pet>, EventError> {
        self.rule.apply(self.owner, pets, event)
    }

    /// Build a filter from its dict form.
    pub fn from_dict(dict: &FilterDict, owner: PetId) -> Result<Self, SchemaError> {
        Ok(Self::new(owner, TargetFilter::from_dict(dict)?))
    }

    /// Dict form of the rule. The owner is not part of it.
    #[must_use]
    pub fn to_dict(&self) -> FilterDict {
        self.rule.to_dict()
    }
}

/// Single filter names.
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
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterName {
    None,
    #[serde(rename = "SELF")]
    #[strum(to_string = "SELF")]
    SelfPet,
    NotSelf,
    Friendly,
    Enemy,
    Ahead,
    Behind,
    Adjacent,
}

/// Filter dict operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOp {
    /// Union.
    Any,
    /// Sequential composition.
    All,
    /// A single named filter, equivalent to omitting `op`.
    Single,
}

/// Dict form: `{filter: <Name>}` or `{op: ANY|ALL, filters: [..]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDict {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<FilterOp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<FilterDict>>,
}

impl FilterDict {
    /// Dict for a single named filter.
    #[must_use]
    pub fn single(name: FilterName) -> Self {
        Self {
            filter: Some(name),
            ..Self::default()
        }
    }
}

impl TryFrom<FilterDict> for TargetFilter {
    type Error = SchemaError;

    fn try_from(dict: FilterDict) -> Result<Self, Self::Error> {
        Self::from_dict(&dict)
    }
}

impl From<TargetFilter> for FilterDict {
    fn from(filter: TargetFilter) -> Self {
        filter.to_dict()
    }
}
