//! Dict form of triggers.
//!
//! ```json
//! {"event": "FAINT", "modifiers": [{"type": "friendly"}, {"type": "count", "n": 2, "reset_event": "START_OF_TURN"}]}
//! {"op": "ANY", "triggers": [{"event": "LEVEL_UP", "modifiers": [{"type": "self"}]}]}
//! {"op": true}
//! ```
//!
//! Modifiers are unordered in the dict. They are sorted before they are
//! folded onto the base trigger, innermost first, so any permutation of the
//! same list builds the same trigger and writes back the same sorted list.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::core::EventKind;

/// Combinator names for `op`.
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
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Combinator {
    Any,
    All,
}

/// Value of `op`: a constant or a combinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerOp {
    Constant(bool),
    Combine(Combinator),
}

/// Modifier types, in canonical application order.
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
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModifierKind {
    Ahead,
    Count,
    Enemy,
    Friendly,
    Limit,
    #[serde(rename = "self")]
    #[strum(to_string = "self")]
    SelfPet,
}

impl ModifierKind {
    /// Check if this modifier carries a counter.
    #[must_use]
    pub fn is_counted(self) -> bool {
        matches!(self, Self::Limit | Self::Count)
    }
}

/// One entry of `modifiers`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModifierDict {
    #[serde(rename = "type")]
    pub kind: ModifierKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_event: Option<EventKind>,
}

impl ModifierDict {
    /// A relational modifier (`self`, `friendly`, `enemy`, `ahead`).
    #[must_use]
    pub fn plain(kind: ModifierKind) -> Self {
        Self {
            kind,
            n: None,
            reset_event: None,
        }
    }

    /// A counting modifier (`limit`, `count`).
    #[must_use]
    pub fn counted(kind: ModifierKind, n: i32, reset_event: EventKind) -> Self {
        Self {
            kind,
            n: Some(n),
            reset_event: Some(reset_event),
        }
    }
}

/// Dict form of a trigger.
///
/// Ordered so that combinator children can be stored canonically.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriggerDict {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<TriggerOp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<TriggerDict>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<ModifierDict>,
}

impl TriggerDict {
    /// `{event: kind}`.
    #[must_use]
    pub fn event(kind: EventKind) -> Self {
        Self {
            event: Some(kind),
            ..Self::default()
        }
    }

    /// `{op: true|false}`.
    #[must_use]
    pub fn constant(value: bool) -> Self {
        Self {
            op: Some(TriggerOp::Constant(value)),
            ..Self::default()
        }
    }

    /// `{op: ANY|ALL, triggers: [..]}`.
    #[must_use]
    pub fn combine(op: Combinator, triggers: Vec<TriggerDict>) -> Self {
        Self {
            op: Some(TriggerOp::Combine(op)),
            triggers: Some(triggers),
            ..Self::default()
        }
    }

    /// Append a modifier (builder pattern).
    #[must_use]
    pub fn with_modifier(mut self, modifier: ModifierDict) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Copy of this dict with every modifier list sorted, recursively.
    #[must_use]
    pub fn canonical(&self) -> Self {
        let mut dict = self.clone();
        dict.modifiers.sort();
        if let Some(children) = &mut dict.triggers {
            for child in children.iter_mut() {
                *child = child.canonical();
            }
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_modifier_order_is_alphabetical() {
        // Derived `Ord` must agree with the name order.
        let names: Vec<String> = ModifierKind::iter().map(|k| k.to_string()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(ModifierKind::from_str("self").unwrap(), ModifierKind::SelfPet);
    }

    #[test]
    fn test_op_json_forms() {
        let dict: TriggerDict = serde_json::from_str(r#"{"op": false}"#).unwrap();
        assert_eq!(dict, TriggerDict::constant(false));

        let dict: TriggerDict = serde_json::from_str(r#"{"op": "ALL", "triggers": []}"#).unwrap();
        assert_eq!(dict, TriggerDict::combine(Combinator::All, vec![]));

        assert!(serde_json::from_str::<TriggerDict>(r#"{"op": "XOR"}"#).is_err());
    }

    #[test]
    fn test_modifier_json_forms() {
        let m: ModifierDict = serde_json::from_str(r#"{"type": "self"}"#).unwrap();
        assert_eq!(m, ModifierDict::plain(ModifierKind::SelfPet));

        let m: ModifierDict =
            serde_json::from_str(r#"{"type": "limit", "n": 2, "reset_event": "END_TURN"}"#).unwrap();
        assert_eq!(m, ModifierDict::counted(ModifierKind::Limit, 2, EventKind::EndOfTurn));
        assert_eq!(
            serde_json::to_string(&m).unwrap(),
            r#"{"type":"limit","n":2,"reset_event":"END_OF_TURN"}"#
        );
    }

    #[test]
    fn test_canonical_sorts_nested_modifiers() {
        let child = TriggerDict::event(EventKind::Faint)
            .with_modifier(ModifierDict::plain(ModifierKind::SelfPet))
            .with_modifier(ModifierDict::plain(ModifierKind::Ahead));
        let dict = TriggerDict::combine(Combinator::Any, vec![child]);

        let canonical = dict.canonical();
        let kinds: Vec<_> = canonical.triggers.unwrap()[0].modifiers.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![ModifierKind::Ahead, ModifierKind::SelfPet]);
    }
}
