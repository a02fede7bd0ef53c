//! Condition penalties and how they apply to rolls.
//!
//! Conditions are pseudo-items that take up slots. Their combined weight,
//! negated, is the actor's roll modifier. The modifier is handed to each
//! roll explicitly through [`RollRequest`].

use serde::{Deserialize, Serialize};

use crate::world::{Actor, Item, ItemKind};

/// Sum the slots of every condition and negate it.
pub fn condition_penalty(items: &[Item]) -> i32 {
    let burden: i32 = items
        .iter()
        .filter(|i| i.kind == ItemKind::Condition)
        .map(Item::stack_slots)
        .sum();
    -burden
}

/// Kind of roll a modifier is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollKind {
    /// Roll-under checks: a penalty raises the target.
    Check,
    Save,
    Attack,
}

/// Situational bonus for a roll of the given kind.
pub fn situational_bonus(modifier: i32, kind: RollKind) -> i32 {
    match kind {
        RollKind::Check => -modifier,
        RollKind::Save | RollKind::Attack => modifier,
    }
}

/// A roll about to be made, carrying the modifier it should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    pub kind: RollKind,
    pub modifier: i32,
}

impl RollRequest {
    pub fn new(kind: RollKind) -> Self {
        Self { kind, modifier: 0 }
    }

    /// A roll for `actor` using its stored condition modifier.
    pub fn for_actor(actor: &Actor, kind: RollKind) -> Self {
        Self::new(kind).with_modifier(actor.modifier)
    }

    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn bonus(&self) -> i32 {
        situational_bonus(self.modifier, self.kind)
    }
}
