//! The recomputation pass.
//!
//! Whenever the host changes an actor or one of its items it hands a
//! snapshot to [`EncumbranceEngine::derive`], which:
//! 1. Derives slot values for every item
//! 2. Tallies the inventory against the actor's capacity
//! 3. Resolves movement speed (characters only)
//! 4. Recomputes the condition modifier
//!
//! The pass is pure and idempotent. Running it twice on the same snapshot
//! yields the same state. A pass that fails leaves the actor untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conditions::condition_penalty;
use crate::config::{ConfigError, EncumbranceConfig};
use crate::encumbrance::{capacity, inventory_state, tally};
use crate::movement::resolve_movement;
use crate::notice::{deliver, Audience, Notice};
use crate::slots::{prepare_items, prepare_loose_item};
use crate::world::{Actor, ActorKind, InventoryState, Item};

/// Malformed input the host should never hand over.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Item '{item}' has no quantity")]
    MissingQuantity { item: String },

    #[error("Actor '{actor}' has no ability scores")]
    MissingScores { actor: String },

    #[error("Slot count of '{item}' does not fit in an i32")]
    SlotOverflow { item: String },

    #[error("Invalid rule options: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    pub(crate) fn slot_overflow(item: &Item) -> Self {
        EngineError::SlotOverflow {
            item: item.name.clone(),
        }
    }
}

/// Outcome of one recomputation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derivation {
    /// New carrying state, `None` for actors without an inventory.
    pub inventory: Option<InventoryState>,
    /// New movement rate, `None` when movement was not recomputed.
    pub movement: Option<u32>,
    pub modifier: i32,
    /// Whether the stored modifier needs writing back.
    pub modifier_changed: bool,
    /// Notices to show the audience.
    pub notices: Vec<Notice>,
}

/// Stateless encumbrance engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncumbranceEngine;

impl EncumbranceEngine {
    pub fn new() -> Self {
        Self
    }

    /// Recompute all derived data of `actor` in place.
    ///
    /// Nothing is written back unless the whole pass succeeds.
    pub fn derive(
        &self,
        actor: &mut Actor,
        config: &EncumbranceConfig,
        audience: Audience,
    ) -> Result<Derivation, EngineError> {
        config.validate()?;

        let mut next = actor.clone();
        if next.kind == ActorKind::Monster {
            for item in next.items.iter_mut() {
                item.equipped = false;
            }
        }

        prepare_items(&mut next.items, config.coins_per_slot)?;

        let mut raised = Vec::new();
        let mut inventory = None;
        let mut movement = None;

        if next.kind.is_character_like() {
            let tally = tally(&next.items, config)?;
            raised.extend(tally.notices());

            let max = capacity(&next, config)?;
            let state = inventory_state(&tally, max, config);

            if next.kind != ActorKind::Monster {
                let speed = resolve_movement(&next.items, &state, config);
                if state.encumbered {
                    raised.push(Notice::Encumbered);
                }
                next.movement.base = speed;
                movement = Some(speed);
            }

            tracing::debug!(
                actor = %next.name,
                value = state.value,
                max = state.max,
                held = tally.held_items,
                worn_armor = tally.worn_armor,
                encumbered = state.encumbered,
                "inventory derived"
            );
            next.inventory = Some(state.clone());
            inventory = Some(state);
        }

        let modifier = condition_penalty(&next.items);
        let modifier_changed = modifier != next.modifier;
        if modifier_changed {
            tracing::debug!(actor = %next.name, old = next.modifier, new = modifier, "modifier changed");
            next.modifier = modifier;
        }

        *actor = next;
        Ok(Derivation {
            inventory,
            movement,
            modifier,
            modifier_changed,
            notices: deliver(&raised, config, audience),
        })
    }

    /// Derive slot values for an item outside any actor.
    pub fn prepare_item(&self, item: &mut Item, config: &EncumbranceConfig) -> Result<(), EngineError> {
        config.validate()?;
        prepare_loose_item(item, config.coins_per_slot)
    }
}
