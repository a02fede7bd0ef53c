//! Slot cost of single items, stacks and containers.
//!
//! Every item gets two derived numbers:
//! - `slots`: what one unit costs
//! - `total_slots`: what the whole stack costs, or for a container, what
//!   its contents cost
//!
//! Unit slots of every item are resolved before any totals so that a
//! container sees the resolved cost of what it holds.

use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::world::{Item, ItemKind};

/// Weight units per slot for ordinary gear.
pub const WEIGHT_PER_SLOT: f64 = 100.0;

/// Weight units per slot for body armor. Armor is easier to carry when worn.
pub const ARMOR_WEIGHT_PER_SLOT: f64 = 200.0;

/// Resolve the slot cost of a single unit of `item`.
///
/// Returns `None` for abilities and spells.
pub fn resolve_unit_slots(item: &Item, coins_per_slot: u32) -> Option<i32> {
    if item.kind.is_slotless() {
        return None;
    }

    match item.slots_declared {
        None => Some(derive_unit_slots(item, coins_per_slot)),
        // An empty container still has a footprint of its own
        Some(0) if item.kind == ItemKind::Container => Some(1),
        Some(declared) => Some(declared),
    }
}

fn derive_unit_slots(item: &Item, coins_per_slot: u32) -> i32 {
    let weight = item.weight.filter(|w| *w > 0.0);
    let cost = item.cost.filter(|c| *c > 0.0);

    match (item.kind, weight, cost) {
        (_, None, _) => 1,
        (ItemKind::Treasure, Some(_), Some(cost)) => (cost / coins_per_slot as f64).ceil() as i32,
        (ItemKind::Armor, Some(weight), _) if item.is_body_armor() => {
            (weight / ARMOR_WEIGHT_PER_SLOT).floor() as i32
        }
        (_, Some(weight), _) => (weight / WEIGHT_PER_SLOT).ceil() as i32,
    }
}

/// Resolve what a whole stack of a non-container item costs.
///
/// `unit_slots` is the already resolved unit cost; `None` (abilities,
/// spells) yields `None`.
pub fn resolve_standard_total_slots(
    item: &Item,
    unit_slots: Option<i32>,
    coins_per_slot: u32,
) -> Result<Option<i32>, EngineError> {
    let Some(unit_slots) = unit_slots else {
        return Ok(None);
    };
    let quantity = item.quantity.ok_or_else(|| EngineError::MissingQuantity {
        item: item.name.clone(),
    })?;

    let total = if item.kind == ItemKind::Treasure {
        if coins_per_slot == 0 {
            return Err(ConfigError::ZeroCoinsPerSlot.into());
        }
        i64::from(quantity.value.div_ceil(coins_per_slot))
    } else {
        match quantity.bundle_size() {
            None => i64::from(unit_slots) * i64::from(quantity.value),
            Some(bundle) => i64::from(quantity.value.div_ceil(bundle)),
        }
    };
    i32::try_from(total)
        .map(Some)
        .map_err(|_| EngineError::slot_overflow(item))
}

/// Derived slot values of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerTotals {
    /// The container's own unit cost, zeroed once it holds anything.
    pub slots: i32,
    /// Cost of the contents, or of the container itself when empty.
    pub total_slots: i32,
}

/// Resolve a container's totals from the items that declare membership in it.
///
/// `owner_items` is the owner's full item list with unit slots already
/// resolved. Contents are counted with the standard stack rule; a
/// container inside a container is not expanded further.
pub fn resolve_container_total_slots(
    container: &Item,
    unit_slots: i32,
    owner_items: &[Item],
    coins_per_slot: u32,
) -> Result<ContainerTotals, EngineError> {
    let mut slot_total: i32 = 0;
    for content in owner_items
        .iter()
        .filter(|i| i.container_id == Some(container.id) && i.id != container.id)
    {
        let contribution = resolve_standard_total_slots(content, content.slots, coins_per_slot)?;
        slot_total = contribution
            .map_or(Some(slot_total), |slots| slot_total.checked_add(slots))
            .ok_or_else(|| EngineError::slot_overflow(container))?;
    }

    if slot_total == 0 {
        Ok(ContainerTotals {
            slots: unit_slots,
            total_slots: unit_slots,
        })
    } else {
        Ok(ContainerTotals {
            slots: 0,
            total_slots: slot_total,
        })
    }
}

/// Derive `slots` and `total_slots` for every item an actor owns.
///
/// On error `items` is left as it was.
pub fn prepare_items(items: &mut [Item], coins_per_slot: u32) -> Result<(), EngineError> {
    let mut resolved = items.to_vec();
    for item in resolved.iter_mut() {
        item.slots = resolve_unit_slots(item, coins_per_slot);
    }

    let derived = resolved
        .iter()
        .map(|item| match (item.kind, item.slots) {
            (ItemKind::Container, Some(unit)) => {
                resolve_container_total_slots(item, unit, &resolved, coins_per_slot)
                    .map(|t| (Some(t.slots), Some(t.total_slots)))
            }
            _ => resolve_standard_total_slots(item, item.slots, coins_per_slot)
                .map(|total| (item.slots, total)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (item, (slots, total_slots)) in items.iter_mut().zip(derived) {
        item.slots = slots;
        item.total_slots = total_slots;
    }
    Ok(())
}

/// Derive slot values for an item that has no owner.
///
/// Containers without an owner cannot see their contents and fall back to
/// the standard stack rule.
pub fn prepare_loose_item(item: &mut Item, coins_per_slot: u32) -> Result<(), EngineError> {
    let slots = resolve_unit_slots(item, coins_per_slot);
    let total_slots = resolve_standard_total_slots(item, slots, coins_per_slot)?;
    item.slots = slots;
    item.total_slots = total_slots;
    Ok(())
}
