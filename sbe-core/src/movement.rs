//! Movement speed from armor or carried load.

use crate::config::{EncumbranceConfig, MovementPolicy, MovementThresholds};
use crate::world::{ArmorWeight, InventoryState, Item, ItemKind};

pub const SPEED_UNENCUMBERED: u32 = 120;
pub const SPEED_LIGHT: u32 = 90;
pub const SPEED_HEAVY: u32 = 60;
pub const SPEED_OVERLOADED: u32 = 30;
pub const SPEED_ENCUMBERED: u32 = 0;

/// Heaviest armor class among equipped armor. Heavy beats light.
pub fn heaviest_armor(items: &[Item]) -> ArmorWeight {
    items
        .iter()
        .filter(|i| i.kind == ItemKind::Armor && i.equipped)
        .fold(ArmorWeight::Unarmored, |heaviest, armor| {
            match (heaviest, armor.armor_weight()) {
                (_, ArmorWeight::Heavy) => ArmorWeight::Heavy,
                (ArmorWeight::Unarmored, ArmorWeight::Light) => ArmorWeight::Light,
                (current, _) => current,
            }
        })
}

/// Speed under the basic rules, before encumbrance.
pub fn basic_speed(heaviest: ArmorWeight) -> u32 {
    match heaviest {
        ArmorWeight::Heavy => SPEED_HEAVY,
        ArmorWeight::Light => SPEED_LIGHT,
        ArmorWeight::Unarmored | ArmorWeight::Shield => SPEED_UNENCUMBERED,
    }
}

/// Speed under the detailed rules, before encumbrance.
pub fn detailed_speed(value: i32, thresholds: &MovementThresholds) -> u32 {
    let value = value as f64;
    if value <= thresholds.mv_threshold90 {
        SPEED_UNENCUMBERED
    } else if value <= thresholds.mv_threshold60 {
        SPEED_LIGHT
    } else if value <= thresholds.mv_threshold30 {
        SPEED_HEAVY
    } else {
        SPEED_OVERLOADED
    }
}

/// Resolve the movement rate of an actor with the given carrying state.
pub fn resolve_movement(items: &[Item], state: &InventoryState, config: &EncumbranceConfig) -> u32 {
    if state.encumbered {
        return SPEED_ENCUMBERED;
    }
    match config.mv_calc_type {
        MovementPolicy::Basic => basic_speed(heaviest_armor(items)),
        MovementPolicy::Detailed => detailed_speed(state.value, &config.mv_thresholds),
    }
}
