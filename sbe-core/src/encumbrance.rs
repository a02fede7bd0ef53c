//! Inventory aggregation: carried slots, hands in use and worn armor.
//!
//! Items must have their slot values derived (see [`crate::slots`]) before
//! they are tallied here.

use crate::config::{CapacityPolicy, EncumbranceConfig, MovementPolicy};
use crate::engine::EngineError;
use crate::notice::Notice;
use crate::world::{Actor, ActorKind, ArmorWeight, InventoryState, Item, ItemKind};

/// Number of hands a character has free for held items.
pub const MAX_HELD_ITEMS: i32 = 2;

/// Containers holding more than this need both hands.
pub const ONE_HAND_CONTAINER_LIMIT: i32 = 4;

/// Running totals over an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    /// Slots counted against capacity.
    pub total_weight: i32,
    /// Hands occupied by equipped gear.
    pub held_items: i32,
    /// Suits of body armor being worn.
    pub worn_armor: u32,
}

impl Tally {
    /// Whether equipped gear needs more hands than the character has.
    pub fn too_many_held(&self) -> bool {
        self.held_items > MAX_HELD_ITEMS
    }

    /// Notices about what the character is wearing and holding.
    pub fn notices(&self) -> Vec<Notice> {
        let mut notices = Vec::new();
        if self.worn_armor > 1 {
            notices.push(Notice::TooMuchArmor);
        }
        if self.too_many_held() {
            notices.push(Notice::TooManyHeldItems);
        }
        notices
    }

    fn add(mut self, item: &Item, count_equipped: bool) -> Result<Self, EngineError> {
        let equipped_on_body = count_equipped && item.equipped && !item.is_contained();
        let sum = |total: i32, slots: Option<i32>| {
            slots
                .and_then(|slots| total.checked_add(slots))
                .ok_or_else(|| EngineError::slot_overflow(item))
        };

        if count_equipped && item.kind == ItemKind::Container && item.equipped {
            // Contents are counted as separate items; cancel them out
            let footprint = item.unit_slots().checked_sub(item.stack_slots());
            self.total_weight = sum(self.total_weight, footprint)?;
            let hands = if item.stack_slots() > ONE_HAND_CONTAINER_LIMIT {
                2
            } else {
                1
            };
            self.held_items = sum(self.held_items, Some(hands))?;
        } else if item.kind == ItemKind::Container {
            self.total_weight = sum(self.total_weight, Some(item.unit_slots()))?;
        } else if equipped_on_body && item.is_body_armor() {
            if item.armor_weight() != ArmorWeight::Unarmored {
                self.worn_armor += 1;
            }
        } else if equipped_on_body {
            self.held_items = sum(self.held_items, Some(item.unit_slots()))?;
        } else if item.kind.is_slotless() {
            // Abilities and spells weigh nothing
        } else {
            self.total_weight = sum(self.total_weight, Some(item.stack_slots()))?;
        }
        Ok(self)
    }
}

/// Tally an actor's items.
pub fn tally(items: &[Item], config: &EncumbranceConfig) -> Result<Tally, EngineError> {
    items
        .iter()
        .try_fold(Tally::default(), |tally, item| tally.add(item, config.count_equipped))
}

/// Slot capacity of an actor.
///
/// Monsters keep whatever capacity was stored for them previously.
pub fn capacity(actor: &Actor, config: &EncumbranceConfig) -> Result<i32, EngineError> {
    if actor.kind == ActorKind::Monster {
        return Ok(actor.inventory.as_ref().map_or(0, |state| state.max));
    }

    let base = config.base_slots as i32;
    if config.determine_slots == CapacityPolicy::BaseOnly {
        return Ok(base);
    }

    let scores = actor.scores.ok_or_else(|| EngineError::MissingScores {
        actor: actor.name.clone(),
    })?;
    Ok(match config.determine_slots {
        CapacityPolicy::BaseOnly => base,
        CapacityPolicy::StrScore => scores.str.value,
        CapacityPolicy::ConScore => scores.con.value,
        CapacityPolicy::StrBonus => base + scores.str.modifier,
        CapacityPolicy::ConBonus => base + scores.con.modifier,
    })
}

/// Build the carrying state from a tally and a capacity.
pub fn inventory_state(tally: &Tally, max: i32, config: &EncumbranceConfig) -> InventoryState {
    let value = tally.total_weight;

    let (pct, encumbered) = if max <= 0 {
        tracing::warn!(max, "non-positive slot capacity, treating as fully encumbered");
        (100.0, true)
    } else {
        let pct = (100.0 * value as f64 / max as f64).clamp(0.0, 100.0);
        (pct, value > max || tally.too_many_held())
    };

    let steps = match config.mv_calc_type {
        MovementPolicy::Detailed => config
            .mv_thresholds
            .as_array()
            .iter()
            .map(|threshold| {
                if max <= 0 {
                    100.0
                } else {
                    (100.0 * threshold / max as f64).clamp(0.0, 100.0)
                }
            })
            .collect(),
        MovementPolicy::Basic => Vec::new(),
    };

    InventoryState {
        value,
        max,
        pct,
        encumbered,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MovementThresholds;
    use crate::slots::prepare_items;
    use crate::world::{AbilityScore, AbilityScores};

    fn prepared(mut items: Vec<Item>) -> Vec<Item> {
        prepare_items(&mut items, 100).unwrap();
        items
    }

    #[test]
    fn test_carried_items_count_totals() {
        let items = prepared(vec![
            Item::new("Torch", ItemKind::Generic).with_quantity(3),
            Item::new("Sword", ItemKind::Weapon).with_weight(60.0),
            Item::new("Sleep", ItemKind::Spell),
            Item::new("Backstab", ItemKind::Ability),
        ]);
        let tally = tally(&items, &EncumbranceConfig::default()).unwrap();
        assert_eq!(tally.total_weight, 4);
        assert_eq!(tally.held_items, 0);
    }

    #[test]
    fn test_equipped_counts_when_policy_off() {
        let items = prepared(vec![
            Item::new("Sword", ItemKind::Weapon).with_slots(1).equipped(),
            Item::new("Plate", ItemKind::Armor)
                .armor(ArmorWeight::Heavy)
                .with_slots(3)
                .equipped(),
        ]);
        let tally = tally(&items, &EncumbranceConfig::default()).unwrap();
        assert_eq!(tally.total_weight, 4);
        assert_eq!(tally.worn_armor, 0);
    }

    #[test]
    fn test_worn_armor_is_exempt() {
        let config = EncumbranceConfig::default().counting_equipped(true);
        let items = prepared(vec![
            Item::new("Plate", ItemKind::Armor)
                .armor(ArmorWeight::Heavy)
                .with_slots(3)
                .equipped(),
            Item::new("Robes", ItemKind::Armor)
                .armor(ArmorWeight::Unarmored)
                .equipped(),
        ]);
        let tally = tally(&items, &config).unwrap();
        assert_eq!(tally.total_weight, 0);
        assert_eq!(tally.worn_armor, 1);
        assert!(tally.notices().is_empty());
    }

    #[test]
    fn test_two_suits_of_armor() {
        let config = EncumbranceConfig::default().counting_equipped(true);
        let items = prepared(vec![
            Item::new("Plate", ItemKind::Armor)
                .armor(ArmorWeight::Heavy)
                .equipped(),
            Item::new("Leather", ItemKind::Armor)
                .armor(ArmorWeight::Light)
                .equipped(),
        ]);
        let tally = tally(&items, &config).unwrap();
        assert_eq!(tally.worn_armor, 2);
        assert_eq!(tally.notices(), vec![Notice::TooMuchArmor]);
    }

    #[test]
    fn test_held_items_use_hands() {
        let config = EncumbranceConfig::default().counting_equipped(true);
        let items = prepared(vec![
            Item::new("Spear", ItemKind::Weapon).with_slots(2).equipped(),
            Item::new("Shield", ItemKind::Armor)
                .armor(ArmorWeight::Shield)
                .with_slots(1)
                .equipped(),
        ]);
        let tally = tally(&items, &config).unwrap();
        assert_eq!(tally.total_weight, 0);
        assert_eq!(tally.held_items, 3);
        assert_eq!(tally.notices(), vec![Notice::TooManyHeldItems]);
    }

    #[test]
    fn test_equipped_item_inside_container_is_carried() {
        let config = EncumbranceConfig::default().counting_equipped(true);
        let sack = Item::new("Sack", ItemKind::Container);
        let sack_id = sack.id;
        let items = prepared(vec![
            sack,
            Item::new("Dagger", ItemKind::Weapon).equipped().inside(sack_id),
        ]);
        let tally = tally(&items, &config).unwrap();
        // Sack footprint is replaced by its contents, the dagger is carried.
        assert_eq!(tally.total_weight, 1);
        assert_eq!(tally.held_items, 0);
    }

    #[test]
    fn test_equipped_container_cancels_contents() {
        let config = EncumbranceConfig::default().counting_equipped(true);
        let pack = Item::new("Backpack", ItemKind::Container).with_slots(1).equipped();
        let pack_id = pack.id;
        let items = prepared(vec![
            pack,
            Item::new("Torch", ItemKind::Generic).with_quantity(5).inside(pack_id),
        ]);
        let tally = tally(&items, &config).unwrap();
        assert_eq!(tally.total_weight, 0);
        assert_eq!(tally.held_items, 2);
    }

    #[test]
    fn test_small_equipped_container_uses_one_hand() {
        let config = EncumbranceConfig::default().counting_equipped(true);
        let items = prepared(vec![Item::new("Pouch", ItemKind::Container).equipped()]);
        let tally = tally(&items, &config).unwrap();
        assert_eq!(tally.total_weight, 0);
        assert_eq!(tally.held_items, 1);
    }

    #[test]
    fn test_slot_sum_overflow_is_an_error() {
        let mut hoard = Item::new("Hoard", ItemKind::Generic);
        hoard.slots = Some(1);
        hoard.total_slots = Some(i32::MAX);
        let rope = prepared(vec![Item::new("Rope", ItemKind::Generic)]).remove(0);

        let err = tally(&[hoard, rope], &EncumbranceConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::SlotOverflow { ref item } if item == "Rope"));
    }

    #[test]
    fn test_capacity_policies() {
        let actor = Actor::new("Aldric", ActorKind::Character).with_scores(AbilityScores::new(
            AbilityScore::new(16, 2),
            AbilityScore::new(9, -1),
        ));
        let config = EncumbranceConfig::default();
        let cap = |policy| capacity(&actor, &config.clone().with_capacity(policy)).unwrap();
        assert_eq!(cap(CapacityPolicy::BaseOnly), 10);
        assert_eq!(cap(CapacityPolicy::StrScore), 16);
        assert_eq!(cap(CapacityPolicy::ConScore), 9);
        assert_eq!(cap(CapacityPolicy::StrBonus), 12);
        assert_eq!(cap(CapacityPolicy::ConBonus), 9);
    }

    #[test]
    fn test_capacity_needs_scores() {
        let mut actor = Actor::new("Aldric", ActorKind::Character);
        actor.scores = None;
        let config = EncumbranceConfig::default();
        assert_eq!(capacity(&actor, &config).unwrap(), 10);

        let config = config.with_capacity(CapacityPolicy::StrScore);
        assert!(matches!(
            capacity(&actor, &config),
            Err(EngineError::MissingScores { .. })
        ));
    }

    #[test]
    fn test_monster_keeps_stored_capacity() {
        let mut monster = Actor::new("Ogre", ActorKind::Monster);
        let config = EncumbranceConfig::default().with_capacity(CapacityPolicy::StrScore);
        assert_eq!(capacity(&monster, &config).unwrap(), 0);

        monster.inventory = Some(InventoryState {
            max: 20,
            ..Default::default()
        });
        assert_eq!(capacity(&monster, &config).unwrap(), 20);
    }

    #[test]
    fn test_over_capacity_is_encumbered() {
        let config = EncumbranceConfig::default();
        let over = Tally {
            total_weight: 11,
            ..Default::default()
        };
        let state = inventory_state(&over, 10, &config);
        assert!(state.encumbered);
        assert_eq!(state.pct, 100.0);

        let at = Tally {
            total_weight: 10,
            ..Default::default()
        };
        assert!(!inventory_state(&at, 10, &config).encumbered);
    }

    #[test]
    fn test_hands_encumber_independently() {
        let tally = Tally {
            total_weight: 10,
            held_items: 3,
            worn_armor: 0,
        };
        let state = inventory_state(&tally, 10, &EncumbranceConfig::default());
        assert!(state.encumbered);
    }

    #[test]
    fn test_zero_capacity_guard() {
        let state = inventory_state(&Tally::default(), 0, &EncumbranceConfig::default());
        assert_eq!(state.pct, 100.0);
        assert!(state.encumbered);
        assert!(state.pct.is_finite());
    }

    #[test]
    fn test_negative_weight_clamps_pct() {
        let tally = Tally {
            total_weight: -3,
            ..Default::default()
        };
        let state = inventory_state(&tally, 10, &EncumbranceConfig::default());
        assert_eq!(state.pct, 0.0);
    }

    #[test]
    fn test_steps_only_for_detailed_movement() {
        let tally = Tally::default();
        let basic = inventory_state(&tally, 10, &EncumbranceConfig::default());
        assert!(basic.steps.is_empty());

        let config = EncumbranceConfig::default()
            .with_movement(MovementPolicy::Detailed)
            .with_thresholds(MovementThresholds::new(4.0, 6.0, 12.0));
        let detailed = inventory_state(&tally, 10, &config);
        assert_eq!(detailed.steps, vec![40.0, 60.0, 100.0]);
    }
}
