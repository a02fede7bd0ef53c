//! Sample actors for tests and demos.

use crate::world::{
    AbilityScore, AbilityScores, Actor, ActorKind, ArmorWeight, InventoryState, Item, ItemKind,
};

/// A first-level fighter with a modest kit.
///
/// Carries 8 slots under default rules: leather armor (1), sword (1),
/// shield (1), and a backpack holding 3 torches (3) and 10 rations
/// bundled by 5 (2). With equipped gear exempt, 5 slots and both hands.
pub fn sample_fighter(name: impl Into<String>) -> Actor {
    let mut actor = Actor::new(name, ActorKind::Character).with_scores(AbilityScores::new(
        AbilityScore::new(15, 1),
        AbilityScore::new(13, 1),
    ));

    actor.add_item(
        Item::new("Leather Armor", ItemKind::Armor)
            .armor(ArmorWeight::Light)
            .with_weight(200.0)
            .equipped(),
    );
    actor.add_item(
        Item::new("Sword", ItemKind::Weapon)
            .with_weight(60.0)
            .equipped(),
    );
    actor.add_item(
        Item::new("Shield", ItemKind::Armor)
            .armor(ArmorWeight::Shield)
            .with_weight(100.0)
            .equipped(),
    );
    let pack = actor.add_item(Item::new("Backpack", ItemKind::Container).with_slots(1));
    actor.add_item(
        Item::new("Torch", ItemKind::Generic)
            .with_quantity(3)
            .inside(pack),
    );
    actor.add_item(
        Item::new("Rations", ItemKind::Generic)
            .bundled(10, 5)
            .inside(pack),
    );
    actor.add_item(Item::new("Second Wind", ItemKind::Ability));
    actor
}

/// A monster whose capacity was stored by the host.
pub fn sample_monster(name: impl Into<String>, capacity: i32) -> Actor {
    let mut actor = Actor::new(name, ActorKind::Monster);
    actor.inventory = Some(InventoryState {
        max: capacity,
        ..Default::default()
    });
    actor
}

/// A pile of coins.
pub fn coins(amount: u32) -> Item {
    Item::new("Coins", ItemKind::Treasure).with_quantity(amount)
}

/// A condition occupying `slots` slots.
pub fn condition(name: impl Into<String>, slots: i32) -> Item {
    Item::new(name, ItemKind::Condition).with_slots(slots)
}
