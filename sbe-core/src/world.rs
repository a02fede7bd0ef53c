//! Character sheet data handed to the engine by the host.
//!
//! Contains actors, their items and the derived fields the engine writes
//! back after every recomputation pass.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Items
// ============================================================================

/// What an item is, as far as slot rules are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Container,
    Treasure,
    Ability,
    Spell,
    #[serde(alias = "item")]
    Generic,
    Condition,
}

impl ItemKind {
    /// Abilities and spells never take up slots.
    pub fn is_slotless(&self) -> bool {
        matches!(self, ItemKind::Ability | ItemKind::Spell)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Armor => "armor",
            ItemKind::Container => "container",
            ItemKind::Treasure => "treasure",
            ItemKind::Ability => "ability",
            ItemKind::Spell => "spell",
            ItemKind::Generic => "item",
            ItemKind::Condition => "condition",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Weight class of a piece of armor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorWeight {
    #[default]
    Unarmored,
    Light,
    Heavy,
    Shield,
}

/// Stack size of an item.
///
/// When `max` is set the units are bundled: every `max` units share one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: u32,
    #[serde(default)]
    pub max: Option<u32>,
}

impl Quantity {
    pub fn new(value: u32) -> Self {
        Self { value, max: None }
    }

    pub fn bundled(value: u32, max: u32) -> Self {
        Self {
            value,
            max: Some(max),
        }
    }

    /// Bundle size, if the stack is bundled. A zero size counts as unbundled.
    pub fn bundle_size(&self) -> Option<u32> {
        self.max.filter(|&max| max > 0)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::new(1)
    }
}

/// A piece of equipment or a pseudo-item (ability, spell, condition marker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub quantity: Option<Quantity>,
    /// Slot override entered by the user. `None` means "derive it".
    #[serde(default)]
    pub slots_declared: Option<i32>,
    /// Derived cost of a single unit.
    #[serde(default)]
    pub slots: Option<i32>,
    /// Derived cost of the whole stack, or of a container's contents.
    #[serde(default)]
    pub total_slots: Option<i32>,
    #[serde(default)]
    pub equipped: bool,
    /// Owning container. Hosts send an empty string for "none".
    #[serde(default, deserialize_with = "empty_as_none")]
    pub container_id: Option<ItemId>,
    /// Only meaningful for armor.
    #[serde(default)]
    pub armor: Option<ArmorWeight>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<ItemId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => Uuid::parse_str(id)
            .map(|uuid| Some(ItemId(uuid)))
            .map_err(serde::de::Error::custom),
    }
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            kind,
            weight: None,
            cost: None,
            quantity: Some(Quantity::default()),
            slots_declared: None,
            slots: None,
            total_slots: None,
            equipped: false,
            container_id: None,
            armor: if kind == ItemKind::Armor {
                Some(ArmorWeight::default())
            } else {
                None
            },
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_quantity(mut self, value: u32) -> Self {
        self.quantity = Some(Quantity::new(value));
        self
    }

    pub fn bundled(mut self, value: u32, max: u32) -> Self {
        self.quantity = Some(Quantity::bundled(value, max));
        self
    }

    pub fn with_slots(mut self, slots: i32) -> Self {
        self.slots_declared = Some(slots);
        self
    }

    pub fn equipped(mut self) -> Self {
        self.equipped = true;
        self
    }

    pub fn inside(mut self, container: ItemId) -> Self {
        self.container_id = Some(container);
        self
    }

    pub fn armor(mut self, weight: ArmorWeight) -> Self {
        self.armor = Some(weight);
        self
    }

    pub fn is_contained(&self) -> bool {
        self.container_id.is_some()
    }

    /// Armor weight class, treating unset as unarmored.
    pub fn armor_weight(&self) -> ArmorWeight {
        self.armor.unwrap_or_default()
    }

    /// Body armor is armor that is not a shield.
    pub fn is_body_armor(&self) -> bool {
        self.kind == ItemKind::Armor && self.armor_weight() != ArmorWeight::Shield
    }

    /// Derived unit slots, zero when not derived.
    pub fn unit_slots(&self) -> i32 {
        self.slots.unwrap_or(0)
    }

    /// Derived total slots, zero when not derived.
    pub fn stack_slots(&self) -> i32 {
        self.total_slots.unwrap_or(0)
    }
}

// ============================================================================
// Ability Scores
// ============================================================================

/// A single ability score and its modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScore {
    pub value: i32,
    #[serde(rename = "mod")]
    pub modifier: i32,
}

impl AbilityScore {
    pub fn new(value: i32, modifier: i32) -> Self {
        Self { value, modifier }
    }
}

/// The ability scores capacity can be derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub str: AbilityScore,
    pub con: AbilityScore,
}

impl AbilityScores {
    pub fn new(str: AbilityScore, con: AbilityScore) -> Self {
        Self { str, con }
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(AbilityScore::new(10, 0), AbilityScore::new(10, 0))
    }
}

// ============================================================================
// Actors
// ============================================================================

/// Kind of actor owning the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Character,
    Monster,
    /// Anything else the host knows about (vehicles, lairs, ...).
    #[serde(other)]
    Other,
}

impl ActorKind {
    /// Only characters and monsters carry an encumbrance.
    pub fn is_character_like(&self) -> bool {
        matches!(self, ActorKind::Character | ActorKind::Monster)
    }
}

/// Derived carrying state of an actor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventoryState {
    pub value: i32,
    pub max: i32,
    pub pct: f64,
    pub encumbered: bool,
    #[serde(default)]
    pub steps: Vec<f64>,
}

impl fmt::Display for InventoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} slots ({:.0}%)", self.value, self.max, self.pct)?;
        if self.encumbered {
            write!(f, " [encumbered]")?;
        }
        Ok(())
    }
}

/// Movement rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub base: u32,
}

impl Default for Movement {
    fn default() -> Self {
        Self { base: 120 }
    }
}

/// A character or monster with its inventory and derived state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    #[serde(default)]
    pub scores: Option<AbilityScores>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub inventory: Option<InventoryState>,
    #[serde(default)]
    pub movement: Movement,
    /// Condition penalty applied to rolls.
    #[serde(default)]
    pub modifier: i32,
}

impl Actor {
    pub fn new(name: impl Into<String>, kind: ActorKind) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            kind,
            scores: match kind {
                ActorKind::Character => Some(AbilityScores::default()),
                _ => None,
            },
            items: Vec::new(),
            inventory: None,
            movement: Movement::default(),
            modifier: 0,
        }
    }

    pub fn with_scores(mut self, scores: AbilityScores) -> Self {
        self.scores = Some(scores);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn add_item(&mut self, item: Item) -> ItemId {
        let id = item.id;
        self.items.push(item);
        id
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items declaring membership in the given container.
    pub fn contents_of(&self, container: ItemId) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(move |i| i.container_id == Some(container))
    }
}
