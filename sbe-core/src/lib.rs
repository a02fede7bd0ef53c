//! Slot-based encumbrance engine for tabletop character sheets.
//!
//! This crate provides:
//! - Slot costs for items, bundled stacks and containers
//! - Inventory aggregation with equip, hold and wear rules
//! - Movement speed under basic or detailed rules
//! - Condition penalties threaded into rolls
//! - JSON snapshots for exchanging actors with a host application
//!
//! # Quick Start
//!
//! ```
//! use sbe_core::{Audience, EncumbranceConfig, EncumbranceEngine};
//! use sbe_core::testing::sample_fighter;
//!
//! let mut fighter = sample_fighter("Thorin");
//! let config = EncumbranceConfig::default();
//!
//! let derivation = EncumbranceEngine::new()
//!     .derive(&mut fighter, &config, Audience::Owner)
//!     .unwrap();
//!
//! println!("{}", fighter.inventory.unwrap());
//! println!("Movement: {}", fighter.movement.base);
//! assert!(derivation.notices.is_empty());
//! ```

pub mod conditions;
pub mod config;
pub mod encumbrance;
pub mod engine;
pub mod movement;
pub mod notice;
pub mod persist;
pub mod slots;
pub mod testing;
pub mod world;

// Primary public API
pub use conditions::{RollKind, RollRequest};
pub use config::{CapacityPolicy, ConfigError, EncumbranceConfig, MovementPolicy, MovementThresholds};
pub use engine::{Derivation, EncumbranceEngine, EngineError};
pub use notice::{Audience, Notice, Severity};
pub use persist::{ActorSnapshot, PersistError};
pub use world::{Actor, ActorKind, ArmorWeight, InventoryState, Item, ItemId, ItemKind, Quantity};
