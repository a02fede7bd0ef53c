//! Encumbrance rule options.
//!
//! The host assembles one [`EncumbranceConfig`] per recomputation pass and
//! hands it to every entry point.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("baseSlots must be positive")]
    ZeroBaseSlots,

    #[error("coinsPerSlot must be positive")]
    ZeroCoinsPerSlot,

    #[error("Movement threshold {name} must not be negative (got {value})")]
    NegativeThreshold { name: &'static str, value: f64 },

    #[error("Movement thresholds must ascend: 90 <= 60 <= 30 (got {t90}, {t60}, {t30})")]
    UnorderedThresholds { t90: f64, t60: f64, t30: f64 },
}

/// How an actor's slot capacity is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CapacityPolicy {
    /// The fixed base value.
    #[default]
    #[serde(rename = "baseonly")]
    BaseOnly,
    /// The raw strength score.
    #[serde(rename = "strscore")]
    StrScore,
    /// The raw constitution score.
    #[serde(rename = "conscore")]
    ConScore,
    /// Base value plus strength modifier.
    #[serde(rename = "strbonus")]
    StrBonus,
    /// Base value plus constitution modifier.
    #[serde(rename = "conbonus")]
    ConBonus,
}

/// Which movement rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementPolicy {
    /// Speed follows the heaviest equipped armor.
    #[default]
    Basic,
    /// Speed follows carried slots against three thresholds.
    Detailed,
}

/// Carried-slot breakpoints for detailed movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementThresholds {
    /// At or below this, speed is 120.
    pub mv_threshold90: f64,
    /// At or below this, speed is 90.
    pub mv_threshold60: f64,
    /// At or below this, speed is 60. Above it, 30.
    pub mv_threshold30: f64,
}

impl MovementThresholds {
    pub fn new(t90: f64, t60: f64, t30: f64) -> Self {
        Self {
            mv_threshold90: t90,
            mv_threshold60: t60,
            mv_threshold30: t30,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.mv_threshold90, self.mv_threshold60, self.mv_threshold30]
    }
}

impl Default for MovementThresholds {
    fn default() -> Self {
        Self::new(40.0, 60.0, 80.0)
    }
}

/// Rule options read by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncumbranceConfig {
    pub determine_slots: CapacityPolicy,
    pub base_slots: u32,
    pub coins_per_slot: u32,
    /// Equipped gear does not count against capacity.
    pub count_equipped: bool,
    pub show_notify: bool,
    pub mv_calc_type: MovementPolicy,
    pub mv_thresholds: MovementThresholds,
}

impl Default for EncumbranceConfig {
    fn default() -> Self {
        Self {
            determine_slots: CapacityPolicy::BaseOnly,
            base_slots: 10,
            coins_per_slot: 100,
            count_equipped: false,
            show_notify: true,
            mv_calc_type: MovementPolicy::Basic,
            mv_thresholds: MovementThresholds::default(),
        }
    }
}

impl EncumbranceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document, filling absent options with defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_capacity(mut self, policy: CapacityPolicy) -> Self {
        self.determine_slots = policy;
        self
    }

    pub fn with_base_slots(mut self, base_slots: u32) -> Self {
        self.base_slots = base_slots;
        self
    }

    pub fn with_coins_per_slot(mut self, coins: u32) -> Self {
        self.coins_per_slot = coins;
        self
    }

    pub fn counting_equipped(mut self, count_equipped: bool) -> Self {
        self.count_equipped = count_equipped;
        self
    }

    pub fn with_notifications(mut self, show: bool) -> Self {
        self.show_notify = show;
        self
    }

    pub fn with_movement(mut self, policy: MovementPolicy) -> Self {
        self.mv_calc_type = policy;
        self
    }

    pub fn with_thresholds(mut self, thresholds: MovementThresholds) -> Self {
        self.mv_thresholds = thresholds;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_slots == 0 {
            return Err(ConfigError::ZeroBaseSlots);
        }
        if self.coins_per_slot == 0 {
            return Err(ConfigError::ZeroCoinsPerSlot);
        }
        if self.mv_calc_type == MovementPolicy::Detailed {
            let t = &self.mv_thresholds;
            for (name, value) in [
                ("mvThreshold90", t.mv_threshold90),
                ("mvThreshold60", t.mv_threshold60),
                ("mvThreshold30", t.mv_threshold30),
            ] {
                if value < 0.0 {
                    return Err(ConfigError::NegativeThreshold { name, value });
                }
            }
            if !(t.mv_threshold90 <= t.mv_threshold60 && t.mv_threshold60 <= t.mv_threshold30) {
                return Err(ConfigError::UnorderedThresholds {
                    t90: t.mv_threshold90,
                    t60: t.mv_threshold60,
                    t30: t.mv_threshold30,
                });
            }
        }
        Ok(())
    }
}
