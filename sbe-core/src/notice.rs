//! Advisory notifications raised during a recomputation pass.
//!
//! Notices never interrupt a pass. They are shown to the owning player
//! only, and only when notifications are switched on.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EncumbranceConfig;

/// How loudly a notice should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Something the player should know about their inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// More than one suit of body armor is worn.
    TooMuchArmor,
    /// More than two hands' worth of items are held.
    TooManyHeldItems,
    /// The character cannot move.
    Encumbered,
}

impl Notice {
    pub fn severity(&self) -> Severity {
        match self {
            Notice::TooMuchArmor => Severity::Error,
            Notice::TooManyHeldItems | Notice::Encumbered => Severity::Warning,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::TooMuchArmor => "You can only wear one suit of armor at a time.",
            Notice::TooManyHeldItems => "You are holding too many items in your hands.",
            Notice::Encumbered => "You are encumbered and cannot move.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Who is looking at the actor whose data is being derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// The player owning the actor.
    #[default]
    Owner,
    /// The game master. Never pestered with notices.
    #[serde(alias = "gm")]
    GameMaster,
    /// Anyone else.
    Observer,
}

impl Audience {
    pub fn receives_notices(&self) -> bool {
        matches!(self, Audience::Owner)
    }
}

/// Filter raised notices down to the ones the audience should see.
pub fn deliver(raised: &[Notice], config: &EncumbranceConfig, audience: Audience) -> Vec<Notice> {
    for notice in raised {
        tracing::debug!(?notice, ?audience, "notice raised");
    }
    if !config.show_notify || !audience.receives_notices() {
        return Vec::new();
    }
    raised.to_vec()
}
