//! Actor snapshot persistence.
//!
//! The host owns actors; snapshots are how they cross the boundary. Saved
//! as pretty JSON so they stay hand-editable.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

use crate::config::{ConfigError, EncumbranceConfig};
use crate::world::Actor;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current snapshot format version.
const SNAPSHOT_VERSION: u32 = 1;

/// An actor as exchanged with the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub version: u32,
    pub actor: Actor,
}

impl ActorSnapshot {
    pub fn new(actor: Actor) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            actor,
        }
    }

    /// Parse a snapshot from JSON. A bare actor object is accepted too.
    pub fn from_json_str(json: &str) -> Result<Self, PersistError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("actor").is_none() {
            let actor: Actor = serde_json::from_value(value)?;
            return Ok(Self::new(actor));
        }

        let snapshot: Self = serde_json::from_value(value)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }
        Ok(snapshot)
    }

    pub fn to_json_string(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        fs::write(path, self.to_json_string()?).await?;
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        Self::from_json_str(&content)
    }
}

/// Load rule options from a JSON file.
pub async fn load_config(path: impl AsRef<Path>) -> Result<EncumbranceConfig, PersistError> {
    let content = fs::read_to_string(path).await?;
    Ok(EncumbranceConfig::from_json_str(&content)?)
}
