//! Player progress: diamonds, owned charms, best score
//!
//! Serialized to JSON for the storage layer, which lives outside this crate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::rewards::{Charm, DEFAULT_CHARM};

/// Errors from shop and inventory actions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("unknown charm '{0}'")]
    UnknownCharm(String),
    #[error("charm '{0}' is not owned")]
    NotOwned(String),
    #[error("not enough diamonds: need {needed}, have {available}")]
    InsufficientDiamonds { needed: u64, available: u64 },
}

/// Payout summary for a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReward {
    pub score: u32,
    pub diamonds_earned: u64,
    pub charm: &'static str,
    pub new_best: bool,
}

fn default_equipped() -> String {
    DEFAULT_CHARM.to_string()
}

/// Persistent player resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub diamonds: u64,
    #[serde(default)]
    pub owned: BTreeSet<String>,
    #[serde(default)]
    pub best: u32,
    #[serde(default = "default_equipped")]
    pub equipped: String,
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Storage key used by the persistence layer
    pub const STORAGE_KEY: &'static str = "spike_glide_progress_v1";

    /// Fresh progress owning only the free charm
    pub fn new() -> Self {
        let mut progress = Self {
            diamonds: 0,
            owned: BTreeSet::new(),
            best: 0,
            equipped: default_equipped(),
        };
        progress.normalize();
        progress
    }

    /// Parse stored progress, starting fresh if it is missing or corrupt
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Progress>(json) {
            Ok(mut progress) => {
                progress.normalize();
                log::info!(
                    "Loaded progress: {} diamonds, {} charms, best {}",
                    progress.diamonds,
                    progress.owned.len(),
                    progress.best
                );
                progress
            }
            Err(e) => {
                log::warn!("Stored progress unreadable ({}), starting fresh", e);
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// The free charm is always owned
    fn normalize(&mut self) {
        self.owned.insert(DEFAULT_CHARM.to_string());
    }

    pub fn owns(&self, id: &str) -> bool {
        self.owned.contains(id)
    }

    /// Buy a charm; free or already-owned charms cost nothing
    pub fn purchase(&mut self, id: &str) -> Result<(), ProgressError> {
        let charm = Charm::from_id(id).ok_or_else(|| ProgressError::UnknownCharm(id.to_string()))?;

        if charm.is_free() || self.owns(charm.id) {
            self.owned.insert(charm.id.to_string());
            return Ok(());
        }

        if self.diamonds < charm.price {
            return Err(ProgressError::InsufficientDiamonds {
                needed: charm.price,
                available: self.diamonds,
            });
        }

        self.diamonds -= charm.price;
        self.owned.insert(charm.id.to_string());
        log::info!("Purchased {} for {} diamonds", charm.name, charm.price);
        Ok(())
    }

    /// Equip an owned charm for future runs
    pub fn equip(&mut self, id: &str) -> Result<(), ProgressError> {
        let charm = Charm::from_id(id).ok_or_else(|| ProgressError::UnknownCharm(id.to_string()))?;
        if !self.owns(charm.id) {
            return Err(ProgressError::NotOwned(id.to_string()));
        }
        self.equipped = charm.id.to_string();
        Ok(())
    }

    /// The charm that will actually pay out: the equipped one if it is known
    /// and owned, otherwise the free charm
    pub fn effective_charm(&self) -> &'static Charm {
        Charm::from_id(&self.equipped)
            .filter(|c| self.owns(c.id))
            .unwrap_or_else(Charm::normal)
    }

    /// Pay out a finished run and update the best score
    pub fn record_run(&mut self, score: u32) -> RunReward {
        let charm = self.effective_charm();
        let diamonds_earned = charm.reward(score);
        self.diamonds += diamonds_earned;

        let new_best = score > self.best;
        if new_best {
            self.best = score;
        }

        log::info!(
            "Run recorded: score {} -> {} diamonds ({}){}",
            score,
            diamonds_earned,
            charm.name,
            if new_best { ", new best" } else { "" }
        );

        RunReward {
            score,
            diamonds_earned,
            charm: charm.id,
            new_best,
        }
    }
}
