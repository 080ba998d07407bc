//! Best-score tracking
//!
//! Persisted as a bare decimal integer under a single storage key.

use serde::{Deserialize, Serialize};

use crate::platform::storage::{KeyValueStore, StorageError};

/// Storage key for the persisted best score
pub const STORAGE_KEY: &str = "freezer-challenge-highscore";

/// Best score seen across all attempts. Never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new() -> Self {
        Self { best: 0 }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Interpret a stored value. Absent or malformed data means no prior
    /// high score.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::new();
        };
        match raw.trim().parse::<u64>() {
            Ok(best) => Self { best },
            Err(e) => {
                log::warn!("Ignoring malformed high score {:?}: {}", raw, e);
                Self::new()
            }
        }
    }

    /// Check if a score would replace the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished attempt. Returns true if it set a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        let scores = Self::parse(store.get(STORAGE_KEY).as_deref());
        log::info!("Loaded high score {}", scores.best);
        scores
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.set(STORAGE_KEY, &self.best.to_string())?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}
