//! Save state - the persisted aggregate holding the pool and player progress.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::facts::{FactPool, MAX_FACTOR, STARTING_CEILING};
use crate::progression::PlayerProgress;
use crate::settings::DEFAULT_REQUIRED_CORRECT_ANSWERS;

/// Everything that survives between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveState {
    /// Highest unlocked factor, in `2..=10`. Never decreases.
    pub unlocked_factor_ceiling: u8,

    /// Correct answers needed to finish one encounter.
    pub required_correct_answers: u32,

    pub player_progress: PlayerProgress,

    pub fact_pool: FactPool,
}

impl Default for SaveState {
    fn default() -> Self {
        Self {
            unlocked_factor_ceiling: STARTING_CEILING,
            required_correct_answers: DEFAULT_REQUIRED_CORRECT_ANSWERS,
            player_progress: PlayerProgress::default(),
            fact_pool: FactPool::default(),
        }
    }
}

impl SaveState {
    /// Create a fresh save with an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an empty pool with the starting ceiling's facts.
    ///
    /// Returns `true` if anything changed.
    pub fn initialize_if_empty(&mut self) -> bool {
        if !self.fact_pool.is_empty() {
            return false;
        }
        self.unlocked_factor_ceiling = STARTING_CEILING;
        self.expand_pool(STARTING_CEILING);
        true
    }

    /// Add every fact involving `ceiling`. Returns the number of new facts.
    pub fn expand_pool(&mut self, ceiling: u8) -> usize {
        self.fact_pool.expand(ceiling)
    }

    /// Unlock the next factor.
    ///
    /// Returns `false` without touching anything once the ceiling is at 10.
    pub fn promote(&mut self) -> bool {
        if self.unlocked_factor_ceiling >= MAX_FACTOR {
            return false;
        }
        self.unlocked_factor_ceiling += 1;
        let added = self.expand_pool(self.unlocked_factor_ceiling);
        log::info!(
            "Unlocked factor {} ({} new facts, {} total)",
            self.unlocked_factor_ceiling,
            added,
            self.fact_pool.len()
        );
        true
    }

    /// Bring a loaded save back within its invariants.
    ///
    /// Clamps the ceiling into `2..=10` and expands the pool for every
    /// unlocked factor. Stats already in the pool are kept. An empty pool is
    /// left for `initialize_if_empty`. Returns `true` if anything changed.
    pub fn normalize(&mut self) -> bool {
        if self.fact_pool.is_empty() {
            return false;
        }

        let ceiling = self.unlocked_factor_ceiling.clamp(STARTING_CEILING, MAX_FACTOR);
        let mut changed = ceiling != self.unlocked_factor_ceiling;
        if changed {
            log::warn!(
                "Saved ceiling {} out of range, using {}",
                self.unlocked_factor_ceiling,
                ceiling
            );
            self.unlocked_factor_ceiling = ceiling;
        }

        let added: usize = (STARTING_CEILING..=ceiling)
            .map(|factor| self.expand_pool(factor))
            .sum();
        if added > 0 {
            log::warn!("Restored {} missing facts up to factor {}", added, ceiling);
            changed = true;
        }
        changed
    }

    /// Check whether every factor has been unlocked.
    pub fn is_fully_unlocked(&self) -> bool {
        self.unlocked_factor_ceiling >= MAX_FACTOR
    }

    /// Parse a save from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the save as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
