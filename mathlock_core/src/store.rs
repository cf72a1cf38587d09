//! Fact store - owns the save state and writes it back after every change.

use chrono::Utc;
use mathlock_rules::{FactKey, FactPool, PlayerProgress, SaveState};

use crate::persistence::Persistence;

/// Owns the persisted save state and its storage backend.
///
/// Every mutating operation saves synchronously. Save failures are logged
/// and swallowed: the in-memory state stays authoritative until the next
/// successful save.
pub struct FactStore<P: Persistence> {
    state: SaveState,
    persistence: P,
    /// The fact currently on screen, consumed by `submit_answer`.
    current: Option<FactKey>,
}

impl<P: Persistence> FactStore<P> {
    /// Load state from `persistence`, seed an empty pool and repair a
    /// save whose ceiling or pool are out of step.
    pub fn open(persistence: P) -> Self {
        let state = persistence.load();
        let mut store = Self::with_state(state, persistence);
        store.initialize_if_empty();
        store.normalize();
        store
    }

    /// Wrap an already-loaded state without touching storage.
    pub fn with_state(state: SaveState, persistence: P) -> Self {
        Self {
            state,
            persistence,
            current: None,
        }
    }

    pub fn state(&self) -> &SaveState {
        &self.state
    }

    pub fn pool(&self) -> &FactPool {
        &self.state.fact_pool
    }

    pub fn ceiling(&self) -> u8 {
        self.state.unlocked_factor_ceiling
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.state.player_progress
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Seed an empty pool with the starting facts. No-op on a non-empty pool.
    pub fn initialize_if_empty(&mut self) {
        if self.state.initialize_if_empty() {
            log::debug!("Seeded fact pool with {} facts", self.state.fact_pool.len());
            self.persist();
        }
    }

    /// Clamp the ceiling and restore missing facts. Saves only on change.
    pub fn normalize(&mut self) {
        if self.state.normalize() {
            self.persist();
        }
    }

    /// Add every fact involving `ceiling`. Factors outside `1..=10` are ignored.
    pub fn expand_pool(&mut self, ceiling: u8) {
        if self.state.expand_pool(ceiling) > 0 {
            self.persist();
        }
    }

    /// Unlock the next factor. Returns `false` once every factor is unlocked.
    pub fn promote(&mut self) -> bool {
        let promoted = self.state.promote();
        if promoted {
            self.persist();
        }
        promoted
    }

    /// Mark `key` as the fact the player is now answering.
    pub fn set_current(&mut self, key: FactKey) {
        self.current = Some(key);
    }

    pub fn current(&self) -> Option<FactKey> {
        self.current
    }

    /// Check an answer against the current fact and record the result.
    ///
    /// Returns `false` without changing anything when no fact is current or
    /// the current fact is not in the pool. The current fact is consumed, so
    /// answering twice needs a new question.
    pub fn submit_answer(&mut self, answer: i64) -> bool {
        match self.record_answer(answer) {
            Some(correct) => {
                self.persist();
                correct
            }
            None => false,
        }
    }

    /// Same as `submit_answer` but leaves saving to the caller.
    ///
    /// Returns `None` when nothing was recorded.
    pub fn record_answer(&mut self, answer: i64) -> Option<bool> {
        let Some(key) = self.current.take() else {
            log::debug!("Answer {} submitted with no current fact; ignored", answer);
            return None;
        };
        let Some(stats) = self.state.fact_pool.get_mut(&key) else {
            log::warn!("Answer {} submitted for {} which is not in the pool; ignored", answer, key);
            return None;
        };

        let correct = key.is_correct(answer);
        stats.record(correct, Utc::now());

        log::debug!(
            "{} = {} ({}), streak {}",
            key,
            answer,
            if correct { "correct" } else { "wrong" },
            stats.current_streak
        );
        Some(correct)
    }

    /// Mutable progress. Changes are not saved until `persist`.
    pub fn progress_mut(&mut self) -> &mut PlayerProgress {
        &mut self.state.player_progress
    }

    /// Run `f` against the player's progress and save afterwards.
    pub fn update_progress<T>(&mut self, f: impl FnOnce(&mut PlayerProgress) -> T) -> T {
        let result = f(&mut self.state.player_progress);
        self.persist();
        result
    }

    /// Save the current state, logging any failure.
    pub fn persist(&mut self) {
        if let Err(e) = self.persistence.save(&self.state) {
            log::warn!("Failed to save progress: {}", e);
        }
    }
}
