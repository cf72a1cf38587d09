//! Fact Selector - picks the next question, favouring facts the player misses.
//!
//! Each round:
//! 1. **Candidates**: the whole pool for a boss, otherwise only facts that
//!    involve the newest unlocked factor
//! 2. **Weighting**: `max(floor, base + per_incorrect * misses - per_streak * streak)`
//! 3. **Repeat guard**: last round's fact is removed unless nothing else is left
//! 4. **Draw**: one uniform draw over the weighted range using the injected RNG

mod universe;

pub use universe::*;

use mathlock_rules::{FactKey, FactStats, SelectionWeights};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{CoreError, Result};
use crate::persistence::Persistence;
use crate::store::FactStore;

/// Selection weight of one fact.
pub fn selection_weight(stats: &FactStats, weights: &SelectionWeights) -> u64 {
    let raw = weights.base + weights.per_incorrect * i64::from(stats.incorrect_count)
        - weights.per_streak * i64::from(stats.current_streak);
    raw.max(weights.floor).max(1).unsigned_abs()
}

/// Picks questions from a fact store.
pub struct FactSelector<R: Rng> {
    weights: SelectionWeights,
    rng: R,
    last_asked: Option<FactKey>,
}

impl FactSelector<ChaCha8Rng> {
    /// A selector with a deterministic stream, for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// A selector seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> FactSelector<R> {
    /// Create a selector with default weights.
    pub fn new(rng: R) -> Self {
        Self::with_weights(SelectionWeights::default(), rng)
    }

    /// Create a selector with custom weights.
    pub fn with_weights(weights: SelectionWeights, rng: R) -> Self {
        Self {
            weights,
            rng,
            last_asked: None,
        }
    }

    pub fn weights(&self) -> &SelectionWeights {
        &self.weights
    }

    /// The previous question, if any.
    pub fn last_asked(&self) -> Option<FactKey> {
        self.last_asked
    }

    /// The previous question in its `"A x B"` form.
    pub fn last_asked_key(&self) -> Option<String> {
        self.last_asked.map(|key| key.to_string())
    }

    /// Build the weighted universe for a round, before the repeat guard.
    pub fn build_universe<P: Persistence>(&self, store: &FactStore<P>, boss: bool) -> WeightedUniverse {
        WeightedUniverse::new(
            store
                .pool()
                .candidates(store.ceiling(), boss)
                .into_iter()
                .map(|(key, stats)| (key, selection_weight(stats, &self.weights))),
        )
    }

    /// Choose the next question and mark it current in the store.
    ///
    /// Fails with [`CoreError::EmptyCandidatePool`] if the pool has nothing
    /// for the current ceiling, which means it was never initialized.
    pub fn next_question<P: Persistence>(
        &mut self,
        store: &mut FactStore<P>,
        boss: bool,
    ) -> Result<FactKey> {
        let ceiling = store.ceiling();
        let universe = self.build_universe(store, boss);
        if universe.is_empty() {
            log::error!("No candidate facts for ceiling {} (boss: {})", ceiling, boss);
            return Err(CoreError::EmptyCandidatePool { ceiling });
        }

        let universe = match self.last_asked {
            Some(last) => {
                let filtered = universe.without(&last);
                if filtered.is_empty() {
                    universe
                } else {
                    filtered
                }
            }
            None => universe,
        };

        let key = universe
            .draw(&mut self.rng)
            .ok_or(CoreError::EmptyCandidatePool { ceiling })?;

        log::debug!(
            "Asking {} (weight {} of {}, boss: {})",
            key,
            universe.weight_of(&key),
            universe.total_weight(),
            boss
        );

        store.set_current(key);
        self.last_asked = Some(key);
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use chrono::Utc;
    use mathlock_rules::SaveState;

    fn open_store() -> FactStore<MemoryStore> {
        FactStore::open(MemoryStore::new())
    }

    #[test]
    fn test_selection_weight() {
        let weights = SelectionWeights::default();
        let now = Utc::now();
        let mut stats = FactStats::new();
        assert_eq!(selection_weight(&stats, &weights), 10);

        stats.record_incorrect(now);
        stats.record_incorrect(now);
        assert_eq!(selection_weight(&stats, &weights), 20);

        let mut streaky = FactStats::new();
        for _ in 0..3 {
            streaky.record_correct(now);
        }
        assert_eq!(selection_weight(&streaky, &weights), 4);

        for _ in 0..10 {
            streaky.record_correct(now);
        }
        assert_eq!(selection_weight(&streaky, &weights), 1);
    }

    #[test]
    fn test_ordinary_questions_involve_ceiling() {
        let mut store = open_store();
        store.promote();
        store.promote();
        let mut selector = FactSelector::seeded(11);

        for _ in 0..200 {
            let key = selector.next_question(&mut store, false).unwrap();
            assert!(key.involves(4), "{} does not involve the ceiling", key);
            assert!((1..=10).contains(&key.a) && (1..=10).contains(&key.b));
        }
    }

    #[test]
    fn test_boss_questions_cover_whole_pool() {
        let mut store = open_store();
        store.promote();
        let mut selector = FactSelector::seeded(5);

        let mut saw_older_fact = false;
        for _ in 0..300 {
            let key = selector.next_question(&mut store, true).unwrap();
            assert!(store.pool().contains(&key));
            if !key.involves(3) {
                saw_older_fact = true;
            }
        }
        assert!(saw_older_fact);
    }

    #[test]
    fn test_never_repeats_immediately() {
        let mut store = open_store();
        let mut selector = FactSelector::seeded(42);

        let mut previous = selector.next_question(&mut store, false).unwrap();
        for _ in 0..500 {
            let key = selector.next_question(&mut store, false).unwrap();
            assert_ne!(key, previous);
            previous = key;
        }
    }

    #[test]
    fn test_single_candidate_may_repeat() {
        let mut state = SaveState::new();
        state
            .fact_pool
            .insert_if_absent(FactKey::new(2, 2));
        let mut store = FactStore::with_state(state, MemoryStore::new());
        let mut selector = FactSelector::seeded(1);

        let first = selector.next_question(&mut store, false).unwrap();
        let second = selector.next_question(&mut store, false).unwrap();
        assert_eq!(first, FactKey::new(2, 2));
        assert_eq!(second, first);
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let mut store = FactStore::with_state(SaveState::new(), MemoryStore::new());
        let mut selector = FactSelector::seeded(1);

        let result = selector.next_question(&mut store, false);
        assert!(matches!(result, Err(CoreError::EmptyCandidatePool { ceiling: 2 })));
        assert!(store.current().is_none());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut store_a = open_store();
        let mut store_b = open_store();
        let mut selector_a = FactSelector::seeded(99);
        let mut selector_b = FactSelector::seeded(99);

        for _ in 0..50 {
            assert_eq!(
                selector_a.next_question(&mut store_a, false).unwrap(),
                selector_b.next_question(&mut store_b, false).unwrap()
            );
        }
    }

    #[test]
    fn test_marks_current_and_last_asked() {
        let mut store = open_store();
        let mut selector = FactSelector::seeded(8);

        assert!(selector.last_asked_key().is_none());
        let key = selector.next_question(&mut store, false).unwrap();

        assert_eq!(store.current(), Some(key));
        assert_eq!(selector.last_asked_key(), Some(format!("{} x {}", key.a, key.b)));
        assert!(store.submit_answer(key.product()));
    }

    #[test]
    fn test_missed_fact_is_asked_more() {
        let mut store = open_store();
        let trouble = FactKey::new(2, 8);
        for _ in 0..20 {
            store.set_current(trouble);
            store.submit_answer(0);
        }

        let mut selector = FactSelector::seeded(2024);
        let rounds = 1_000;
        let hits = (0..rounds)
            .filter(|_| selector.next_question(&mut store, false).unwrap() == trouble)
            .count();

        // Weight 110 against 18 x 10; far above the 1-in-19 share of an even draw.
        assert!(hits > rounds / 5, "trouble fact asked {} of {} times", hits, rounds);
    }

    #[test]
    fn test_custom_weights() {
        let weights = SelectionWeights {
            base: 1,
            per_incorrect: 0,
            per_streak: 0,
            floor: 1,
        };
        let selector = FactSelector::with_weights(weights, ChaCha8Rng::seed_from_u64(0));
        let store = open_store();

        let universe = selector.build_universe(&store, false);
        assert_eq!(universe.total_weight(), 19);
    }
}
