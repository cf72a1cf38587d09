//! Fact pool - every fact currently available for practice, with its stats.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{is_valid_factor, FactKey, FactStats, MAX_FACTOR, MIN_FACTOR};

/// The pool of unlocked facts.
///
/// The pool only grows. Once factor `F` is unlocked it holds stats for every
/// `(F, i)` and `(i, F)` with `i` in `1..=10`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactPool {
    facts: HashMap<FactKey, FactStats>,
}

impl FactPool {
    /// Create a new empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert fresh stats for `key` unless it is already present.
    ///
    /// Returns `true` if the key was new.
    pub fn insert_if_absent(&mut self, key: FactKey) -> bool {
        if self.facts.contains_key(&key) {
            return false;
        }
        self.facts.insert(key, FactStats::new());
        true
    }

    /// Add every fact involving `factor` on either side.
    ///
    /// Existing entries keep their stats. Returns the number of new entries;
    /// a factor outside `1..=10` adds nothing.
    pub fn expand(&mut self, factor: u8) -> usize {
        if !is_valid_factor(factor) {
            log::warn!("Ignoring pool expansion for out-of-range factor {}", factor);
            return 0;
        }
        let mut added = 0;
        for i in MIN_FACTOR..=MAX_FACTOR {
            if self.insert_if_absent(FactKey::new(factor, i)) {
                added += 1;
            }
            if self.insert_if_absent(FactKey::new(i, factor)) {
                added += 1;
            }
        }
        added
    }

    /// Get stats for a fact.
    pub fn get(&self, key: &FactKey) -> Option<&FactStats> {
        self.facts.get(key)
    }

    /// Get mutable stats for a fact.
    pub fn get_mut(&mut self, key: &FactKey) -> Option<&mut FactStats> {
        self.facts.get_mut(key)
    }

    /// Check if a fact is in the pool.
    pub fn contains(&self, key: &FactKey) -> bool {
        self.facts.contains_key(key)
    }

    /// Number of facts in the pool.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Iterate over all facts and their stats.
    pub fn iter(&self) -> impl Iterator<Item = (&FactKey, &FactStats)> {
        self.facts.iter()
    }

    /// Facts eligible for a question.
    ///
    /// Boss rounds draw from the whole pool. Ordinary rounds only draw facts
    /// that involve the newest unlocked factor. The result is sorted by key.
    pub fn candidates(&self, ceiling: u8, boss: bool) -> Vec<(FactKey, &FactStats)> {
        let mut candidates: Vec<_> = self
            .facts
            .iter()
            .filter(|(key, _)| boss || key.involves(ceiling))
            .map(|(key, stats)| (*key, stats))
            .collect();
        candidates.sort_by_key(|(key, _)| *key);
        candidates
    }

    /// Count facts whose current streak is at least `min_streak`.
    pub fn mastered_count(&self, min_streak: u32) -> usize {
        self.facts
            .values()
            .filter(|stats| stats.current_streak >= min_streak)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_expand_adds_both_orientations() {
        let mut pool = FactPool::new();
        let added = pool.expand(2);

        // (2, 1..=10) and (1..=10, 2) share (2, 2).
        assert_eq!(added, 19);
        assert_eq!(pool.len(), 19);
        assert!(pool.contains(&FactKey::new(2, 9)));
        assert!(pool.contains(&FactKey::new(9, 2)));
        assert!(pool.contains(&FactKey::new(2, 2)));
    }

    #[test]
    fn test_expand_is_idempotent() {
        let mut pool = FactPool::new();
        pool.expand(3);
        pool.get_mut(&FactKey::new(3, 4))
            .unwrap()
            .record_correct(Utc::now());

        assert_eq!(pool.expand(3), 0);
        assert_eq!(pool.len(), 19);
        assert_eq!(pool.get(&FactKey::new(3, 4)).unwrap().correct_count, 1);
    }

    #[test]
    fn test_overlapping_expansions() {
        let mut pool = FactPool::new();
        pool.expand(2);
        let added = pool.expand(3);

        // (3, 2) and (2, 3) already exist from the first expansion.
        assert_eq!(added, 17);
        assert_eq!(pool.len(), 36);
    }

    #[test]
    fn test_full_cross_product() {
        let mut pool = FactPool::new();
        for factor in MIN_FACTOR..=MAX_FACTOR {
            pool.expand(factor);
        }
        assert_eq!(pool.len(), 100);
    }

    #[test]
    fn test_expand_rejects_out_of_range_factor() {
        let mut pool = FactPool::new();
        pool.expand(2);

        assert_eq!(pool.expand(0), 0);
        assert_eq!(pool.expand(11), 0);
        assert_eq!(pool.len(), 19);
        assert!(pool.iter().all(|(key, _)| key.is_valid()));
    }

    #[test]
    fn test_candidates_filter_by_ceiling() {
        let mut pool = FactPool::new();
        pool.expand(2);
        pool.expand(3);

        let ordinary = pool.candidates(3, false);
        assert_eq!(ordinary.len(), 19);
        assert!(ordinary.iter().all(|(key, _)| key.involves(3)));

        let boss = pool.candidates(3, true);
        assert_eq!(boss.len(), 36);

        // Sorted for reproducible selection.
        assert!(boss.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_mastered_count() {
        let mut pool = FactPool::new();
        pool.expand(2);
        let now = Utc::now();

        let stats = pool.get_mut(&FactKey::new(2, 5)).unwrap();
        stats.record_correct(now);
        stats.record_correct(now);
        stats.record_correct(now);

        pool.get_mut(&FactKey::new(5, 2)).unwrap().record_correct(now);

        assert_eq!(pool.mastered_count(3), 1);
        assert_eq!(pool.mastered_count(1), 2);
    }

    #[test]
    fn test_pool_serializes_as_string_keyed_map() {
        let mut pool = FactPool::new();
        pool.insert_if_absent(FactKey::new(2, 7));

        let json = serde_json::to_value(&pool).unwrap();
        let entry = &json["2 x 7"];
        assert_eq!(entry["correctCount"], 0);
        assert_eq!(entry["incorrectCount"], 0);
        assert_eq!(entry["currentStreak"], 0);
        assert!(entry["lastAsked"].is_null());

        let back: FactPool = serde_json::from_value(json).unwrap();
        assert_eq!(back, pool);
    }
}
