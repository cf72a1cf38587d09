//! Weighted selection universe for the fact selector.

use mathlock_rules::FactKey;
use rand::Rng;

/// A set of facts where each fact occupies a slice of the draw range equal
/// to its weight.
///
/// Stored as cumulative weights so a draw is a binary search.
#[derive(Debug, Clone, Default)]
pub struct WeightedUniverse {
    /// `(fact, cumulative weight up to and including this fact)`.
    entries: Vec<(FactKey, u64)>,
    total: u64,
}

impl WeightedUniverse {
    /// Build a universe from `(fact, weight)` pairs. Zero weights are dropped.
    pub fn new(weighted: impl IntoIterator<Item = (FactKey, u64)>) -> Self {
        let mut entries = Vec::new();
        let mut total = 0;
        for (key, weight) in weighted {
            if weight == 0 {
                continue;
            }
            total += weight;
            entries.push((key, total));
        }
        Self { entries, total }
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.total
    }

    /// Number of distinct facts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight of a single fact, or 0 if it is not in the universe.
    pub fn weight_of(&self, key: &FactKey) -> u64 {
        let mut previous = 0;
        for (entry, cumulative) in &self.entries {
            if entry == key {
                return cumulative - previous;
            }
            previous = *cumulative;
        }
        0
    }

    /// A copy of this universe with every occurrence of `key` removed.
    pub fn without(&self, key: &FactKey) -> Self {
        let mut previous = 0;
        let weights = self.entries.iter().filter_map(|(entry, cumulative)| {
            let weight = cumulative - previous;
            previous = *cumulative;
            (entry != key).then_some((*entry, weight))
        });
        Self::new(weights.collect::<Vec<_>>())
    }

    /// Draw one fact uniformly over the weighted range.
    ///
    /// Returns `None` for an empty universe.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<FactKey> {
        if self.total == 0 {
            return None;
        }
        let ticket = rng.gen_range(0..self.total);
        let index = self.entries.partition_point(|(_, cumulative)| *cumulative <= ticket);
        self.entries.get(index).map(|(key, _)| *key)
    }
}
