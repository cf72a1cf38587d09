//! Multiplication facts: the `A x B` keys, their mastery stats, and the pool.

mod pool;
mod stats;

pub use pool::*;
pub use stats::*;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::RulesError;

/// Smallest factor a fact may use.
pub const MIN_FACTOR: u8 = 1;

/// Largest factor a fact may use, and the cap for the unlocked ceiling.
pub const MAX_FACTOR: u8 = 10;

/// The ceiling a fresh save starts from.
pub const STARTING_CEILING: u8 = 2;

/// Check whether `factor` is in `MIN_FACTOR..=MAX_FACTOR`.
pub fn is_valid_factor(factor: u8) -> bool {
    (MIN_FACTOR..=MAX_FACTOR).contains(&factor)
}

/// An ordered multiplication question `a x b`.
///
/// Order matters for storage: `3 x 7` and `7 x 3` are separate pool entries
/// with separate stats, even though they share a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FactKey {
    pub a: u8,
    pub b: u8,
}

impl FactKey {
    /// Create a fact key. Factors are not range-checked here; use
    /// `FactKey::from_str` for untrusted input.
    pub fn new(a: u8, b: u8) -> Self {
        Self { a, b }
    }

    /// Check that both factors are in `1..=10`.
    pub fn is_valid(&self) -> bool {
        is_valid_factor(self.a) && is_valid_factor(self.b)
    }

    /// The correct answer.
    pub fn product(&self) -> i64 {
        i64::from(self.a) * i64::from(self.b)
    }

    /// Check whether either side of the fact is `factor`.
    pub fn involves(&self, factor: u8) -> bool {
        self.a == factor || self.b == factor
    }

    /// Check an answer against the product.
    pub fn is_correct(&self, answer: i64) -> bool {
        answer == self.product()
    }

    /// The pair as a tuple, for callers that display `a` and `b` separately.
    pub fn as_pair(&self) -> (u8, u8) {
        (self.a, self.b)
    }
}

impl std::fmt::Display for FactKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.a, self.b)
    }
}

impl FromStr for FactKey {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RulesError::InvalidFactKey(s.to_string());

        let (left, right) = s.split_once('x').ok_or_else(invalid)?;
        let a: u8 = left.trim().parse().map_err(|_| invalid())?;
        let b: u8 = right.trim().parse().map_err(|_| invalid())?;

        let key = FactKey::new(a, b);
        if !key.is_valid() {
            return Err(invalid());
        }
        Ok(key)
    }
}

// Keys serialize as their "A x B" string so the pool is a plain JSON object.
impl Serialize for FactKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FactKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_key_display() {
        assert_eq!(FactKey::new(3, 7).to_string(), "3 x 7");
        assert_eq!(FactKey::new(10, 1).to_string(), "10 x 1");
    }

    #[test]
    fn test_fact_key_parse() {
        let key: FactKey = "4 x 9".parse().unwrap();
        assert_eq!(key, FactKey::new(4, 9));

        let tight: FactKey = "10x2".parse().unwrap();
        assert_eq!(tight, FactKey::new(10, 2));
    }

    #[test]
    fn test_fact_key_parse_rejects_garbage() {
        assert!("".parse::<FactKey>().is_err());
        assert!("3 * 4".parse::<FactKey>().is_err());
        assert!("0 x 4".parse::<FactKey>().is_err());
        assert!("3 x 11".parse::<FactKey>().is_err());
        assert!("three x 4".parse::<FactKey>().is_err());
    }

    #[test]
    fn test_product_and_involves() {
        let key = FactKey::new(6, 8);
        assert_eq!(key.product(), 48);
        assert!(key.is_correct(48));
        assert!(!key.is_correct(42));
        assert!(key.involves(6));
        assert!(key.involves(8));
        assert!(!key.involves(7));
    }

    #[test]
    fn test_fact_key_validity() {
        assert!(FactKey::new(1, 10).is_valid());
        assert!(!FactKey::new(0, 4).is_valid());
        assert!(!FactKey::new(11, 3).is_valid());
        assert!(is_valid_factor(MAX_FACTOR));
        assert!(!is_valid_factor(0));
    }

    #[test]
    fn test_order_matters_for_identity() {
        assert_ne!(FactKey::new(3, 7), FactKey::new(7, 3));
        assert_eq!(FactKey::new(3, 7).product(), FactKey::new(7, 3).product());
    }
}
