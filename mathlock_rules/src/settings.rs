//! Tunable game settings, read from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Correct answers needed to finish an encounter unless the save says otherwise.
pub const DEFAULT_REQUIRED_CORRECT_ANSWERS: u32 = 10;

/// Coefficients for the fact-selection weight
/// `max(floor, base + per_incorrect * incorrect - per_streak * streak)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionWeights {
    pub base: i64,
    pub per_incorrect: i64,
    pub per_streak: i64,
    /// Lowest weight any candidate can have. Must be at least 1.
    pub floor: i64,
}

impl Default for SelectionWeights {
    fn default() -> Self {
        Self {
            base: 10,
            per_incorrect: 5,
            per_streak: 2,
            floor: 1,
        }
    }
}

/// Game balance knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub player_max_health: u32,
    pub monster_base_health: u32,
    /// Extra monster health per unlocked factor.
    pub monster_health_per_tier: u32,
    /// Threshold written into a fresh save.
    pub required_correct_answers: u32,
    pub xp_per_correct: i64,
    pub selection: SelectionWeights,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            player_max_health: 100,
            monster_base_health: 15,
            monster_health_per_tier: 15,
            required_correct_answers: DEFAULT_REQUIRED_CORRECT_ANSWERS,
            xp_per_correct: 10,
            selection: SelectionWeights::default(),
        }
    }
}

impl GameSettings {
    /// Parse settings from a TOML string. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut settings: GameSettings = toml::from_str(contents)?;
        settings.selection.floor = settings.selection.floor.max(1);
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Monster health for an encounter at the given ceiling.
    pub fn monster_max_health(&self, ceiling: u8) -> u32 {
        self.monster_base_health + self.monster_health_per_tier * u32::from(ceiling)
    }
}
