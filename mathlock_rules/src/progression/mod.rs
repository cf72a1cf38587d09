//! Player progression: XP curve, level-ups, rewards and the knight stage.

mod rewards;

pub use rewards::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Highest level that still changes the knight's look.
const KNIGHT_MAX_LEVEL: u32 = 20;

/// Number of knight stages; stages are `0..KNIGHT_STAGES`.
const KNIGHT_STAGES: u32 = 10;

/// Largest XP grant accepted in one call. Bigger grants are capped.
pub const MAX_XP_PER_GRANT: u64 = 1_000_000;

/// XP needed to go from `level` to `level + 1`.
pub fn xp_required(level: u32) -> u64 {
    100 + u64::from(level) * 50
}

/// Visual stage of the player's knight for a level, in `0..=9`.
///
/// Two levels per stage; levels outside `1..=20` clamp.
pub fn knight_stage_index(level: u32) -> u32 {
    let level = level.clamp(1, KNIGHT_MAX_LEVEL);
    ((level - 1) / 2).min(KNIGHT_STAGES - 1)
}

/// Persisted player progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerProgress {
    pub level: u32,
    /// Always below `xp_required(level)` after any mutation.
    pub current_xp: u64,
    pub total_xp: u64,
    pub correct_answer_count: u64,
    pub bonus_tokens: u32,
    pub unlocked_abilities: BTreeSet<AbilityType>,
    pub streak_days: u32,
    pub last_quiz_date: Option<NaiveDate>,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            level: 1,
            current_xp: 0,
            total_xp: 0,
            correct_answer_count: 0,
            bonus_tokens: 0,
            unlocked_abilities: BTreeSet::new(),
            streak_days: 0,
            last_quiz_date: None,
        }
    }
}

impl PlayerProgress {
    /// Create level-1 progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// XP needed to finish the current level.
    pub fn xp_to_next_level(&self) -> u64 {
        xp_required(self.level).saturating_sub(self.current_xp)
    }

    /// Grant XP, levelling up as many times as the amount allows.
    ///
    /// Non-positive amounts are ignored and anything above
    /// `MAX_XP_PER_GRANT` is capped. Each crossed threshold applies that
    /// level's reward. Returns `true` if at least one level-up happened.
    pub fn add_xp(&mut self, amount: i64) -> bool {
        if amount <= 0 {
            return false;
        }
        let amount = amount.unsigned_abs().min(MAX_XP_PER_GRANT);

        self.current_xp = self.current_xp.saturating_add(amount);
        self.total_xp = self.total_xp.saturating_add(amount);

        let mut leveled_up = false;
        while self.current_xp >= xp_required(self.level) {
            self.current_xp -= xp_required(self.level);
            self.level = self.level.saturating_add(1);
            leveled_up = true;

            log::info!("Player reached level {}", self.level);
            if let Some(reward) = reward_for_level(self.level) {
                self.apply_reward(reward);
            }
        }

        leveled_up
    }

    /// Apply a level-up reward.
    pub fn apply_reward(&mut self, reward: Reward) {
        match reward {
            Reward::Ability(ability) => {
                if self.unlock_ability(ability) {
                    log::info!("Unlocked ability {}", ability);
                }
            }
            Reward::BonusTokens(count) => {
                self.bonus_tokens += count;
                log::info!("Gained {} bonus token(s), now {}", count, self.bonus_tokens);
            }
        }
    }

    /// Unlock an ability. Returns `false` if it was already unlocked.
    pub fn unlock_ability(&mut self, ability: AbilityType) -> bool {
        self.unlocked_abilities.insert(ability)
    }

    /// Check if an ability is unlocked.
    pub fn has_ability(&self, ability: AbilityType) -> bool {
        self.unlocked_abilities.contains(&ability)
    }

    /// Spend one bonus token, if any are left.
    pub fn spend_bonus_token(&mut self) -> bool {
        if self.bonus_tokens == 0 {
            return false;
        }
        self.bonus_tokens -= 1;
        true
    }

    /// Update the daily quiz streak for a quiz taken on `today`.
    ///
    /// Same day leaves the streak alone, the following day extends it, and
    /// anything else starts a new streak of one.
    pub fn record_quiz_day(&mut self, today: NaiveDate) {
        self.streak_days = match self.last_quiz_date {
            Some(last) if last == today => self.streak_days.max(1),
            Some(last) if last.succ_opt() == Some(today) => self.streak_days + 1,
            _ => 1,
        };
        self.last_quiz_date = Some(today);
    }

    /// Visual stage for the current level.
    pub fn knight_stage(&self) -> u32 {
        knight_stage_index(self.level)
    }
}
