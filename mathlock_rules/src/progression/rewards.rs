//! Level-up rewards: abilities and bonus tokens.

use serde::{Deserialize, Serialize};

/// Abilities unlocked by reaching certain levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbilityType {
    SecondChance,
    HintPower,
    MathSight,
    SkipStone,
    XpBoost,
    PowerStrike,
}

impl AbilityType {
    pub fn name(&self) -> &'static str {
        match self {
            AbilityType::SecondChance => "SecondChance",
            AbilityType::HintPower => "HintPower",
            AbilityType::MathSight => "MathSight",
            AbilityType::SkipStone => "SkipStone",
            AbilityType::XpBoost => "XpBoost",
            AbilityType::PowerStrike => "PowerStrike",
        }
    }
}

impl std::fmt::Display for AbilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a player receives on first reaching a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    Ability(AbilityType),
    BonusTokens(u32),
}

/// The reward for reaching `level`, if that level has one.
pub fn reward_for_level(level: u32) -> Option<Reward> {
    match level {
        3 => Some(Reward::Ability(AbilityType::SecondChance)),
        5 => Some(Reward::Ability(AbilityType::HintPower)),
        7 => Some(Reward::Ability(AbilityType::MathSight)),
        10 => Some(Reward::BonusTokens(1)),
        12 => Some(Reward::Ability(AbilityType::SkipStone)),
        14 => Some(Reward::Ability(AbilityType::XpBoost)),
        16 => Some(Reward::Ability(AbilityType::PowerStrike)),
        18 => Some(Reward::BonusTokens(2)),
        20 => Some(Reward::BonusTokens(3)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_table() {
        assert_eq!(
            reward_for_level(3),
            Some(Reward::Ability(AbilityType::SecondChance))
        );
        assert_eq!(reward_for_level(10), Some(Reward::BonusTokens(1)));
        assert_eq!(
            reward_for_level(16),
            Some(Reward::Ability(AbilityType::PowerStrike))
        );
        assert_eq!(reward_for_level(20), Some(Reward::BonusTokens(3)));
        assert_eq!(reward_for_level(1), None);
        assert_eq!(reward_for_level(4), None);
        assert_eq!(reward_for_level(21), None);
    }

    #[test]
    fn test_ability_serializes_by_name() {
        let json = serde_json::to_string(&AbilityType::MathSight).unwrap();
        assert_eq!(json, "\"MathSight\"");
        assert_eq!(AbilityType::XpBoost.to_string(), "XpBoost");
    }
}
