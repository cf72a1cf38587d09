//! Content lookup - what monster the presentation layer shows for an encounter.

use serde::{Deserialize, Serialize};

/// Presentation data for one monster.
///
/// `max_health` and `reward_xp` come from the content catalog and are for
/// display only. Encounter health is derived from the unlocked ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterDescriptor {
    pub display_name: String,
    pub is_boss: bool,
    pub reward_xp: u32,
    pub sprite_reference: String,
    pub max_health: u32,
}

impl MonsterDescriptor {
    /// Create a descriptor with the given name.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            is_boss: false,
            reward_xp: 0,
            sprite_reference: String::new(),
            max_health: 0,
        }
    }

    pub fn with_boss(mut self, is_boss: bool) -> Self {
        self.is_boss = is_boss;
        self
    }

    pub fn with_reward_xp(mut self, reward_xp: u32) -> Self {
        self.reward_xp = reward_xp;
        self
    }

    pub fn with_sprite(mut self, sprite_reference: impl Into<String>) -> Self {
        self.sprite_reference = sprite_reference.into();
        self
    }

    pub fn with_max_health(mut self, max_health: u32) -> Self {
        self.max_health = max_health;
        self
    }
}

/// Source of monster content, supplied by the host.
pub trait ContentLookup {
    /// Pick a monster for a player of `level`.
    fn monster_for(&self, level: u32, wants_boss: bool) -> MonsterDescriptor;
}

impl<F> ContentLookup for F
where
    F: Fn(u32, bool) -> MonsterDescriptor,
{
    fn monster_for(&self, level: u32, wants_boss: bool) -> MonsterDescriptor {
        self(level, wants_boss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let monster = MonsterDescriptor::new("Cave Troll")
            .with_boss(true)
            .with_reward_xp(50)
            .with_sprite("monsters/troll.png")
            .with_max_health(500);

        assert_eq!(monster.display_name, "Cave Troll");
        assert!(monster.is_boss);
        assert_eq!(monster.reward_xp, 50);
        assert_eq!(monster.sprite_reference, "monsters/troll.png");
        assert_eq!(monster.max_health, 500);
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |level: u32, boss: bool| {
            MonsterDescriptor::new(format!("Slime L{}", level)).with_boss(boss)
        };

        let monster = lookup.monster_for(4, true);
        assert_eq!(monster.display_name, "Slime L4");
        assert!(monster.is_boss);
    }
}
