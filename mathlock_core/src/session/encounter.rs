//! Transient per-battle state.

use uuid::Uuid;

/// Identifier for one battle, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncounterId(pub Uuid);

impl EncounterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for EncounterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EncounterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a battle is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BattlePhase {
    /// No battle has been started yet.
    #[default]
    Initializing,
    /// A question is on screen.
    AwaitingAnswer,
    /// An answer was checked; damage has not necessarily landed yet.
    Resolving { correct: bool },
    /// The monster ran out of health.
    Won,
    /// The player ran out of health.
    Lost,
}

impl BattlePhase {
    /// Check if the battle has ended.
    pub fn is_over(&self) -> bool {
        matches!(self, BattlePhase::Won | BattlePhase::Lost)
    }

    /// Check if a battle is running and still open to questions.
    pub fn is_in_battle(&self) -> bool {
        matches!(self, BattlePhase::AwaitingAnswer | BattlePhase::Resolving { .. })
    }
}

/// Health pools and tallies for one battle. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncounterState {
    pub id: EncounterId,
    pub player_health: u32,
    pub player_max_health: u32,
    pub monster_health: u32,
    pub monster_max_health: u32,
    pub correct_this_session: u32,
    /// Monsters defeated since the controller was created. Survives new battles.
    pub kills: u32,
    pub is_boss: bool,
}

impl Default for EncounterState {
    fn default() -> Self {
        Self {
            id: EncounterId::nil(),
            player_health: 0,
            player_max_health: 0,
            monster_health: 0,
            monster_max_health: 0,
            correct_this_session: 0,
            kills: 0,
            is_boss: false,
        }
    }
}

impl EncounterState {
    /// Reset both health pools and the answer tally for a new battle.
    pub fn reset(&mut self, player_max_health: u32, monster_max_health: u32) {
        self.id = EncounterId::new();
        self.player_health = player_max_health;
        self.player_max_health = player_max_health;
        self.monster_health = monster_max_health;
        self.monster_max_health = monster_max_health;
        self.correct_this_session = 0;
        self.is_boss = false;
    }

    /// Damage the monster. Returns `true` if this blow took it to zero.
    pub fn damage_monster(&mut self, amount: u32) -> bool {
        if self.monster_health == 0 {
            return false;
        }
        self.monster_health = self.monster_health.saturating_sub(amount);
        if self.monster_health == 0 {
            self.kills += 1;
            return true;
        }
        false
    }

    /// Damage the player. Returns `true` if this blow took them to zero.
    pub fn damage_player(&mut self, amount: u32) -> bool {
        if self.player_health == 0 {
            return false;
        }
        self.player_health = self.player_health.saturating_sub(amount);
        self.player_health == 0
    }

    pub fn is_monster_defeated(&self) -> bool {
        self.monster_health == 0
    }

    pub fn is_player_defeated(&self) -> bool {
        self.player_health == 0
    }

    /// Monster health as a percentage of its maximum, for health bars.
    pub fn monster_health_percent(&self) -> u32 {
        if self.monster_max_health == 0 {
            return 0;
        }
        self.monster_health * 100 / self.monster_max_health
    }
}
