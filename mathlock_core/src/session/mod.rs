//! Session Controller - runs one battle at a time.
//!
//! The host drives the loop: ask a question, submit the answer, then apply
//! damage when its animation lands. The controller does no I/O of its own
//! beyond saving through the fact store.
//!
//! ```text
//! Initializing -> AwaitingAnswer -> Resolving -> AwaitingAnswer -> ... -> Won | Lost
//! ```

mod encounter;

pub use encounter::*;

use chrono::NaiveDate;
use mathlock_rules::{FactKey, GameSettings, PlayerProgress};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::content::{ContentLookup, MonsterDescriptor};
use crate::error::Result;
use crate::persistence::Persistence;
use crate::selector::FactSelector;
use crate::store::FactStore;

/// Result of checking one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { leveled_up: bool },
    /// Carries the right answer so the host can show it.
    Incorrect { correct_answer: i64 },
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct { .. })
    }

    pub fn leveled_up(&self) -> bool {
        matches!(self, AnswerOutcome::Correct { leveled_up: true })
    }
}

/// Ties the fact store, selector and progression into a battle loop.
pub struct SessionController<P: Persistence, R: Rng> {
    store: FactStore<P>,
    selector: FactSelector<R>,
    settings: GameSettings,
    encounter: EncounterState,
    phase: BattlePhase,
}

impl<P: Persistence> SessionController<P, ChaCha8Rng> {
    /// Load the save from `persistence` with an entropy-seeded selector.
    pub fn open(persistence: P, settings: GameSettings) -> Self {
        let selector = FactSelector::with_weights(settings.selection, ChaCha8Rng::from_entropy());
        Self::open_with_selector(persistence, settings, selector)
    }
}

impl<P: Persistence, R: Rng> SessionController<P, R> {
    /// Load the save from `persistence` and use the given selector.
    ///
    /// A fresh save takes its answer threshold from `settings`.
    pub fn open_with_selector(persistence: P, settings: GameSettings, selector: FactSelector<R>) -> Self {
        let mut state = persistence.load();
        if state.fact_pool.is_empty() {
            state.required_correct_answers = settings.required_correct_answers;
        }
        let mut store = FactStore::with_state(state, persistence);
        store.initialize_if_empty();
        store.normalize();
        Self::new(store, selector, settings)
    }

    /// Build a controller from parts.
    pub fn new(store: FactStore<P>, selector: FactSelector<R>, settings: GameSettings) -> Self {
        Self {
            store,
            selector,
            settings,
            encounter: EncounterState::default(),
            phase: BattlePhase::Initializing,
        }
    }

    pub fn store(&self) -> &FactStore<P> {
        &self.store
    }

    pub fn selector(&self) -> &FactSelector<R> {
        &self.selector
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn encounter(&self) -> &EncounterState {
        &self.encounter
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn progress(&self) -> &PlayerProgress {
        self.store.progress()
    }

    /// Start a battle: full player health, monster health from the ceiling.
    pub fn start_new_battle(&mut self) {
        let monster_max = self.settings.monster_max_health(self.store.ceiling());
        self.encounter.reset(self.settings.player_max_health, monster_max);
        self.phase = BattlePhase::AwaitingAnswer;

        log::info!(
            "Battle {} started: ceiling {}, monster health {}",
            self.encounter.id,
            self.store.ceiling(),
            monster_max
        );
    }

    /// Start a battle against a monster chosen by `content`.
    ///
    /// The descriptor decides whether questions come from the whole pool.
    /// Its health and reward fields are not used for the battle itself.
    pub fn start_battle_with<C: ContentLookup + ?Sized>(
        &mut self,
        content: &C,
        wants_boss: bool,
    ) -> MonsterDescriptor {
        let monster = content.monster_for(self.store.progress().level, wants_boss);
        self.start_new_battle();
        self.encounter.is_boss = monster.is_boss;
        log::debug!("Battle {} monster: {}", self.encounter.id, monster.display_name);
        monster
    }

    /// Pick the next question.
    ///
    /// Before the first battle the phase stays at `Initializing`.
    pub fn next_question(&mut self, is_boss: bool) -> Result<FactKey> {
        let key = self.selector.next_question(&mut self.store, is_boss)?;
        if self.phase.is_in_battle() {
            self.phase = BattlePhase::AwaitingAnswer;
        }
        Ok(key)
    }

    /// Pick the next question using the current encounter's boss flag.
    pub fn next_question_for_encounter(&mut self) -> Result<FactKey> {
        self.next_question(self.encounter.is_boss)
    }

    /// Check an answer to the question `a x b`.
    ///
    /// A correct answer awards XP and, once a battle has started, counts
    /// toward the session. Fact stats and progress are saved together.
    /// Health does not move here; call `apply_damage` or
    /// `apply_player_damage` when the hit lands.
    pub fn process_answer(&mut self, answer: i64, a: u8, b: u8) -> AnswerOutcome {
        let Some(correct) = self.store.record_answer(answer) else {
            return AnswerOutcome::Incorrect {
                correct_answer: i64::from(a) * i64::from(b),
            };
        };
        if self.phase.is_in_battle() {
            self.phase = BattlePhase::Resolving { correct };
        }

        if !correct {
            self.store.persist();
            return AnswerOutcome::Incorrect {
                correct_answer: i64::from(a) * i64::from(b),
            };
        }

        if self.phase != BattlePhase::Initializing {
            self.encounter.correct_this_session += 1;
        }
        let progress = self.store.progress_mut();
        progress.correct_answer_count += 1;
        let leveled_up = progress.add_xp(self.settings.xp_per_correct);
        self.store.persist();

        if leveled_up {
            log::info!(
                "Battle {}: level up to {}",
                self.encounter.id,
                self.store.progress().level
            );
        }

        AnswerOutcome::Correct { leveled_up }
    }

    /// Damage the monster, ending the battle in a win at zero health.
    pub fn apply_damage(&mut self, amount: u32) {
        if self.encounter.damage_monster(amount) && !self.phase.is_over() {
            self.phase = BattlePhase::Won;
            log::info!(
                "Battle {} won ({} kills)",
                self.encounter.id,
                self.encounter.kills
            );
        }
    }

    /// Damage the player, ending the battle in a loss at zero health.
    pub fn apply_player_damage(&mut self, amount: u32) {
        if self.encounter.damage_player(amount) && !self.phase.is_over() {
            self.phase = BattlePhase::Lost;
            log::info!("Battle {} lost", self.encounter.id);
        }
    }

    /// Check if enough correct answers were given this session.
    pub fn is_session_complete(&self) -> bool {
        self.encounter.correct_this_session >= self.store.state().required_correct_answers
    }

    /// Grant XP outside of answering, e.g. a monster's reward. Saves on success.
    pub fn add_xp(&mut self, amount: i64) -> bool {
        if amount <= 0 {
            return false;
        }
        self.store.update_progress(|progress| progress.add_xp(amount))
    }

    /// Unlock the next factor. Returns `false` once every factor is unlocked.
    pub fn promote(&mut self) -> bool {
        self.store.promote()
    }

    /// Visual stage for the player's current level.
    pub fn knight_stage_index(&self) -> u32 {
        self.store.progress().knight_stage()
    }

    /// Record that the player quizzed on `today` and save.
    pub fn record_quiz_day(&mut self, today: NaiveDate) {
        self.store.update_progress(|progress| progress.record_quiz_day(today));
    }
}
