//! Persistence - where the save state lives between sessions.
//!
//! The engine only needs two things from storage:
//! - **load**: always returns a usable save, falling back to defaults
//! - **save**: may fail; the engine logs the failure and keeps going

mod json_file;

pub use json_file::*;

use mathlock_rules::SaveState;

use crate::error::Result;

/// Storage backend for the save state.
pub trait Persistence {
    /// Load the saved state, or a fresh default if there is none or it is unreadable.
    fn load(&self) -> SaveState;

    /// Write the state out.
    fn save(&mut self, state: &SaveState) -> Result<()>;
}

impl<P: Persistence + ?Sized> Persistence for Box<P> {
    fn load(&self) -> SaveState {
        (**self).load()
    }

    fn save(&mut self, state: &SaveState) -> Result<()> {
        (**self).save(state)
    }
}

/// In-process storage. Useful for tests and for hosts that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<SaveState>,
    save_count: usize,
    fail_saves: bool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `state`.
    pub fn with_state(state: SaveState) -> Self {
        Self {
            saved: Some(state),
            ..Self::default()
        }
    }

    /// Make every subsequent save fail (or succeed again).
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// The last successfully saved state.
    pub fn saved(&self) -> Option<&SaveState> {
        self.saved.as_ref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> SaveState {
        self.saved.clone().unwrap_or_default()
    }

    fn save(&mut self, state: &SaveState) -> Result<()> {
        if self.fail_saves {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "memory store is set to fail",
            )
            .into());
        }
        self.saved = Some(state.clone());
        self.save_count += 1;
        Ok(())
    }
}
