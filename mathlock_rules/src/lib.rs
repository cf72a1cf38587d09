//! # Mathlock Rules
//!
//! Plain data and pure rules for the multiplication lock: facts and their
//! mastery stats, the growing fact pool, XP and level-up rewards, and the
//! save state that ties them together. Nothing here performs I/O except
//! reading a settings file.

pub mod error;
pub mod facts;
pub mod progression;
pub mod save_state;
pub mod settings;

pub use error::RulesError;
pub use facts::*;
pub use progression::*;
pub use save_state::*;
pub use settings::*;
