//! # Mathlock Core
//!
//! The engine behind the multiplication lock. It sits on top of
//! `mathlock_rules` and decides what to ask, records how the player did,
//! and runs the battle that wraps each run of questions.
//!
//! ## Core Components
//!
//! - **store**: Owns the save state and writes it back after every change
//! - **selector**: Weighted question picker that leans on missed facts
//! - **session**: Battle state machine tying answers to XP and health
//! - **persistence**: Storage backends for the save state
//! - **content**: Contract for the host's monster catalog
//!
//! ## Design Philosophy
//!
//! - **Host-Driven**: The host owns the input loop and animation timing; the engine only reacts
//! - **Reproducible**: Randomness is injected, so a fixed seed replays the same questions
//! - **Best-Effort Saves**: A failed save is logged and play continues

pub mod content;
pub mod error;
pub mod persistence;
pub mod selector;
pub mod session;
pub mod store;

pub use content::*;
pub use error::CoreError;
pub use persistence::*;
pub use selector::*;
pub use session::*;
pub use store::*;
