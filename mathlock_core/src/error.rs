//! Errors raised by the engine.

use mathlock_rules::RulesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The fact pool had nothing to offer for the current ceiling.
    ///
    /// This means the pool was never initialized and is a bug in the caller,
    /// not a gameplay condition.
    #[error("no candidate facts for ceiling {ceiling}; was the fact pool initialized?")]
    EmptyCandidatePool { ceiling: u8 },

    #[error("persistence I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Rules(#[from] RulesError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
