//! Errors raised by the rules crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid fact key: {0:?}")]
    InvalidFactKey(String),

    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RulesError>;
