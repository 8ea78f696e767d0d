// src/infra/errors.rs — Error types for Lucence

use thiserror::Error;

use crate::api::types::ResponseCode;

pub type Result<T, E = LucenceError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum LucenceError {
    // Asset lifecycle errors (scoped to one request)
    #[error("Plugin '{name}' already exists")]
    Conflict { name: String },

    #[error("Plugin '{name}' not found")]
    NotFound { name: String },

    #[error("Invalid plugin name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    // Infra
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LucenceError {
    pub fn invalid_name(name: &str, reason: impl Into<String>) -> Self {
        LucenceError::InvalidName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Envelope code reported to HTTP callers for this failure.
    pub fn code(&self) -> ResponseCode {
        match self {
            LucenceError::Conflict { .. } | LucenceError::InvalidName { .. } => ResponseCode::Fail,
            LucenceError::NotFound { .. } => ResponseCode::NotFound,
            LucenceError::Io(_) | LucenceError::Config(_) | LucenceError::Other(_) => {
                ResponseCode::ServerError
            }
        }
    }
}

impl From<tokio::task::JoinError> for LucenceError {
    fn from(e: tokio::task::JoinError) -> Self {
        LucenceError::Other(anyhow::anyhow!("blocking task failed: {e}"))
    }
}
