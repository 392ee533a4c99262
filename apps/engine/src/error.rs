use thiserror::Error;

use crate::errors::decode::DecodeError;
use crate::errors::domain::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Player source error: {detail}")]
    PlayerSource { detail: String },
    #[error("Cancelled")]
    Cancelled,
}

impl AppError {
    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn player_source(detail: impl Into<String>) -> Self {
        Self::PlayerSource {
            detail: detail.into(),
        }
    }

    /// Stable error code for logs and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Domain(_) => "INVALID_MOVE",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::PlayerSource { .. } => "PLAYER_SOURCE",
            AppError::Cancelled => "CANCELLED",
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("Environment variable error: {e}"))
    }
}
