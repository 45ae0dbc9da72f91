//! Error types for the alarm scheduling core
//!
//! All errors use thiserror for structured error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Settings migration error: {0}")]
    Migration(String),

    #[error("Notification channel error: {0}")]
    Channel(String),

    #[error("Trigger notification error: {0}")]
    Trigger(String),

    #[error("{0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
