//! Error types for the wellbeing bot.

use crate::survey::AnswerKey;

/// Top-level error type for the bot.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Validation error: {0}")]
    Score(#[from] ScoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Configuration-related errors. Fatal at startup, reported once.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Channel-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Channel {name} failed to start: {reason}")]
    StartupFailed { name: String, reason: String },

    #[error("Channel {name} disconnected: {reason}")]
    Disconnected { name: String, reason: String },

    #[error("Failed to send response on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },
}

/// Scaled-answer validation errors raised at finalize time.
///
/// Both kinds surface as the same user-facing scale-error message; the
/// distinction exists for logs only.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("Answer {key} is not a number: {value:?}")]
    NotANumber { key: AnswerKey, value: String },

    #[error("Answer {key} is out of range 1-7: {value}")]
    OutOfRange { key: AnswerKey, value: i64 },
}

/// Result-log persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the optional reflection call.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Gemini request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Invalid response from Gemini: {reason}")]
    InvalidResponse { reason: String },
}

/// Result type alias for the bot.
pub type Result<T> = std::result::Result<T, Error>;
