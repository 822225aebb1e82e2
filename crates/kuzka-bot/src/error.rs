//! Error types for the order bot.

use thiserror::Error;

/// Errors that can occur in the order bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// Configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] kuzka_core::ConfigError),

    /// Failed to start the bot.
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),

    /// Webhook registration failed.
    #[error("Failed to register webhook: {0}")]
    WebhookFailed(String),

    /// A URL from the configuration could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The lead endpoint rejected the submission or could not be reached.
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Telegram API error.
    #[error("Telegram error: {0}")]
    TelegramError(String),
}

/// Result type for bot operations.
pub type Result<T> = std::result::Result<T, BotError>;

impl From<reqwest::Error> for BotError {
    fn from(e: reqwest::Error) -> Self {
        BotError::HttpError(e.to_string())
    }
}

impl From<teloxide::RequestError> for BotError {
    fn from(e: teloxide::RequestError) -> Self {
        BotError::TelegramError(e.to_string())
    }
}
