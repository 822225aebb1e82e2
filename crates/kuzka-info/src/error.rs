//! Error types for the currency bot.

use thiserror::Error;

/// Errors that can occur in the currency bot.
#[derive(Debug, Error)]
pub enum InfoError {
    /// Configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] kuzka_core::ConfigError),

    /// A cron expression could not be parsed.
    #[error("Invalid schedule {expression:?}: {reason}")]
    InvalidSchedule { expression: String, reason: String },

    /// The rates feed does not list a currency.
    #[error("Rate for {0} is missing from the feed")]
    MissingRate(String),

    /// Failed to start the bot.
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),

    /// Webhook registration failed.
    #[error("Failed to register webhook: {0}")]
    WebhookFailed(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Telegram API error.
    #[error("Telegram error: {0}")]
    TelegramError(String),
}

/// Result type for currency bot operations.
pub type Result<T> = std::result::Result<T, InfoError>;

impl From<reqwest::Error> for InfoError {
    fn from(e: reqwest::Error) -> Self {
        InfoError::HttpError(e.to_string())
    }
}

impl From<teloxide::RequestError> for InfoError {
    fn from(e: teloxide::RequestError) -> Self {
        InfoError::TelegramError(e.to_string())
    }
}
