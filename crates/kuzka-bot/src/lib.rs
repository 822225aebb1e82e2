//! Kuzkabuh order bot.
//!
//! Walks a customer through a short order form in Telegram, validates every
//! answer, submits the confirmed order to the lead endpoint and tells the
//! administrator about it.
//!
//! - **validators**: format checks for free-text answers
//! - **catalog**: prompt texts, option sets and keyboards
//! - **flow**: the ordered steps of the form
//! - **wizard**: the state machine driving one conversation per chat
//! - **gateway** / **notifier**: where confirmed orders go
//! - **handlers** / **bot**: the Telegram transport

pub mod bot;
pub mod catalog;
pub mod config;
pub mod conversation;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod handlers;
pub mod notifier;
pub mod store;
pub mod validators;
pub mod wizard;

pub use bot::LeadBot;
pub use config::{BotConfig, WebhookConfig};
pub use conversation::{Conversation, ConversationId, Field, Step};
pub use error::{BotError, Result};
pub use flow::Flow;
pub use gateway::{Credentials, HttpGateway, SubmissionGateway};
pub use notifier::{Notifier, TelegramNotifier};
pub use validators::ValidationError;
pub use wizard::{Action, Outcome, Wizard};
