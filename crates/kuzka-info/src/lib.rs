//! Kuzkabuh currency bot.
//!
//! Posts the CBR dollar and euro rates to the company group twice a day and
//! greets new members.

pub mod bot;
pub mod config;
pub mod error;
pub mod handlers;
pub mod rates;
pub mod scheduler;

pub use bot::InfoBot;
pub use config::InfoConfig;
pub use error::{InfoError, Result};
pub use rates::{format_rates, CbrClient, CurrencyRates, Quote, RatesSource};
pub use scheduler::{run_once, Announcer, Edition, RatesJob, TelegramAnnouncer};
