//! Kuzkabuh Core - shared plumbing for the order bot, the currency bot and
//! the admin API.
//!
//! - **config**: data directory layout and `.env` loading
//! - **env**: typed environment lookups with readable errors
//! - **logging**: tracing subscriber setup driven by `-v` counts
//! - **webhook**: public webhook location for the bots

pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod webhook;

pub use config::{data_dir, env_file, leads_dir, load_env_files};
pub use env::Env;
pub use error::{ConfigError, Result};
pub use webhook::WebhookConfig;
