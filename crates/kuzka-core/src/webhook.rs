//! Webhook location shared by the bots.

use url::Url;

use crate::env::Env;
use crate::error::{ConfigError, Result};

/// Public origin all bots register their webhooks under.
pub const WEBHOOK_HOST_ENV: &str = "WEBHOOK_HOST";

/// Public webhook location plus the local port behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Public origin, e.g. `https://bot.example.ru`.
    pub host: String,
    pub path: String,
    pub port: u16,
}

impl WebhookConfig {
    /// Reads the webhook location when `WEBHOOK_HOST` is set.
    ///
    /// `path_key` and `port_key` name the per-bot variables.
    pub fn from_env(
        env: &Env,
        path_key: &str,
        default_path: &str,
        port_key: &str,
        default_port: u16,
    ) -> Result<Option<Self>> {
        let Some(host) = env.optional(WEBHOOK_HOST_ENV) else {
            return Ok(None);
        };
        Ok(Some(Self {
            host,
            path: env.or(path_key, default_path),
            port: env.parse_or(port_key, default_port)?,
        }))
    }

    /// Full URL registered with Telegram.
    pub fn url(&self) -> Result<Url> {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        let raw = format!("{}{}", self.host.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| ConfigError::Invalid {
            key: WEBHOOK_HOST_ENV.to_string(),
            value: raw,
            reason: e.to_string(),
        })
    }
}
