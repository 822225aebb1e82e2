//! Order bot configuration read from the environment.

use std::time::Duration;

pub use kuzka_core::WebhookConfig;
use kuzka_core::Env;
use url::Url;

use crate::error::Result;
use crate::gateway::{Credentials, DEFAULT_SUBMIT_TIMEOUT};

pub const TOKEN_ENV: &str = "KUZKABUH_BOT_TOKEN";
pub const ADMIN_CHAT_ENV: &str = "ADMIN_TELEGRAM_ID";
pub const LEAD_API_URL_ENV: &str = "LEAD_API_URL";
pub const ADMIN_USER_ENV: &str = "ADMIN_USER";
pub const ADMIN_PASS_ENV: &str = "ADMIN_PASS";
pub const TIMEOUT_ENV: &str = "LEAD_API_TIMEOUT_SECS";
pub const COLLECT_NAME_ENV: &str = "COLLECT_NAME";
pub const WEBHOOK_PATH_ENV: &str = "KUZKABUH_WEBHOOK_PATH";
pub const WEBHOOK_PORT_ENV: &str = "KUZKABUH_WEBHOOK_PORT";

/// Default local port the webhook listener binds to.
pub const DEFAULT_WEBHOOK_PORT: u16 = 8001;
const DEFAULT_WEBHOOK_PATH: &str = "/webhook/kuzkabuh";

/// Everything the order bot needs to run.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    /// Chat that receives new-lead notifications.
    pub admin_chat_id: i64,
    /// Intake endpoint of the admin API.
    pub lead_api_url: Url,
    pub api_credentials: Option<Credentials>,
    pub submit_timeout: Duration,
    /// Whether the form asks for a contact name.
    pub collect_name: bool,
    /// Set when `WEBHOOK_HOST` is configured.
    pub webhook: Option<WebhookConfig>,
}

impl BotConfig {
    pub fn from_env(env: &Env) -> Result<Self> {
        let token = env.require(TOKEN_ENV)?;
        let admin_chat_id = env.parse_required(ADMIN_CHAT_ENV)?;
        let lead_api_url = Url::parse(&env.require(LEAD_API_URL_ENV)?)?;

        let api_credentials = match (env.optional(ADMIN_USER_ENV), env.optional(ADMIN_PASS_ENV)) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            _ => None,
        };

        let submit_timeout = env
            .parse::<u64>(TIMEOUT_ENV)?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SUBMIT_TIMEOUT);

        let webhook = WebhookConfig::from_env(
            env,
            WEBHOOK_PATH_ENV,
            DEFAULT_WEBHOOK_PATH,
            WEBHOOK_PORT_ENV,
            DEFAULT_WEBHOOK_PORT,
        )?;

        Ok(Self {
            token,
            admin_chat_id,
            lead_api_url,
            api_credentials,
            submit_timeout,
            collect_name: env.flag(COLLECT_NAME_ENV, true)?,
            webhook,
        })
    }
}
