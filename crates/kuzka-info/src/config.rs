//! Currency bot configuration read from the environment.

use kuzka_core::{Env, WebhookConfig};
use url::Url;

use crate::error::{InfoError, Result};

pub const TOKEN_ENV: &str = "KUZKAINFO_BOT_TOKEN";
pub const GROUP_ENV: &str = "ADMIN_GROUP_ID";
pub const CBR_URL_ENV: &str = "CBR_DAILY_URL";
pub const TODAY_CRON_ENV: &str = "RATES_TODAY_CRON";
pub const TOMORROW_CRON_ENV: &str = "RATES_TOMORROW_CRON";
pub const WEBHOOK_PATH_ENV: &str = "KUZKAINFO_WEBHOOK_PATH";
pub const WEBHOOK_PORT_ENV: &str = "KUZKAINFO_WEBHOOK_PORT";

pub const DEFAULT_CBR_URL: &str = "https://www.cbr-xml-daily.ru/daily_json.js";
/// Every day at 09:00 local time.
pub const DEFAULT_TODAY_CRON: &str = "0 0 9 * * *";
/// Every day at 18:00 local time.
pub const DEFAULT_TOMORROW_CRON: &str = "0 0 18 * * *";
pub const DEFAULT_WEBHOOK_PORT: u16 = 8002;
const DEFAULT_WEBHOOK_PATH: &str = "/webhook/kuzkainfo";

/// Everything the currency bot needs to run.
#[derive(Debug, Clone)]
pub struct InfoConfig {
    pub token: String,
    /// Group the rates are posted to. Unset means fetch and log only.
    pub group_id: Option<i64>,
    pub cbr_url: Url,
    pub today_cron: String,
    pub tomorrow_cron: String,
    pub webhook: Option<WebhookConfig>,
}

impl InfoConfig {
    pub fn from_env(env: &Env) -> Result<Self> {
        let cbr_raw = env.or(CBR_URL_ENV, DEFAULT_CBR_URL);
        let cbr_url = Url::parse(&cbr_raw).map_err(|e| {
            InfoError::Config(kuzka_core::ConfigError::Invalid {
                key: CBR_URL_ENV.to_string(),
                value: cbr_raw.clone(),
                reason: e.to_string(),
            })
        })?;

        Ok(Self {
            token: env.require(TOKEN_ENV)?,
            group_id: env.parse(GROUP_ENV)?,
            cbr_url,
            today_cron: env.or(TODAY_CRON_ENV, DEFAULT_TODAY_CRON),
            tomorrow_cron: env.or(TOMORROW_CRON_ENV, DEFAULT_TOMORROW_CRON),
            webhook: WebhookConfig::from_env(
                env,
                WEBHOOK_PATH_ENV,
                DEFAULT_WEBHOOK_PATH,
                WEBHOOK_PORT_ENV,
                DEFAULT_WEBHOOK_PORT,
            )?,
        })
    }
}
