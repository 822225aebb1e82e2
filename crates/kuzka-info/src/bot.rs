//! The currency bot: greetings plus the scheduled rate announcements.

use std::net::SocketAddr;
use std::sync::Arc;

use teloxide::dispatching::{DefaultKey, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use teloxide::utils::command::BotCommands;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::InfoConfig;
use crate::error::{InfoError, Result};
use crate::handlers::{handle_command, handle_new_members, Command};
use crate::rates::{CbrClient, RatesSource};
use crate::scheduler::{Announcer, Edition, RatesJob, TelegramAnnouncer};
use kuzka_core::WebhookConfig;

/// The Telegram currency bot.
pub struct InfoBot {
    bot: Bot,
    jobs: Vec<RatesJob>,
    source: Arc<dyn RatesSource>,
    announcer: Arc<dyn Announcer>,
}

impl InfoBot {
    /// Builds the bot; fails early on a bad cron expression.
    pub fn new(config: &InfoConfig) -> Result<Self> {
        let bot = Bot::new(config.token.clone());
        let jobs = vec![
            RatesJob::new(Edition::Today, &config.today_cron)?,
            RatesJob::new(Edition::Tomorrow, &config.tomorrow_cron)?,
        ];
        let source = CbrClient::new(config.cbr_url.clone())?;
        let announcer = TelegramAnnouncer::new(bot.clone(), config.group_id.map(ChatId));

        Ok(Self {
            bot,
            jobs,
            source: Arc::new(source),
            announcer: Arc::new(announcer),
        })
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| InfoError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Update routing: commands, then member joins.
    pub fn schema() -> UpdateHandler<teloxide::RequestError> {
        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(handle_command),
            )
            .branch(
                Update::filter_message()
                    .filter_map(|msg: Message| msg.new_chat_members().map(|m| m.to_vec()))
                    .endpoint(handle_new_members),
            )
    }

    /// Starts every announcement job in the background.
    pub fn spawn_jobs(&self) -> Vec<JoinHandle<()>> {
        self.jobs
            .iter()
            .cloned()
            .map(|job| job.spawn(Arc::clone(&self.source), Arc::clone(&self.announcer)))
            .collect()
    }

    fn dispatcher(&self) -> Dispatcher<Bot, teloxide::RequestError, DefaultKey> {
        Dispatcher::builder(self.bot.clone(), Self::schema())
            .default_handler(|_upd| async move {})
            .enable_ctrlc_handler()
            .build()
    }

    async fn register_commands(&self) {
        if let Err(e) = self.bot.set_my_commands(Command::bot_commands()).await {
            warn!(error = %e, "Failed to register bot commands");
        }
    }

    /// Start the bot in polling mode.
    pub async fn start_polling(&self) -> Result<()> {
        info!("Starting currency bot in polling mode...");
        self.register_commands().await;
        let jobs = self.spawn_jobs();

        self.dispatcher().dispatch().await;
        jobs.iter().for_each(JoinHandle::abort);
        Ok(())
    }

    /// Start the bot behind a webhook served on `webhook.port`.
    pub async fn start_webhook(&self, webhook: &WebhookConfig) -> Result<()> {
        let url = webhook.url()?;
        let addr = SocketAddr::from(([0, 0, 0, 0], webhook.port));
        info!(url = %url, port = webhook.port, "Starting currency bot with webhook...");
        self.register_commands().await;

        let listener = webhooks::axum(self.bot.clone(), webhooks::Options::new(addr, url))
            .await
            .map_err(|e| InfoError::WebhookFailed(e.to_string()))?;
        let jobs = self.spawn_jobs();

        self.dispatcher()
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("An error from the update listener"),
            )
            .await;
        jobs.iter().for_each(JoinHandle::abort);
        Ok(())
    }
}
