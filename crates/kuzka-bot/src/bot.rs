//! The order bot: wiring of wizard, gateway and notifier into a dispatcher.

use std::net::SocketAddr;
use std::sync::Arc;

use teloxide::dispatching::{DefaultKey, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use crate::config::{BotConfig, WebhookConfig};
use crate::error::{BotError, Result};
use crate::flow::Flow;
use crate::gateway::HttpGateway;
use crate::handlers::{handle_callback, handle_command, handle_message, Command};
use crate::notifier::TelegramNotifier;
use crate::wizard::Wizard;

/// The Telegram order bot.
pub struct LeadBot {
    bot: Bot,
    wizard: Arc<Wizard>,
}

impl LeadBot {
    /// Builds the bot with the HTTP gateway and the Telegram notifier.
    pub fn new(config: &BotConfig) -> Result<Self> {
        let bot = Bot::new(config.token.clone());

        let gateway = HttpGateway::new(
            config.lead_api_url.clone(),
            config.submit_timeout,
            config.api_credentials.clone(),
        )?;
        let notifier = TelegramNotifier::new(bot.clone(), ChatId(config.admin_chat_id));
        let wizard = Wizard::new(
            Flow::new(config.collect_name),
            Arc::new(gateway),
            Arc::new(notifier),
        );

        Ok(Self {
            bot,
            wizard: Arc::new(wizard),
        })
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| BotError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Update routing: buttons, then commands, then plain text.
    pub fn schema() -> UpdateHandler<teloxide::RequestError> {
        dptree::entry()
            .branch(Update::filter_callback_query().endpoint(handle_callback))
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(handle_command),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| msg.text().is_some())
                    .endpoint(handle_message),
            )
    }

    fn dispatcher(&self) -> Dispatcher<Bot, teloxide::RequestError, DefaultKey> {
        Dispatcher::builder(self.bot.clone(), Self::schema())
            .dependencies(dptree::deps![Arc::clone(&self.wizard)])
            .default_handler(|upd| async move {
                warn!("Unhandled update: {:?}", upd.id);
            })
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
        info!("Starting order bot in polling mode...");
        self.register_commands().await;

        self.dispatcher().dispatch().await;
        Ok(())
    }

    /// Start the bot behind a webhook served on `webhook.port`.
    pub async fn start_webhook(&self, webhook: &WebhookConfig) -> Result<()> {
        let url = webhook.url()?;
        let addr = SocketAddr::from(([0, 0, 0, 0], webhook.port));
        info!(url = %url, port = webhook.port, "Starting order bot with webhook...");
        self.register_commands().await;

        let listener = webhooks::axum(self.bot.clone(), webhooks::Options::new(addr, url))
            .await
            .map_err(|e| BotError::WebhookFailed(e.to_string()))?;

        self.dispatcher()
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("An error from the update listener"),
            )
            .await;
        Ok(())
    }
}
