//! Admin notification about new leads.

use async_trait::async_trait;
use kuzka_models::{LeadField, LeadSubmission};
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::info;

use crate::catalog::escape_html;
use crate::error::Result;

/// Tells the administrator about a stored lead.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, submission: &LeadSubmission) -> Result<()>;
}

/// Sends the summary to the admin's Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    admin_chat: ChatId,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, admin_chat: ChatId) -> Self {
        Self { bot, admin_chat }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, submission: &LeadSubmission) -> Result<()> {
        self.bot
            .send_message(self.admin_chat, format_admin_message(submission))
            .parse_mode(ParseMode::Html)
            .await?;
        info!(admin_chat = %self.admin_chat, "Admin notified about new lead");
        Ok(())
    }
}

/// Formats the admin message. The name line is present whenever a name was
/// collected.
pub fn format_admin_message(submission: &LeadSubmission) -> String {
    let mut lines = vec!["💼 <b>Новая заявка!</b>".to_string()];
    let fields = [
        (LeadField::Inn, Some(&submission.inn)),
        (LeadField::Email, Some(&submission.email)),
        (LeadField::Name, submission.name.as_ref()),
        (LeadField::Phone, Some(&submission.phone)),
        (LeadField::ContactTime, Some(&submission.contact_time)),
        (LeadField::Service, Some(&submission.service)),
        (LeadField::Urgency, Some(&submission.urgency)),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            lines.push(format!("{}: <code>{}</code>", field.label(), escape_html(value)));
        }
    }
    lines.join("\n")
}
