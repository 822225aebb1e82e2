//! Telegram update handlers.
//!
//! Handlers translate updates into wizard [`Action`]s and render the
//! resulting [`Outcome`]. Replies to messages are sent as new messages;
//! replies to button presses edit the message that carried the button.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode};
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

use crate::catalog::{Keyboard, Reply, STALE_BUTTON};
use crate::conversation::ConversationId;
use crate::wizard::{Action, Outcome, Wizard};

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "Начать работу с ботом")]
    Start,

    #[command(description = "Оставить заявку")]
    Order,

    #[command(description = "Отменить текущую заявку")]
    Cancel,

    #[command(description = "Показать список команд")]
    Help,
}

impl Command {
    /// Wizard action for this command; `None` for commands the wizard does
    /// not see.
    pub fn action(&self) -> Option<Action> {
        match self {
            Command::Start => Some(Action::Welcome),
            Command::Order => Some(Action::Start),
            Command::Cancel => Some(Action::Cancel),
            Command::Help => None,
        }
    }
}

/// Converts catalog buttons into Telegram inline buttons.
pub fn keyboard_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.data.clone()))
            .collect::<Vec<_>>()
    }))
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: &Reply) -> ResponseResult<()> {
    let mut request = bot
        .send_message(chat_id, reply.text.clone())
        .parse_mode(ParseMode::Html);
    if let Some(keyboard) = &reply.keyboard {
        request = request.reply_markup(keyboard_markup(keyboard));
    }
    request.await?;
    Ok(())
}

async fn edit_reply(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    reply: &Reply,
) -> ResponseResult<()> {
    let mut request = bot
        .edit_message_text(chat_id, message_id, reply.text.clone())
        .parse_mode(ParseMode::Html);
    if let Some(keyboard) = &reply.keyboard {
        request = request.reply_markup(keyboard_markup(keyboard));
    }
    request.await?;
    Ok(())
}

/// Handle a parsed command.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    wizard: Arc<Wizard>,
) -> ResponseResult<()> {
    info!(chat_id = %msg.chat.id, command = ?cmd, "Command received");

    let Some(action) = cmd.action() else {
        bot.send_message(msg.chat.id, Command::descriptions().to_string())
            .await?;
        return Ok(());
    };

    if let Outcome::Reply(reply) = wizard.handle(ConversationId(msg.chat.id.0), action).await {
        send_reply(&bot, msg.chat.id, &reply).await?;
    }
    Ok(())
}

/// Handle a plain text message.
pub async fn handle_message(bot: Bot, msg: Message, wizard: Arc<Wizard>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    debug!(chat_id = %msg.chat.id, "Text message received");

    let action = Action::Text(text.to_string());
    if let Outcome::Reply(reply) = wizard.handle(ConversationId(msg.chat.id.0), action).await {
        send_reply(&bot, msg.chat.id, &reply).await?;
    }
    Ok(())
}

/// Handle an inline button press.
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    wizard: Arc<Wizard>,
) -> ResponseResult<()> {
    let Some(data) = q.data.as_deref() else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    let origin = q.message.as_ref().map(|m| (m.chat().id, m.id()));
    let chat_id = origin
        .map(|(chat, _)| chat)
        .unwrap_or(ChatId(q.from.id.0 as i64));
    debug!(chat_id = %chat_id, data, "Callback received");

    let outcome = wizard
        .handle(ConversationId(chat_id.0), Action::from_callback(data))
        .await;

    match outcome {
        Outcome::Stale => {
            bot.answer_callback_query(q.id.clone())
                .text(STALE_BUTTON)
                .await?;
        }
        Outcome::Reply(reply) => {
            bot.answer_callback_query(q.id.clone()).await?;
            let edited = match origin {
                Some((chat, message_id)) => match edit_reply(&bot, chat, message_id, &reply).await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(chat_id = %chat, error = %e, "Edit failed, sending new message");
                        false
                    }
                },
                None => false,
            };
            if !edited {
                send_reply(&bot, chat_id, &reply).await?;
            }
        }
    }
    Ok(())
}
