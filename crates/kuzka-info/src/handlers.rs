//! Command and group-event handlers.

use teloxide::prelude::*;
use teloxide::types::{ReplyParameters, User};
use teloxide::utils::command::BotCommands;
use tracing::info;

/// Reply to `/start`.
pub const GREETING: &str =
    "Привет! Это KUZKAINFO_BOT. Я публикую курсы доллара и евро ЦБ РФ каждый день в 9:00 и 18:00.";

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "Информация о боте")]
    Start,

    #[command(description = "Показать список команд")]
    Help,
}

/// Welcome line for a new group member.
pub fn welcome_member(first_name: &str) -> String {
    format!("👋 Добро пожаловать, {}! Мы рады вас видеть!", first_name)
}

/// Welcome lines for everyone who joined, in join order.
pub fn greetings(members: &[User]) -> Vec<String> {
    members.iter().map(|u| welcome_member(&u.first_name)).collect()
}

/// Handle a parsed command.
pub async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> ResponseResult<()> {
    info!(chat_id = %msg.chat.id, command = ?cmd, "Command received");
    let text = match cmd {
        Command::Start => GREETING.to_string(),
        Command::Help => Command::descriptions().to_string(),
    };
    bot.send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}

/// Greets every user who joined the group.
pub async fn handle_new_members(bot: Bot, msg: Message, members: Vec<User>) -> ResponseResult<()> {
    for (user, text) in members.iter().zip(greetings(&members)) {
        info!(chat_id = %msg.chat.id, user_id = %user.id, "New member joined");
        bot.send_message(msg.chat.id, text)
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
    }
    Ok(())
}
