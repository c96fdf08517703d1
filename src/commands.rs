use std::sync::Arc;

use teloxide::{prelude::Requester, types::Message, utils::command::BotCommands, Bot};
use tracing::{info, instrument};

use crate::{session::Sessions, state::QuizState, HandlerResult, UserDialogue};

#[derive(Debug, Clone, BotCommands)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "display help.")]
    Help,
    #[command(description = "start a new quiz.")]
    Start,
    #[command(description = "start the current quiz over.")]
    Reset,
    #[command(description = "stop the current quiz.")]
    Cancel,
}

pub(crate) async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue, sessions, msg), fields(chat = msg.chat.id.0))]
pub(crate) async fn cancel(
    bot: Bot,
    dialogue: UserDialogue,
    msg: Message,
    sessions: Arc<Sessions>,
) -> HandlerResult {
    if sessions.end(msg.chat.id).await {
        info!("quiz cancelled");
        bot.send_message(msg.chat.id, "Quiz stopped. Send /start to begin again.")
            .await?;
    } else {
        bot.send_message(msg.chat.id, "No quiz is running.").await?;
    }
    dialogue.update(QuizState::Start).await?;
    Ok(())
}
