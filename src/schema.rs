use teloxide::{
    dispatching::{
        dialogue::{self, InMemStorage},
        UpdateFilterExt, UpdateHandler,
    },
    dptree,
    prelude::Requester,
    types::{Message, Update},
    Bot,
};
use tracing::{info, instrument};

use crate::{
    commands::{cancel, help, Command},
    runner,
    state::QuizState,
    HandlerResult,
};

pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Help].endpoint(help))
        .branch(case![Command::Start].endpoint(runner::start_quiz))
        .branch(case![Command::Reset].endpoint(runner::reset))
        .branch(case![Command::Cancel].endpoint(cancel));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(case![QuizState::Answering].endpoint(runner::expect_button))
        .endpoint(invalid_state);

    let callback_query_handler = Update::filter_callback_query()
        .branch(case![QuizState::Answering].endpoint(runner::take_action))
        .branch(case![QuizState::Finished].endpoint(runner::take_action))
        .endpoint(runner::no_session);

    dialogue::enter::<Update, InMemStorage<QuizState>, QuizState, _>()
        .branch(message_handler)
        .branch(callback_query_handler)
}

#[instrument(level = "info", skip(bot, msg), fields(chat = msg.chat.id.0))]
async fn invalid_state(bot: Bot, msg: Message) -> HandlerResult {
    info!(text = ?msg.text(), "unhandled message");
    bot.send_message(
        msg.chat.id,
        "Unable to handle the message. Enter /help to see usages.",
    )
    .await?;
    Ok(())
}
