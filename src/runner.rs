use std::sync::Arc;

use teloxide::{
    dispatching::dialogue::GetChatId,
    payloads::{AnswerCallbackQuerySetters, SendMessageSetters},
    prelude::Requester,
    types::{CallbackQuery, ChatId, Message},
    Bot,
};
use tracing::{info, instrument, warn};

use crate::{
    chat::{ChatRenderer, Frame},
    deck::Deck,
    keyboard::Action,
    session::Sessions,
    state::QuizState,
    view::{QuizView, Score},
    HandlerResult, UserDialogue,
};

#[instrument(level = "info", skip(bot, dialogue, msg, sessions, deck), fields(chat = msg.chat.id.0))]
pub(crate) async fn start_quiz(
    bot: Bot,
    dialogue: UserDialogue,
    msg: Message,
    sessions: Arc<Sessions>,
    deck: Arc<Deck>,
) -> HandlerResult {
    let round = sessions.begin(msg.chat.id, deck.quiz()).await;
    let Some((finished, frames)) = sessions
        .update(msg.chat.id, |view| {
            let mut renderer = ChatRenderer::new();
            view.present(&mut renderer);
            (view.quiz().is_finished(), renderer.into_frames())
        })
        .await
    else {
        // Cancelled between the two calls.
        return Ok(());
    };

    info!(
        deck = deck.title(),
        questions = deck.questions().len(),
        round,
        "quiz started"
    );
    dialogue.update(QuizState::after(finished)).await?;
    bot.send_message(msg.chat.id, format!("Let's begin: {}", deck.title()))
        .await?;
    flush(&bot, msg.chat.id, frames).await
}

pub(crate) async fn reset(
    bot: Bot,
    dialogue: UserDialogue,
    msg: Message,
    sessions: Arc<Sessions>,
) -> HandlerResult {
    reset_session(&bot, &dialogue, msg.chat.id, &sessions).await
}

/// Text sent while a question is waiting for a button tap.
pub(crate) async fn expect_button(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, "Please pick one of the options above.")
        .await?;
    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue, q, sessions), fields(data = ?q.data))]
pub(crate) async fn take_action(
    bot: Bot,
    dialogue: UserDialogue,
    q: CallbackQuery,
    sessions: Arc<Sessions>,
) -> HandlerResult {
    let Some(chat_id) = q.chat_id() else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    match q.data.as_deref().and_then(Action::parse) {
        Some(Action::Answer {
            round,
            question,
            option,
        }) => {
            let outcome = sessions
                .update(chat_id, |view| answer_current(view, round, question, option))
                .await
                .flatten();

            let Some(answered) = outcome else {
                info!(round, question, "stale answer ignored");
                bot.answer_callback_query(q.id.clone())
                    .text("This question has already been answered.")
                    .await?;
                return Ok(());
            };

            info!(question, option, is_correct = answered.is_correct, "answer taken");
            if answered.finished {
                info!(
                    correct = answered.score.correct,
                    total = answered.score.total,
                    "quiz completed"
                );
            }
            dialogue.update(QuizState::after(answered.finished)).await?;
            bot.answer_callback_query(q.id.clone()).await?;
            clear_keyboard(&bot, chat_id, &q).await;
            flush(&bot, chat_id, answered.frames).await?;
        }
        Some(Action::Reset) => {
            bot.answer_callback_query(q.id.clone()).await?;
            clear_keyboard(&bot, chat_id, &q).await;
            reset_session(&bot, &dialogue, chat_id, &sessions).await?;
        }
        None => {
            warn!("unrecognized callback data");
            bot.answer_callback_query(q.id.clone()).await?;
        }
    }

    Ok(())
}

/// What a tap on a current answer button did to the quiz.
#[derive(Debug)]
pub(crate) struct Answered {
    pub is_correct: bool,
    pub finished: bool,
    pub score: Score,
    pub frames: Vec<Frame>,
}

/// Scores `option` if the button was drawn for the question the view is on.
///
/// Buttons of answered questions and of earlier rounds stay visible in the
/// chat; their taps return `None` and leave the quiz untouched.
pub(crate) fn answer_current(
    view: &mut QuizView,
    round: u64,
    question: usize,
    option: usize,
) -> Option<Answered> {
    if view.round() != round || view.quiz().current_question_index() != question {
        return None;
    }
    let mut renderer = ChatRenderer::new();
    let is_correct = view.select_option(option, &mut renderer)?;
    Some(Answered {
        is_correct,
        finished: view.quiz().is_finished(),
        score: view.score(),
        frames: renderer.into_frames(),
    })
}

/// Removes the buttons from the tapped message.
///
/// The quiz has already moved on, so a failed edit only leaves dead buttons behind.
async fn clear_keyboard(bot: &Bot, chat_id: ChatId, q: &CallbackQuery) {
    let Some(message) = &q.message else {
        return;
    };
    if let Err(err) = bot.edit_message_reply_markup(chat_id, message.id()).await {
        warn!(%err, "could not clear answered keyboard");
    }
}

/// Button tapped after the chat's session was cancelled or never started.
pub(crate) async fn no_session(bot: Bot, q: CallbackQuery) -> HandlerResult {
    bot.answer_callback_query(q.id.clone())
        .text("No quiz is running. Send /start to begin.")
        .await?;
    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue, sessions), fields(chat = chat_id.0))]
async fn reset_session(
    bot: &Bot,
    dialogue: &UserDialogue,
    chat_id: ChatId,
    sessions: &Sessions,
) -> HandlerResult {
    let rendered = sessions
        .update(chat_id, |view| {
            let mut renderer = ChatRenderer::new();
            view.reset(&mut renderer);
            (view.quiz().is_finished(), renderer.into_frames())
        })
        .await;

    match rendered {
        Some((finished, frames)) => {
            info!("quiz reset");
            dialogue.update(QuizState::after(finished)).await?;
            flush(bot, chat_id, frames).await?;
        }
        None => {
            bot.send_message(chat_id, "No quiz is running. Send /start to begin.")
                .await?;
            dialogue.update(QuizState::Start).await?;
        }
    }
    Ok(())
}

async fn flush(bot: &Bot, chat_id: ChatId, frames: Vec<Frame>) -> HandlerResult {
    for frame in frames {
        match frame {
            Frame::Message {
                text,
                keyboard: Some(keyboard),
            } => {
                bot.send_message(chat_id, text).reply_markup(keyboard).await?;
            }
            Frame::Message {
                text,
                keyboard: None,
            } => {
                bot.send_message(chat_id, text).await?;
            }
            Frame::Pause(duration) => tokio::time::sleep(duration).await,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Question, Quiz, QuizConfig};

    fn view() -> QuizView {
        let questions = vec![
            Question::new("First?", vec!["yes".into(), "no".into()], 0),
            Question::new("Second?", vec!["yes".into(), "no".into()], 1),
        ];
        QuizView::new(Quiz::new(questions, QuizConfig::default()))
    }

    fn counters(view: &QuizView) -> (usize, usize) {
        (view.quiz().current_question_index(), view.quiz().correct_answers_count())
    }

    #[test]
    fn current_button_is_scored() {
        let mut view = view();

        let answered = answer_current(&mut view, 0, 0, 0).unwrap();
        assert!(answered.is_correct);
        assert!(!answered.finished);
        assert_eq!(answered.score, Score { correct: 1, total: 2 });
        assert_eq!(answered.frames.len(), 3);
        assert_eq!(counters(&view), (1, 1));

        let answered = answer_current(&mut view, 0, 1, 0).unwrap();
        assert!(!answered.is_correct);
        assert!(answered.finished);
        assert_eq!(counters(&view), (2, 1));
    }

    #[test]
    fn answered_question_button_is_ignored() {
        let mut view = view();
        answer_current(&mut view, 0, 0, 1).unwrap();

        assert!(answer_current(&mut view, 0, 0, 0).is_none());
        assert_eq!(counters(&view), (1, 0));
    }

    #[test]
    fn earlier_round_button_is_ignored_after_reset() {
        let mut view = view();
        answer_current(&mut view, 0, 0, 0).unwrap();
        let mut renderer = ChatRenderer::new();
        view.reset(&mut renderer);

        // Same question index, drawn before the reset.
        assert!(answer_current(&mut view, 0, 0, 0).is_none());
        assert_eq!(counters(&view), (0, 0));

        assert!(answer_current(&mut view, 1, 0, 0).is_some());
        assert_eq!(counters(&view), (1, 1));
    }

    #[test]
    fn finished_quiz_ignores_buttons() {
        let mut view = view();
        answer_current(&mut view, 0, 0, 0).unwrap();
        answer_current(&mut view, 0, 1, 1).unwrap();

        assert!(answer_current(&mut view, 0, 2, 0).is_none());
        assert!(answer_current(&mut view, 0, 1, 1).is_none());
        assert_eq!(counters(&view), (2, 2));
    }
}
