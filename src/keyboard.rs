use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::quiz::Question;

const ANSWER_PREFIX: &str = "answer";
const RESET: &str = "reset";

/// What a tapped inline button asks for, as encoded in its callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `round` and `question` locate the screen the button was drawn on:
    /// the quiz pass and the 0-based index of the question.
    Answer {
        round: u64,
        question: usize,
        option: usize,
    },
    Reset,
}

impl Action {
    pub fn parse(data: &str) -> Option<Self> {
        if data == RESET {
            return Some(Action::Reset);
        }
        let mut parts = data.split(':');
        if parts.next()? != ANSWER_PREFIX {
            return None;
        }
        let round = parts.next()?.parse().ok()?;
        let question = parts.next()?.parse().ok()?;
        let option = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Action::Answer {
            round,
            question,
            option,
        })
    }

    pub fn data(&self) -> String {
        match self {
            Action::Answer {
                round,
                question,
                option,
            } => format!("{ANSWER_PREFIX}:{round}:{question}:{option}"),
            Action::Reset => RESET.to_owned(),
        }
    }
}

pub fn options_keyboard(question: &Question, round: u64, question_index: usize) -> InlineKeyboardMarkup {
    let keyboard: Vec<Vec<InlineKeyboardButton>> = question
        .options()
        .iter()
        .enumerate()
        .map(|(option, text)| {
            let action = Action::Answer {
                round,
                question: question_index,
                option,
            };
            vec![InlineKeyboardButton::callback(text, action.data())]
        })
        .collect();

    InlineKeyboardMarkup::new(keyboard)
}

pub fn reset_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "Reset Quiz",
        Action::Reset.data(),
    )]])
}
