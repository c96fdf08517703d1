//! Telegram rendering of a [`QuizView`](crate::view::QuizView).
//!
//! Rendering happens while the session lock is held, so [`ChatRenderer`] only
//! buffers [`Frame`]s; the runner sends them once the lock is released.

use std::time::Duration;

use teloxide::types::InlineKeyboardMarkup;

use crate::keyboard::{options_keyboard, reset_keyboard};
use crate::view::{Feedback, QuestionFrame, QuizRenderer, Score};

const PROGRESS_WIDTH: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Message {
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    Pause(Duration),
}

#[derive(Debug, Default)]
pub struct ChatRenderer {
    frames: Vec<Frame>,
}

impl ChatRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    fn push_message(&mut self, text: String, keyboard: Option<InlineKeyboardMarkup>) {
        self.frames.push(Frame::Message { text, keyboard });
    }
}

impl QuizRenderer for ChatRenderer {
    fn show_question(&mut self, frame: &QuestionFrame<'_>) {
        let text = format!(
            "{} {}/{}\n\n{}",
            progress_bar(frame.progress, PROGRESS_WIDTH),
            frame.number,
            frame.total,
            frame.question.label()
        );
        let keyboard = options_keyboard(frame.question, frame.round, frame.number - 1);
        self.push_message(text, Some(keyboard));
    }

    fn show_feedback(&mut self, feedback: &Feedback<'_>) {
        let chosen = feedback.question.option(feedback.selected).unwrap_or("?");
        let text = if feedback.is_correct {
            format!("✅ {chosen}: correct!")
        } else {
            format!("❌ {chosen}: incorrect.")
        };
        self.push_message(text, None);
    }

    fn transition(&mut self, duration: Duration) {
        if !duration.is_zero() {
            self.frames.push(Frame::Pause(duration));
        }
    }

    fn show_result(&mut self, score: &Score) {
        let text = format!("{}\n\n{}", progress_bar(1.0, PROGRESS_WIDTH), score);
        self.push_message(text, Some(reset_keyboard()));
    }
}

pub fn progress_bar(progress: f32, width: usize) -> String {
    let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    let filled = (progress * width as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
