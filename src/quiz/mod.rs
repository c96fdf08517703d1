//! Quiz data model and progress tracking.
//!
//! [`Quiz`] owns an ordered list of [`Question`]s and moves a pointer across
//! them one answer at a time. It knows nothing about rendering; see
//! [`crate::view`] for binding it to a display.

pub mod config;
pub mod error;
pub mod question;

use std::sync::Arc;

pub use config::{Color, Font, Offset, QuizConfig, TextAlignment};
pub use error::QuizError;
pub use question::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStatus {
    InProgress,
    Finished,
}

/// Progress through a fixed set of questions.
///
/// Invariant: `correct_answers_count <= current_question_index <= questions.len()`.
/// The pointer only moves forward, one step per answer, until [`Quiz::reset_quiz`].
#[derive(Debug)]
pub struct Quiz {
    questions: Vec<Question>,
    config: Arc<QuizConfig>,
    current_question_index: usize,
    correct_answers_count: usize,
}

impl Quiz {
    pub fn new(questions: Vec<Question>, config: QuizConfig) -> Self {
        Self::with_shared_config(questions, Arc::new(config))
    }

    pub fn with_shared_config(questions: Vec<Question>, config: Arc<QuizConfig>) -> Self {
        Self {
            questions,
            config,
            current_question_index: 0,
            correct_answers_count: 0,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn config(&self) -> &Arc<QuizConfig> {
        &self.config
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn correct_answers_count(&self) -> usize {
        self.correct_answers_count
    }

    pub fn status(&self) -> QuizStatus {
        if self.current_question_index < self.questions.len() {
            QuizStatus::InProgress
        } else {
            QuizStatus::Finished
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status() == QuizStatus::Finished
    }

    /// The question under the pointer, or `None` once every question is answered.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    /// Scores `selected` against the current question and advances.
    ///
    /// Returns `false` without touching state when the quiz is finished. An
    /// index that names no option is just a wrong answer.
    pub fn check_answer(&mut self, selected: usize) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        let is_correct = question.is_correct(selected);
        if is_correct {
            self.correct_answers_count += 1;
        }
        self.current_question_index += 1;
        is_correct
    }

    /// Strict form of [`Quiz::check_answer`]: finished quizzes and indices outside
    /// the current options are reported instead of scored. Errors leave state as is.
    pub fn try_check_answer(&mut self, selected: usize) -> Result<bool, QuizError> {
        let question = self.current_question().ok_or(QuizError::QuizFinished {
            answered: self.current_question_index,
        })?;
        if selected >= question.options().len() {
            return Err(QuizError::InvalidAnswerIndex {
                index: selected,
                options: question.options().len(),
            });
        }
        Ok(self.check_answer(selected))
    }

    pub fn reset_quiz(&mut self) {
        self.current_question_index = 0;
        self.correct_answers_count = 0;
    }

    /// Runs the strict checks over every question and the config.
    pub fn validate(&self) -> Result<(), QuizError> {
        self.config.validate()?;
        self.questions.iter().try_for_each(Question::validate)
    }
}
