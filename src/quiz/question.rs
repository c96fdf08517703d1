use serde::{Deserialize, Serialize};

use super::error::QuizError;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    label: String,
    options: Vec<String>,
    correct_option_index: usize,
}

impl Question {
    /// Builds a question without checking `correct_option_index` against the options.
    pub fn new(
        label: impl Into<String>,
        options: Vec<String>,
        correct_option_index: usize,
    ) -> Self {
        Self {
            label: label.into(),
            options,
            correct_option_index,
        }
    }

    /// Like [`Question::new`], but rejects a correct index that names no option.
    pub fn try_new(
        label: impl Into<String>,
        options: Vec<String>,
        correct_option_index: usize,
    ) -> Result<Self, QuizError> {
        let question = Self::new(label, options, correct_option_index);
        question.validate()?;
        Ok(question)
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        if self.correct_option_index >= self.options.len() {
            return Err(QuizError::InvalidCorrectIndex {
                label: self.label.clone(),
                index: self.correct_option_index,
                options: self.options.len(),
            });
        }
        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }

    pub fn is_correct(&self, index: usize) -> bool {
        self.correct_option_index == index
    }
}
