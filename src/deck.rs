use std::{fs, path::Path, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::quiz::{Question, Quiz, QuizConfig, QuizError};

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read deck: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse deck: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid deck: {0}")]
    Invalid(#[from] QuizError),
}

/// A titled set of questions plus the config every quiz built from it shares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    title: String,
    #[serde(default)]
    config: Arc<QuizConfig>,
    questions: Vec<Question>,
}

impl Deck {
    pub fn new(title: impl Into<String>, questions: Vec<Question>, config: QuizConfig) -> Self {
        Self {
            title: title.into(),
            config: Arc::new(config),
            questions,
        }
    }

    /// Parses a deck and rejects questions whose correct index names no option.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        let deck: Deck = serde_json::from_str(json)?;
        deck.config.validate()?;
        deck.questions.iter().try_for_each(Question::validate)?;
        Ok(deck)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        let path = path.as_ref();
        let deck = Self::from_json(&fs::read_to_string(path)?)?;
        info!(
            path = %path.display(),
            title = deck.title(),
            questions = deck.questions().len(),
            "loaded quiz deck"
        );
        Ok(deck)
    }

    pub fn sample() -> Self {
        let question = |label: &str, options: &[&str], correct: usize| {
            Question::new(
                label,
                options.iter().map(|option| option.to_string()).collect(),
                correct,
            )
        };

        Self::new(
            "Rust basics",
            vec![
                question(
                    "Which keyword declares a mutable binding?",
                    &["let", "let mut", "mut let", "var"],
                    1,
                ),
                question(
                    "What does the `?` operator do on an `Err` value?",
                    &["Panics", "Ignores it", "Returns it early", "Retries the call"],
                    2,
                ),
                question(
                    "Which type owns a growable UTF-8 string?",
                    &["&str", "String", "char", "Box<str>"],
                    1,
                ),
                question(
                    "Which trait lets a value be duplicated implicitly?",
                    &["Clone", "Copy", "Default", "Send"],
                    1,
                ),
            ],
            QuizConfig::default(),
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn config(&self) -> &Arc<QuizConfig> {
        &self.config
    }

    /// A fresh quiz positioned at the first question.
    pub fn quiz(&self) -> Quiz {
        Quiz::with_shared_config(self.questions.clone(), Arc::clone(&self.config))
    }
}
