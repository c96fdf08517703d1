use thiserror::Error;

/// Errors reported by the strict quiz APIs.
///
/// The permissive operations (`Quiz::check_answer`, `Question::new`) never
/// produce these; they treat the same inputs as "incorrect" or trust the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuizError {
    #[error("quiz is already finished after {answered} answers")]
    QuizFinished { answered: usize },

    #[error("answer index {index} is out of range for {options} options")]
    InvalidAnswerIndex { index: usize, options: usize },

    #[error("question '{label}' marks option {index} as correct but has {options} options")]
    InvalidCorrectIndex {
        label: String,
        index: usize,
        options: usize,
    },

    #[error("invalid config value for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}
