use state::QuizState;
use teloxide::{dispatching::dialogue::InMemStorage, prelude::Dialogue};

pub mod chat;
pub mod commands;
pub mod deck;
pub mod keyboard;
pub mod layout;
pub mod quiz;
pub mod runner;
pub mod schema;
pub mod session;
pub mod settings;
pub mod state;
pub mod view;

type UserDialogue = Dialogue<QuizState, InMemStorage<QuizState>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;
