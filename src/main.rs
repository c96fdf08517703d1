use std::error::Error;
use std::sync::Arc;

use dotenvy::dotenv;
use quizkit::deck::Deck;
use quizkit::schema::schema;
use quizkit::session::Sessions;
use quizkit::settings::Settings;
use quizkit::state::QuizState;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::error_handlers::IgnoringErrorHandlerSafe;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks::{self, Options};
use tracing::{info, level_filters::LevelFilter, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    let settings = Settings::from_env()?;
    init_tracing(settings.log_level)?;

    let deck = match &settings.deck_path {
        Some(path) => Deck::from_path(path)?,
        None => Deck::sample(),
    };

    let bot = Bot::new(settings.token);
    info!(deck = deck.title(), "Starting bot...");

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![
            InMemStorage::<QuizState>::new(),
            Arc::new(Sessions::new()),
            Arc::new(deck)
        ])
        .enable_ctrlc_handler()
        .build();

    match settings.webhook {
        Some(webhook) => {
            info!(url = %webhook.url, addr = %webhook.addr, "listening for webhook updates");
            let listener = webhooks::axum(bot, Options::new(webhook.addr, webhook.url)).await?;
            dispatcher
                .dispatch_with_listener(listener, Arc::new(IgnoringErrorHandlerSafe))
                .await
        }
        None => dispatcher.dispatch().await,
    }

    Ok(())
}

/// JSON logs at `level`, overridable per target through `RUST_LOG`.
/// teloxide logs through `log`, which is forwarded into the same subscriber.
fn init_tracing(level: Level) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_span_events(FmtSpan::ENTER)
        .log_internal_errors(true)
        .with_line_number(true)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;
    Ok(())
}
