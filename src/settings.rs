use std::{net::SocketAddr, path::PathBuf};

use thiserror::Error;
use tracing::Level;
use url::Url;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{0} should be set")]
    Missing(&'static str),
    #[error("LOG_LEVEL '{0}' is not a tracing level")]
    LogLevel(String),
    #[error("WEBHOOK_URL can't be parsed: {0}")]
    WebhookUrl(#[from] url::ParseError),
    #[error("WEBHOOK_ADDR can't be parsed: {0}")]
    WebhookAddr(#[from] std::net::AddrParseError),
}

pub struct Webhook {
    pub url: Url,
    pub addr: SocketAddr,
}

/// Process configuration, read from the environment (and `.env`).
pub struct Settings {
    pub token: String,
    pub log_level: Level,
    /// JSON deck to serve; the built-in sample deck when unset.
    pub deck_path: Option<PathBuf>,
    /// Webhook listener; long polling when unset.
    pub webhook: Option<Webhook>,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let token = lookup("TELOXIDE_TOKEN").ok_or(SettingsError::Missing("TELOXIDE_TOKEN"))?;

        let log_level = match lookup("LOG_LEVEL") {
            Some(level) => level.parse::<Level>().map_err(|_| SettingsError::LogLevel(level))?,
            None => Level::ERROR,
        };

        let deck_path = lookup("QUIZ_DECK").map(PathBuf::from);

        let webhook = match (lookup("WEBHOOK_URL"), lookup("WEBHOOK_ADDR")) {
            (Some(url), Some(addr)) => Some(Webhook {
                url: url.parse()?,
                addr: addr.parse()?,
            }),
            _ => None,
        };

        Ok(Self {
            token,
            log_level,
            deck_path,
            webhook,
        })
    }
}
