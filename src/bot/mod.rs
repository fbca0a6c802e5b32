//! Telegram bot surface: handlers, keyboards and reply formatting.

pub mod admin;
pub mod format;
pub mod handlers;
pub mod insight;
pub mod keyboard;

use crate::config::Config;
use crate::openai;
use crate::stats::Store;
use tracing::info;

/// Shared state handed to every handler by the dispatcher.
pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub openai: Option<openai::Client>,
}

impl AppState {
    pub fn new(config: Config, store: Store) -> Self {
        let openai = config
            .openai_api_key
            .clone()
            .map(|key| openai::Client::new(key, config.openai_model.clone()));
        if openai.is_none() {
            info!("No OpenAI key configured, reports will carry raw numbers only");
        }
        Self { config, store, openai }
    }
}
