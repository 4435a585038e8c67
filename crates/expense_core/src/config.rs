use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BOT_TOKEN env var is required")]
    MissingBotToken,
}

/// Runtime configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram Bot API token (`BOT_TOKEN`).
    pub bot_token: String,
    /// SQLite database location (`DB_PATH`, default `budget.sqlite3`).
    pub db_path: PathBuf,
    /// Long-poll timeout in seconds (`POLL_TIMEOUT_SECS`, default 25).
    pub poll_timeout_secs: u64,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = std::env::var("BOT_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingBotToken)?;

        let db_path = std::env::var("DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("budget.sqlite3"));

        let poll_timeout_secs = std::env::var("POLL_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(25);

        Ok(BotConfig {
            bot_token,
            db_path,
            poll_timeout_secs,
        })
    }
}
