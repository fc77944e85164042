//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Main configuration for the bot.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token from @BotFather.
    pub telegram_bot_token: SecretString,
    /// Telegram usernames or numeric user ids allowed to talk to the bot.
    /// A single "*" entry allows everyone.
    pub allowed_users: Vec<String>,
    /// Directory where per-user result files are written.
    pub data_dir: PathBuf,
    /// Directory where the log file is written.
    pub log_dir: PathBuf,
    /// Optional Gemini API key. When unset, reports are sent without the
    /// generated reflection.
    pub gemini_api_key: Option<SecretString>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let telegram_bot_token = SecretString::from(required_env("TELEGRAM_BOT_TOKEN")?);

        let allowed_users = parse_allowed_users(
            &optional_env("TELEGRAM_ALLOWED_USERS")?.unwrap_or_else(|| "*".to_string()),
        );

        let data_dir = optional_env("BOT_DATA_DIR")?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));

        let log_dir = optional_env("BOT_LOG_DIR")?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./logs"));

        let gemini_api_key = optional_env("GEMINI_API_KEY")?.map(SecretString::from);

        Ok(Self {
            telegram_bot_token,
            allowed_users,
            data_dir,
            log_dir,
            gemini_api_key,
        })
    }
}

// Helper functions

fn required_env(key: &str) -> Result<String, ConfigError> {
    optional_env(key)?.ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

pub(crate) fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(val) if val.is_empty() => Ok(None),
        Ok(val) => Ok(Some(val)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{e}"),
        }),
    }
}

fn parse_allowed_users(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
