//! Application settings, Telegram and Gemini configuration.

use std::path::PathBuf;

use chrono_tz::Tz;
use tracing::warn;

/// Telegram API configuration.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Telegram API ID (obtain from <https://my.telegram.org>).
    pub api_id: i32,

    /// Telegram API hash (obtain from <https://my.telegram.org>).
    pub api_hash: String,

    /// Bot token issued by `@BotFather`.
    pub bot_token: String,

    /// Path to the session file.
    pub session_path: PathBuf,
}

fn default_session_path() -> PathBuf {
    PathBuf::from("scripture_bot.session")
}

impl TelegramConfig {
    /// Creates a new Telegram configuration.
    #[must_use]
    pub fn new(api_id: i32, api_hash: String, bot_token: String) -> Self {
        Self {
            api_id,
            api_hash,
            bot_token,
            session_path: default_session_path(),
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// Expects `TG_API_ID`, `TG_API_HASH` and `TG_BOT_TOKEN` to be set.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or `TG_API_ID`
    /// is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`TelegramConfig::from_env`].
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_id: i32 = required(&var, "TG_API_ID")?
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidApiId)?;

        let api_hash = required(&var, "TG_API_HASH")?;
        let bot_token = required(&var, "TG_BOT_TOKEN")?;

        let session_path = var("TG_SESSION_PATH").map_or_else(default_session_path, PathBuf::from);

        Ok(Self {
            api_id,
            api_hash,
            bot_token,
            session_path,
        })
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_id", &self.api_id)
            .field("session_path", &self.session_path)
            .finish_non_exhaustive()
    }
}

/// Gemini generation API configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key for the generative language API.
    pub api_key: String,

    /// Model used for both prayer and passage requests.
    pub model: String,

    /// Base URL of the API, without the version path.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

fn default_timeout_secs() -> u64 {
    120
}

impl GeminiConfig {
    /// Creates a configuration with default model, URL and timeout.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_owned(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_owned(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// Expects `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) to be set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if neither key is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`GeminiConfig::from_env`].
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = non_empty(var("GEMINI_API_KEY"))
            .or_else(|| non_empty(var("GOOGLE_API_KEY")))
            .ok_or(ConfigError::MissingEnvVar("GEMINI_API_KEY"))?;

        let mut config = Self::new(api_key);

        if let Some(model) = non_empty(var("GEMINI_MODEL")) {
            config.model = model;
        }
        if let Some(base_url) = non_empty(var("GEMINI_BASE_URL")) {
            config.base_url = base_url.trim_end_matches('/').to_owned();
        }
        config.timeout_secs = var("GEMINI_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(default_timeout_secs);

        Ok(config)
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

/// Bot-specific settings.
#[derive(Debug, Clone)]
pub struct BotSettings {
    /// Command prefix for bot commands.
    pub command_prefix: String,

    /// Timezone used for the reply timestamp.
    pub timezone: Tz,
}

fn default_command_prefix() -> String {
    "/".to_owned()
}

/// Default timezone for reply timestamps.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Sao_Paulo;

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

impl BotSettings {
    /// Creates bot settings from environment variables with defaults.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self::from_vars_with_defaults(|key| std::env::var(key).ok())
    }

    /// Creates bot settings from an arbitrary variable lookup with defaults.
    #[must_use]
    pub fn from_vars_with_defaults(var: impl Fn(&str) -> Option<String>) -> Self {
        let timezone = match non_empty(var("BOT_TIMEZONE")) {
            Some(name) => name.trim().parse::<Tz>().unwrap_or_else(|_| {
                warn!("Unknown timezone '{}', using {}", name, DEFAULT_TIMEZONE.name());
                DEFAULT_TIMEZONE
            }),
            None => DEFAULT_TIMEZONE,
        };

        Self {
            command_prefix: non_empty(var("COMMAND_PREFIX"))
                .unwrap_or_else(default_command_prefix),
            timezone,
        }
    }
}

fn required(var: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<String, ConfigError> {
    non_empty(var(key)).ok_or(ConfigError::MissingEnvVar(key))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid API ID format (must be a positive integer)")]
    InvalidApiId,
}
