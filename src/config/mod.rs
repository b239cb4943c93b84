//! Configuration module for the scripture bot.
//!
//! Handles loading of Telegram credentials, Gemini API settings and
//! bot behaviour settings from the process environment.

mod settings;

pub use settings::{
    BotSettings, ConfigError, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_TIMEZONE,
    GeminiConfig, TelegramConfig,
};
