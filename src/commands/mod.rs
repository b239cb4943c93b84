//! Command handling module.
//!
//! Processes user commands sent to the bot via Telegram messages.
//! Commands use a configurable prefix (`/` by default).

mod handler;
mod types;

pub use handler::{CommandHandler, Responder, UNEXPECTED_ERROR_NOTICE};
pub use types::{BotCommand, CommandError, CommandResult};
