//! Telegram client wrapper module.
//!
//! Provides the bot connection, bot-token sign in, command menu
//! registration and the update loop feeding the command handler.

mod client;
mod responder;

pub use client::{TelegramBot, TelegramError, Update};
pub use responder::{ChannelResponder, OutgoingReply};
