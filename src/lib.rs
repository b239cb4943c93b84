//! Scripture Bot Library
//!
//! A Telegram bot that answers scripture references with a short prayer,
//! the verse and an explanation generated by Gemini.
//!
//! This crate provides the core functionality for:
//! - Loading configuration from the environment
//! - Building prompts and parsing the model's labeled answers
//! - Formatting replies for the chat
//! - Handling user commands via chat messages over `MTProto`

pub mod commands;
pub mod config;
pub mod devotional;
pub mod generation;
pub mod telegram;
