//! Devotional content: prompts, answer parsing and reply formatting.
//!
//! Turns a scripture reference into the prayer, verse and explanation
//! posted back to the chat.

mod catalog;
mod parser;
mod prompts;
mod reply;
mod service;

pub use catalog::BookCatalog;
pub use parser::{ERROR_SENTINEL, ParsedPassage, extract_field, format_prayer, parse_passage};
pub use prompts::{PRAYER_MARKER, build_passage_prompt, build_prayer_prompt};
pub use reply::{MAX_MESSAGE_LEN, ReplyFormatter, chunk_message};
pub use service::{generate_passage, generate_prayer};

pub(crate) use service::truncate_for_log;

#[cfg(test)]
pub(crate) use service::tests::FakeGenerator;
