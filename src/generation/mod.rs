//! Generation API module.
//!
//! Wraps the Gemini text generation endpoint behind the [`TextGenerator`]
//! trait and describes generation outcomes with [`Generated`].

mod client;
mod outcome;

pub use client::{GeminiClient, GenerationError, TextGenerator};
pub use outcome::{Generated, PassageField};
