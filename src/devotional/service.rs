//! Generation calls that always yield content for the reply.
//!
//! Failures of the generation API are logged and turned into fallback
//! content here; nothing past this point sees a `GenerationError`.

use tracing::{debug, error, warn};

use super::parser::{ParsedPassage, format_prayer, parse_passage};
use super::prompts::{PRAYER_MARKER, build_passage_prompt, build_prayer_prompt};
use crate::generation::{Generated, TextGenerator};

/// Asks for an opening prayer.
pub async fn generate_prayer<G>(generator: &G) -> Generated<String>
where
    G: TextGenerator + ?Sized,
{
    match generator.generate(&build_prayer_prompt()).await {
        Ok(text) => {
            debug!("Prayer generated ({} chars)", text.chars().count());
            Generated::Complete(format_prayer(&text))
        }
        Err(e) => {
            error!("Failed to generate prayer: {}", e);
            Generated::Failed {
                value: format!("Error generating prayer. {PRAYER_MARKER}"),
                reason: e.to_string(),
            }
        }
    }
}

/// Asks for the verse at `reference` and its explanation.
pub async fn generate_passage<G>(generator: &G, reference: &str) -> Generated<ParsedPassage>
where
    G: TextGenerator + ?Sized,
{
    match generator.generate(&build_passage_prompt(reference)).await {
        Ok(text) => {
            let passage = parse_passage(&text);
            if passage.is_complete() {
                Generated::Complete(passage)
            } else {
                let missing = passage.missing.clone();
                warn!(
                    "Passage answer for \"{}\" is missing labels: {:?}",
                    truncate_for_log(reference, 40),
                    missing
                );
                debug!("Raw answer: {}", truncate_for_log(&text, 200));
                Generated::Degraded {
                    value: passage,
                    missing,
                }
            }
        }
        Err(e) => {
            error!("Failed to get verse and explanation: {}", e);
            let reason = e.to_string();
            Generated::Failed {
                value: ParsedPassage::sentinel(&reason),
                reason,
            }
        }
    }
}

/// Truncates a string for logging purposes.
pub(crate) fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_owned()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}
