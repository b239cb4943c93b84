//! Reply formatting for the chat channel.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::parser::ParsedPassage;

/// Maximum message length accepted by Telegram, in UTF-16 code units.
pub const MAX_MESSAGE_LEN: usize = 4096;

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Builds the messages sent back for a passage request.
#[derive(Debug, Clone, Copy)]
pub struct ReplyFormatter {
    timezone: Tz,
}

impl ReplyFormatter {
    /// Creates a formatter that stamps replies in `timezone`.
    #[must_use]
    pub const fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Message sent as soon as a request is received.
    #[must_use]
    pub fn acknowledgment(reference: &str) -> String {
        format!("Fetching the passage \"{reference}\" for you... Please wait a few seconds.")
    }

    /// Final reply, stamped with the current time.
    #[must_use]
    pub fn format_reply(&self, prayer: &str, passage: &ParsedPassage) -> String {
        self.format_reply_at(prayer, passage, Utc::now())
    }

    /// Final reply, stamped with the given instant.
    #[must_use]
    pub fn format_reply_at(&self, prayer: &str, passage: &ParsedPassage, at: DateTime<Utc>) -> String {
        let local = at.with_timezone(&self.timezone);

        format!(
            "Requested Bible message ({} {}):\n\
             \n\
             1. {prayer}\n\
             \n\
             2. 📚 {} 📚\n\
             {}\n\
             \n\
             3. 📝 Explanation: 📝\n\
             {}",
            local.format(TIMESTAMP_FORMAT),
            self.timezone.name(),
            passage.reference,
            passage.verse_text,
            passage.explanation,
        )
    }
}

/// Splits text into chunks of at most `max_len` UTF-16 code units.
///
/// Splits prefer line boundaries; a single line longer than the limit is
/// cut between characters.
#[must_use]
pub fn chunk_message(text: &str, max_len: usize) -> Vec<String> {
    if max_len == 0 || utf16_len(text) <= max_len {
        return vec![text.to_owned()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = utf16_len(line);

        if current_len + line_len > max_len && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len <= max_len {
            current.push_str(line);
            current_len += line_len;
            continue;
        }

        for c in line.chars() {
            let c_len = c.len_utf16();
            if current_len + c_len > max_len && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push(c);
            current_len += c_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Length as Telegram counts it.
fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn passage() -> ParsedPassage {
        ParsedPassage::new("John 3:16", "For God so loved the world...", "This verse reveals...")
    }

    #[test]
    fn test_acknowledgment_echoes_reference() {
        assert_eq!(
            ReplyFormatter::acknowledgment("John 3:16"),
            "Fetching the passage \"John 3:16\" for you... Please wait a few seconds."
        );
    }

    #[test]
    fn test_format_reply_layout() {
        let formatter = ReplyFormatter::new(chrono_tz::America::Sao_Paulo);
        let at = Utc.with_ymd_and_hms(2024, 12, 25, 15, 30, 5).unwrap();
        let reply = formatter.format_reply_at("🙏🏽 Lord, guide us. 🙏🏽", &passage(), at);

        assert_eq!(
            reply,
            "Requested Bible message (25/12/2024 12:30:05 America/Sao_Paulo):\n\
             \n\
             1. 🙏🏽 Lord, guide us. 🙏🏽\n\
             \n\
             2. 📚 John 3:16 📚\n\
             For God so loved the world...\n\
             \n\
             3. 📝 Explanation: 📝\n\
             This verse reveals..."
        );
    }

    #[test]
    fn test_format_reply_uses_configured_timezone() {
        let formatter = ReplyFormatter::new(chrono_tz::Asia::Tokyo);
        let at = Utc.with_ymd_and_hms(2024, 1, 31, 20, 0, 0).unwrap();
        let reply = formatter.format_reply_at("p", &passage(), at);
        assert!(reply.starts_with("Requested Bible message (01/02/2024 05:00:00 Asia/Tokyo):"));
    }

    #[test]
    fn test_chunk_short_message() {
        assert_eq!(chunk_message("hello", 10), vec!["hello".to_owned()]);
    }

    #[test]
    fn test_chunk_on_line_boundaries() {
        let chunks = chunk_message("aaaa\nbbbb\ncccc", 10);
        assert_eq!(chunks, vec!["aaaa\nbbbb\n".to_owned(), "cccc".to_owned()]);
    }

    #[test]
    fn test_chunk_long_line() {
        let chunks = chunk_message(&"x".repeat(25), 10);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
        assert_eq!(chunks.concat(), "x".repeat(25));
    }

    #[test]
    fn test_chunk_preserves_content() {
        let text = format!("{}\n{}\n{}", "a".repeat(3000), "b".repeat(3000), "c".repeat(100));
        let chunks = chunk_message(&text, MAX_MESSAGE_LEN);
        assert!(chunks.iter().all(|c| c.encode_utf16().count() <= MAX_MESSAGE_LEN));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_chunk_counts_utf16_units() {
        // Each emoji is one char but two UTF-16 code units.
        let text = "📚".repeat(5000);
        let chunks = chunk_message(&text, MAX_MESSAGE_LEN);

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.encode_utf16().count() <= MAX_MESSAGE_LEN));
        assert_eq!(chunks[0].chars().count(), 2048);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_chunk_never_splits_surrogate_pair() {
        let chunks = chunk_message("a📚b📚", 2);
        assert_eq!(chunks, vec!["a".to_owned(), "📚".to_owned(), "b".to_owned(), "📚".to_owned()]);
    }
}
