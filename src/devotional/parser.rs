//! Parsing of the model's labeled passage answer and prayer cleanup.
//!
//! The passage answer is expected to look like:
//!
//! ```text
//! REFERENCE: John 3:16
//!
//! VERSE_TEXT: For God so loved the world...
//!
//! EXPLANATION: This verse reveals...
//! ```
//!
//! Each label is searched for on its own. A field runs from its label to
//! the next blank line (or end of input); the explanation always runs to
//! the end of input. Missing labels are replaced with the field's
//! placeholder, so parsing never fails.

use std::sync::LazyLock;

use regex::Regex;

use super::prompts::PRAYER_MARKER;
use crate::generation::PassageField;

/// Sentinel value used for reference and verse text when generation failed.
pub const ERROR_SENTINEL: &str = "Error";

/// The three fields extracted from a passage answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPassage {
    /// Citation, e.g. "John 3:16".
    pub reference: String,

    /// Full text of the verse.
    pub verse_text: String,

    /// Contextual explanation.
    pub explanation: String,

    /// Fields that were not found and hold placeholders.
    pub missing: Vec<PassageField>,
}

impl ParsedPassage {
    /// Creates a passage with all fields present.
    #[must_use]
    pub fn new(
        reference: impl Into<String>,
        verse_text: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            verse_text: verse_text.into(),
            explanation: explanation.into(),
            missing: Vec::new(),
        }
    }

    /// Creates the sentinel passage shown when the generation call failed.
    #[must_use]
    pub fn sentinel(reason: &str) -> Self {
        Self::new(
            ERROR_SENTINEL,
            ERROR_SENTINEL,
            format!("Error generating scripture content: {reason}. Check the logs."),
        )
    }

    /// True when every label was found.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn field(&self, field: PassageField) -> &str {
        match field {
            PassageField::Reference => &self.reference,
            PassageField::VerseText => &self.verse_text,
            PassageField::Explanation => &self.explanation,
        }
    }
}

#[allow(clippy::expect_used)]
static FIELD_PATTERNS: LazyLock<[Regex; 3]> =
    LazyLock::new(|| PassageField::ALL.map(|field| field_pattern(field).expect("field pattern is valid")));

fn field_pattern(field: PassageField) -> Result<Regex, regex::Error> {
    let body = match field {
        PassageField::Explanation => r"(.*)\z",
        PassageField::Reference | PassageField::VerseText => r"(.*?)(?:\n\n|\z)",
    };
    Regex::new(&format!(r"(?s){}:\s*{body}", regex::escape(field.label())))
}

const fn pattern_index(field: PassageField) -> usize {
    match field {
        PassageField::Reference => 0,
        PassageField::VerseText => 1,
        PassageField::Explanation => 2,
    }
}

/// Extracts a single field, trimmed, or `None` if its label is absent.
#[must_use]
pub fn extract_field(raw_text: &str, field: PassageField) -> Option<String> {
    FIELD_PATTERNS[pattern_index(field)]
        .captures(raw_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
}

/// Parses a labeled passage answer into its three fields.
#[must_use]
pub fn parse_passage(raw_text: &str) -> ParsedPassage {
    let normalized = raw_text.replace("\r\n", "\n");
    let text = normalized.trim();

    let mut missing = Vec::new();
    let mut take = |field: PassageField| {
        extract_field(text, field).unwrap_or_else(|| {
            missing.push(field);
            field.placeholder().to_owned()
        })
    };

    let reference = take(PassageField::Reference);
    let verse_text = take(PassageField::VerseText);
    let explanation = take(PassageField::Explanation);

    ParsedPassage {
        reference,
        verse_text,
        explanation,
        missing,
    }
}

/// Makes sure the prayer starts and ends with the prayer marker.
///
/// Only missing markers are added; text is otherwise left as is.
#[must_use]
pub fn format_prayer(raw_text: &str) -> String {
    let mut text = raw_text.to_owned();
    if !text.starts_with(PRAYER_MARKER) {
        text = format!("{PRAYER_MARKER} {text}");
    }
    if !text.ends_with(PRAYER_MARKER) {
        text.push(' ');
        text.push_str(PRAYER_MARKER);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "REFERENCE: John 3:16\n\nVERSE_TEXT: For God so loved the world...\n\nEXPLANATION: This verse reveals...";

    #[test]
    fn test_parse_well_formed() {
        let passage = parse_passage(WELL_FORMED);
        assert_eq!(passage.reference, "John 3:16");
        assert_eq!(passage.verse_text, "For God so loved the world...");
        assert_eq!(passage.explanation, "This verse reveals...");
        assert!(passage.is_complete());
    }

    #[test]
    fn test_parse_only_explanation() {
        let passage = parse_passage("EXPLANATION: Love is patient.");
        assert_eq!(passage.reference, PassageField::Reference.placeholder());
        assert_eq!(passage.verse_text, PassageField::VerseText.placeholder());
        assert_eq!(passage.explanation, "Love is patient.");
        assert_eq!(
            passage.missing,
            vec![PassageField::Reference, PassageField::VerseText]
        );
    }

    #[test]
    fn test_parse_missing_middle_field() {
        let passage = parse_passage("REFERENCE: Psalms 23:1\n\nEXPLANATION: The Lord provides.");
        assert_eq!(passage.reference, "Psalms 23:1");
        assert_eq!(passage.verse_text, PassageField::VerseText.placeholder());
        assert_eq!(passage.explanation, "The Lord provides.");
        assert_eq!(passage.missing, vec![PassageField::VerseText]);
    }

    #[test]
    fn test_parse_no_labels() {
        let passage = parse_passage("I cannot help with that.");
        assert_eq!(passage.missing, PassageField::ALL.to_vec());
        for field in PassageField::ALL {
            assert_eq!(passage.field(field), field.placeholder());
        }
    }

    #[test]
    fn test_parse_empty_input() {
        let passage = parse_passage("");
        assert_eq!(passage.missing.len(), 3);
    }

    #[test]
    fn test_explanation_runs_to_end_of_input() {
        let raw = "REFERENCE: Romans 8:28\n\nVERSE_TEXT: And we know...\n\nEXPLANATION: First paragraph.\n\nSecond paragraph.\n";
        let passage = parse_passage(raw);
        assert_eq!(passage.explanation, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn test_multiline_field_until_blank_line() {
        let raw = "REFERENCE: Psalms 23:1-2\n\nVERSE_TEXT: The Lord is my shepherd;\nI shall not want.\n\nEXPLANATION: Trust.";
        let passage = parse_passage(raw);
        assert_eq!(passage.verse_text, "The Lord is my shepherd;\nI shall not want.");
    }

    #[test]
    fn test_last_field_without_trailing_blank_line() {
        let passage = parse_passage("VERSE_TEXT: In the beginning...  ");
        assert_eq!(passage.verse_text, "In the beginning...");
    }

    #[test]
    fn test_fields_in_any_order() {
        let raw = "EXPLANATION: Explained.\n\nREFERENCE: Genesis 1:1\n\nVERSE_TEXT: In the beginning";
        let passage = parse_passage(raw);
        assert_eq!(passage.reference, "Genesis 1:1");
        assert_eq!(passage.verse_text, "In the beginning");
        // The explanation captures everything after its label.
        assert!(passage.explanation.starts_with("Explained."));
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let passage = parse_passage("reference: John 1:1\n\nverse_text: In the beginning was the Word");
        assert_eq!(passage.missing, PassageField::ALL.to_vec());
    }

    #[test]
    fn test_crlf_line_endings() {
        let raw = WELL_FORMED.replace('\n', "\r\n");
        assert_eq!(parse_passage(&raw), parse_passage(WELL_FORMED));
    }

    #[test]
    fn test_surrounding_text_is_ignored() {
        let raw = format!("Here is your answer:\n\n{WELL_FORMED}");
        let passage = parse_passage(&raw);
        assert_eq!(passage.reference, "John 3:16");
    }

    #[test]
    fn test_sentinel() {
        let passage = ParsedPassage::sentinel("quota exceeded");
        assert_eq!(passage.reference, ERROR_SENTINEL);
        assert_eq!(passage.verse_text, ERROR_SENTINEL);
        assert_eq!(
            passage.explanation,
            "Error generating scripture content: quota exceeded. Check the logs."
        );
    }

    #[test]
    fn test_format_prayer_idempotent() {
        let prayer = "🙏🏽 Lord, open our eyes. 🙏🏽";
        assert_eq!(format_prayer(prayer), prayer);
        assert_eq!(format_prayer(&format_prayer("Lord, guide us.")), format_prayer("Lord, guide us."));
    }

    #[test]
    fn test_format_prayer_adds_both_markers() {
        assert_eq!(format_prayer("Lord, guide us."), "🙏🏽 Lord, guide us. 🙏🏽");
    }

    #[test]
    fn test_format_prayer_adds_only_missing_marker() {
        assert_eq!(format_prayer("🙏🏽 Lord, guide us."), "🙏🏽 Lord, guide us. 🙏🏽");
        assert_eq!(format_prayer("Lord, guide us. 🙏🏽"), "🙏🏽 Lord, guide us. 🙏🏽");
    }

    #[test]
    fn test_format_prayer_never_duplicates_markers() {
        for input in ["Amen", "🙏🏽 Amen", "Amen 🙏🏽", "🙏🏽 Amen 🙏🏽"] {
            assert_eq!(format_prayer(input).matches(PRAYER_MARKER).count(), 2, "{input}");
        }
    }

    #[test]
    fn test_format_prayer_marker_only() {
        assert_eq!(format_prayer(PRAYER_MARKER), PRAYER_MARKER);
    }
}
