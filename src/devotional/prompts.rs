//! Prompt templates sent to the generation API.

use crate::generation::PassageField;

/// Marker the prayer must start and end with.
pub const PRAYER_MARKER: &str = "🙏🏽";

/// Prompt asking for a short prayer before reading scripture.
#[must_use]
pub fn build_prayer_prompt() -> String {
    format!(
        "Write a short prayer (at most 4 sentences) in English to be said before reading the \
         Bible. The prayer should ask for understanding, wisdom and spiritual illumination to \
         comprehend the Word of God. Use a reverent, devotional tone. Start with '{PRAYER_MARKER}' \
         and end with '{PRAYER_MARKER}'."
    )
}

/// Prompt asking for the verse at `reference` and an explanation of it.
///
/// The reference is embedded as given.
#[must_use]
pub fn build_passage_prompt(reference: &str) -> String {
    let reference_label = PassageField::Reference.label();
    let verse_label = PassageField::VerseText.label();
    let explanation_label = PassageField::Explanation.label();

    format!(
        "For the Bible passage \"{reference}\" from the Holy Bible, do the following:

1. Present the complete verse, including its reference (e.g. John 3:16).
2. Then explain the meaning of this verse and of its context in the chapter, in terms of what God wants to tell us today.
3. The explanation must be between 80 and 150 words, in an inspiring, reflective and theologically sound tone.
4. Format your answer exactly like this, with the labels in UPPERCASE followed by a colon, and the sections separated by a blank line. Do not include any additional text.
{reference_label}: [The verse reference, e.g. Genesis 1:1]

{verse_label}: [The full text of the verse]

{explanation_label}: [The explanation of the verse and chapter]"
    )
}
