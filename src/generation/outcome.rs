//! Typed result of a generation step that always yields usable content.

use std::fmt;

/// A field of a parsed passage that the model may fail to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassageField {
    Reference,
    VerseText,
    Explanation,
}

impl PassageField {
    /// All fields in the order they appear in a model answer.
    pub const ALL: [Self; 3] = [Self::Reference, Self::VerseText, Self::Explanation];

    /// Label the model is asked to emit before this field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reference => "REFERENCE",
            Self::VerseText => "VERSE_TEXT",
            Self::Explanation => "EXPLANATION",
        }
    }

    /// Text substituted when the field could not be extracted.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Reference => "Reference not found.",
            Self::VerseText => "Verse text not found.",
            Self::Explanation => "Explanation not generated.",
        }
    }
}

impl fmt::Display for PassageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a generation step.
///
/// Every variant carries a value that can be shown to the user; the
/// variant tells whether that value is real model output, partially
/// filled with placeholders, or a fallback after the call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated<T> {
    /// The model returned everything that was asked for.
    Complete(T),

    /// The model answered, but some fields hold placeholders.
    Degraded { value: T, missing: Vec<PassageField> },

    /// The call failed; `value` is fallback content.
    Failed { value: T, reason: String },
}

impl<T> Generated<T> {
    /// Returns the content regardless of outcome.
    pub const fn value(&self) -> &T {
        match self {
            Self::Complete(value) | Self::Degraded { value, .. } | Self::Failed { value, .. } => {
                value
            }
        }
    }

    /// Consumes the outcome and returns the content.
    pub fn into_value(self) -> T {
        match self {
            Self::Complete(value) | Self::Degraded { value, .. } | Self::Failed { value, .. } => {
                value
            }
        }
    }

    /// True when the content came straight from the model.
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// True when the generation call itself failed.
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Short name of the outcome, for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Complete(_) => "complete",
            Self::Degraded { .. } => "degraded",
            Self::Failed { .. } => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        let failed = Generated::Failed {
            value: "fallback".to_owned(),
            reason: "timeout".to_owned(),
        };
        assert_eq!(failed.value(), "fallback");
        assert!(failed.is_failed());
        assert!(!failed.is_complete());
        assert_eq!(failed.kind(), "failed");
        assert_eq!(failed.into_value(), "fallback");
    }

    #[test]
    fn test_degraded_kind() {
        let degraded = Generated::Degraded {
            value: 1,
            missing: vec![PassageField::VerseText],
        };
        assert_eq!(degraded.kind(), "degraded");
        assert!(!degraded.is_failed());
    }

    #[test]
    fn test_field_labels_and_placeholders() {
        assert_eq!(PassageField::Reference.label(), "REFERENCE");
        assert_eq!(PassageField::VerseText.to_string(), "VERSE_TEXT");
        assert_eq!(PassageField::Explanation.placeholder(), "Explanation not generated.");
    }
}
