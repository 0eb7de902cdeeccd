//! Page and verdict types.

use serde::{Deserialize, Serialize};

/// A single page of extracted text.
///
/// `index` is 0-based within the source document. `text` is the extracted
/// plain text and may legitimately be empty for image-only pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub text: String,
}

impl Page {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Length of the text with surrounding whitespace stripped, in chars.
    pub fn stripped_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}

/// Label assigned to a page by the classification policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLabel {
    Editorial,
    Opinion,
    Other,
}

impl PageLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Editorial => "editorial",
            Self::Opinion => "opinion",
            Self::Other => "other",
        }
    }

    /// Whether a page with this label goes into the consolidated output.
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Editorial | Self::Opinion)
    }
}

impl std::fmt::Display for PageLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which classifier produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictSource {
    /// The remote LLM classifier answered positively.
    Llm,
    /// The keyword fallback decided after the LLM declined or failed.
    Keyword,
    /// The page was too sparse for the LLM; only keywords were consulted.
    SparseKeyword,
    /// The page fell below the minimum length floor; nothing was consulted.
    MinLength,
}

/// Final classification verdict for one page.
///
/// Exactly one verdict is produced per page before the page is either
/// included in or excluded from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: PageLabel,
    pub source: VerdictSource,
    /// The model's reason or the matched keyword, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl Verdict {
    pub fn new(label: PageLabel, source: VerdictSource) -> Self {
        Self {
            label,
            source,
            rationale: None,
        }
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }
}

/// Structured judgment returned by the remote classifier.
///
/// A payload without an `is_editorial` field deserializes as a negative
/// judgment rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    #[serde(default)]
    pub is_editorial: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Judgment {
    /// Create a positive judgment with a reason.
    pub fn editorial(reason: impl Into<String>) -> Self {
        Self {
            is_editorial: true,
            reason: Some(reason.into()),
        }
    }

    /// Create a negative judgment with a reason.
    pub fn not_editorial(reason: impl Into<String>) -> Self {
        Self {
            is_editorial: false,
            reason: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stripped_len_ignores_surrounding_whitespace() {
        let page = Page::new(0, "  body text\n\n");
        assert_eq!(page.stripped_len(), 9);
    }

    #[test]
    fn test_stripped_len_counts_chars_not_bytes() {
        let page = Page::new(0, "résumé");
        assert_eq!(page.stripped_len(), 6);
    }

    #[test]
    fn test_only_editorial_and_opinion_are_selected() {
        assert!(PageLabel::Editorial.is_selected());
        assert!(PageLabel::Opinion.is_selected());
        assert!(!PageLabel::Other.is_selected());
    }

    #[test]
    fn test_label_display_is_lowercase() {
        assert_eq!(PageLabel::Editorial.to_string(), "editorial");
        assert_eq!(PageLabel::Other.to_string(), "other");
    }

    #[test]
    fn test_judgment_missing_field_defaults_to_false() {
        let judgment: Judgment = serde_json::from_str(r#"{"reason": "unclear"}"#).unwrap();
        assert!(!judgment.is_editorial);
        assert_eq!(judgment.reason.as_deref(), Some("unclear"));
    }

    #[test]
    fn test_judgment_empty_object_is_negative() {
        let judgment: Judgment = serde_json::from_str("{}").unwrap();
        assert!(!judgment.is_editorial);
        assert!(judgment.reason.is_none());
    }
}
