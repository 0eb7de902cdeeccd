//! Deterministic keyword fallback classifier.

/// Section keywords that mark a page as opinion content.
///
/// Matching is case-insensitive substring containment over the full page
/// text. No stemming and no word-boundary handling: "editorials" matches
/// "editorial". That looseness is intentional for the fallback role.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "editorial",
    "op-ed",
    "opinion",
    "letter to the editor",
    "letters",
];

/// Keyword matcher over a fixed lowercase keyword list.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

impl KeywordMatcher {
    /// Create a matcher from a keyword list. Keywords are lowercased;
    /// empty entries are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Check whether any keyword occurs in the text.
    pub fn matches(&self, text: &str) -> bool {
        self.find_match(text).is_some()
    }

    /// Find the first keyword (in list order) that occurs in the text.
    pub fn find_match(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.keywords
            .iter()
            .find(|kw| lowered.contains(kw.as_str()))
            .map(|kw| kw.as_str())
    }

    /// The keyword list in effect.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_are_case_insensitive() {
        let matcher = KeywordMatcher::default();
        assert!(matcher.matches("THE EDITORIAL BOARD"));
        assert!(matcher.matches("Letters to the Editor"));
        assert!(matcher.matches("op-Ed submissions welcome"));
    }

    #[test]
    fn test_matches_substrings_without_word_boundaries() {
        let matcher = KeywordMatcher::default();
        assert!(matcher.matches("editorials from the archive"));
        assert!(matcher.matches("newsletters weekly digest"));
    }

    #[test]
    fn test_no_match_on_unrelated_text() {
        let matcher = KeywordMatcher::default();
        assert!(!matcher.matches("Sports results and weather forecast"));
        assert!(!matcher.matches(""));
    }

    #[test]
    fn test_find_match_reports_first_keyword_in_list_order() {
        let matcher = KeywordMatcher::default();
        // Contains both "opinion" and "letters"; "opinion" comes first.
        let text = "Opinion pages and letters from readers";
        assert_eq!(matcher.find_match(text), Some("opinion"));
    }

    #[test]
    fn test_custom_keyword_list() {
        let matcher = KeywordMatcher::new(["Commentary", "  ", "tribune "]);
        assert_eq!(matcher.keywords(), &["commentary", "tribune"]);
        assert!(matcher.matches("guest commentary on schools"));
        assert!(!matcher.matches("opinion"));
    }
}
