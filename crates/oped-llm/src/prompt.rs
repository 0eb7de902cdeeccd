//! Classification prompt construction.

/// Build the page-classification prompt.
///
/// The page text is truncated to `budget` chars before being embedded; the
/// keyword fallback still sees the full text, so truncation is silent here.
pub fn classification_prompt(page_text: &str, budget: usize) -> String {
    let truncated = truncate_chars(page_text, budget);
    format!(
        r#"Analyze the following text from a newspaper page. Determine if the primary content belongs to the Opinion, Editorial, Letters to the Editor, or Op-Ed section.
Respond ONLY with a single JSON object: {{"is_editorial": true, "reason": "brief explanation"}}
or {{"is_editorial": false, "reason": "brief explanation"}}.

Text (truncated if long):
---
{}
---"#,
        truncated
    )
}

/// Take the first `max_chars` chars of `text`, never splitting a char.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
