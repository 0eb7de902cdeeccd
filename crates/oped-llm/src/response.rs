//! Judgment parsing from model output.
//!
//! Models in JSON mode still wander: markdown fences, prose around the
//! object, trailing commentary. Parsing is strict first, then recovers by
//! re-parsing the outermost `{...}` span. Anything beyond that is a parse
//! failure the caller turns into a keyword fallback.

use oped_core::error::{OpedError, OpedResult};
use oped_core::types::Judgment;

/// Parse a model answer into a [`Judgment`].
///
/// A JSON object without an `is_editorial` field parses as a negative
/// judgment; a payload with no parseable object at all is an error.
pub fn parse_judgment(raw: &str) -> OpedResult<Judgment> {
    let trimmed = raw.trim();

    if let Ok(judgment) = serde_json::from_str::<Judgment>(trimmed) {
        return Ok(judgment);
    }

    let candidate = extract_json(trimmed);
    serde_json::from_str::<Judgment>(candidate).map_err(|e| {
        OpedError::response_parse(format!("No JSON judgment in model output: {}", e))
    })
}

/// Extract the outermost `{...}` span from a response that may carry
/// markdown code blocks or surrounding prose.
fn extract_json(response: &str) -> &str {
    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if end > start {
            return &response[start..=end];
        }
    }
    response
}
