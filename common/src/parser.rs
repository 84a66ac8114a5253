//! AI response parser
//!
//! Extracts a JSON document from the raw text returned by a generative AI
//! call. The prompts ask for pure JSON, but models routinely wrap the payload
//! in markdown fences, surrounding prose, or emit the same object twice.

use crate::error::{Error, Result};
use serde_json::Value;

/// Extract the JSON part of an API response
///
/// Extraction priority:
/// 1. ```json ... ``` block content
/// 2. first balanced `{...}` object (trailing duplicates are discarded)
/// 3. first balanced `[...]` array
///
/// # Arguments
/// * `response` - raw API response text
///
/// # Returns
/// * `Ok(Value)` - parsed JSON value
/// * `Err(Error::Parse)` - no parseable JSON; the message carries the
///   original response text so callers can log it
///
/// # Examples
/// ```
/// use plantcare_common::extract_json;
///
/// let response = "Here is the result: {\"condition\": \"Healthy\"} Hope this helps!";
/// let value = extract_json(response).unwrap();
/// assert_eq!(value["condition"], "Healthy");
/// ```
pub fn extract_json(response: &str) -> Result<Value> {
    let mut text = response.trim();

    // ```json ... ``` block takes priority
    if let Some(marker) = text.find("```json") {
        let start = marker + 7; // length of "```json"
        if let Some(end_offset) = text[start..].find("```") {
            text = text[start..start + end_offset].trim();
        }
    } else if let Some(rest) = text.strip_prefix("```") {
        if let Some(end) = rest.rfind("```") {
            text = rest[..end].trim();
        }
    }

    // First balanced object wins; a second concatenated object is dropped.
    let candidate = find_balanced(text, '{', '}')
        .or_else(|| find_balanced(text, '[', ']'))
        .unwrap_or(text);

    serde_json::from_str(candidate).map_err(|e| {
        Error::Parse(format!(
            "Failed to parse AI response. The response might not be valid JSON ({}).\n---\n{}",
            e, response
        ))
    })
}

/// Find the first balanced `open...close` substring, skipping string literals
fn find_balanced(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(&text[start..=start + i]);
            }
        }
    }

    None
}
