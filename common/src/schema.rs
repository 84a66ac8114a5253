//! Permissive decoding of AI responses
//!
//! Generative output is unreliable about types: list fields come back as
//! newline-delimited strings, numbers come back quoted, keys go missing.
//! Each result type declares a [`ResultSchema`] and every caller runs the
//! parsed JSON through the same [`decode`] routine instead of massaging
//! fields ad hoc.

use serde_json::{Map, Value};

/// Canonical type of a declared result field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; non-string scalars are stringified
    Text,
    /// List of strings; a single string is split on newlines with `- `
    /// bullet markers stripped
    TextList,
    /// Optional number; numeric strings are coerced, absent stays absent
    OptionalNumber,
}

/// Shape descriptor for one result type
///
/// `discriminating` is the key whose presence decides whether the parsed
/// object counts as a successful response at all.
pub struct ResultSchema {
    pub discriminating: &'static str,
    pub fields: &'static [(&'static str, FieldKind)],
}

const UNSPECIFIED_ERROR: &str = "AI service returned an unspecified error.";

/// Plant diagnosis (discriminated by "condition")
pub const DIAGNOSIS_SCHEMA: ResultSchema = ResultSchema {
    discriminating: "condition",
    fields: &[
        ("plantName", FieldKind::Text),
        ("plantEmoji", FieldKind::Text),
        ("plantConfidencePercent", FieldKind::OptionalNumber),
        ("condition", FieldKind::Text),
        ("statusTag", FieldKind::Text),
        ("diseaseName", FieldKind::Text),
        ("careSuggestions", FieldKind::TextList),
        ("confidenceLevel", FieldKind::Text),
        ("confidencePercent", FieldKind::OptionalNumber),
    ],
};

/// Encyclopedia entry (discriminated by "summary")
pub const ENCYCLOPEDIA_SCHEMA: ResultSchema = ResultSchema {
    discriminating: "summary",
    fields: &[
        ("plantName", FieldKind::Text),
        ("summary", FieldKind::Text),
        ("sunlight", FieldKind::Text),
        ("watering", FieldKind::Text),
        ("care", FieldKind::Text),
        ("commonDiseases", FieldKind::Text),
    ],
};

/// Crop insight (discriminated by "suitableCrops")
pub const CROP_INSIGHT_SCHEMA: ResultSchema = ResultSchema {
    discriminating: "suitableCrops",
    fields: &[
        ("district", FieldKind::Text),
        ("month", FieldKind::Text),
        ("suitableCrops", FieldKind::TextList),
        ("allCrops", FieldKind::TextList),
        ("tips", FieldKind::Text),
        ("climatePatterns", FieldKind::Text),
    ],
};

/// Weather-based farming advice (discriminated by "advice")
pub const FARMING_ADVICE_SCHEMA: ResultSchema = ResultSchema {
    discriminating: "advice",
    fields: &[("advice", FieldKind::Text)],
};

/// Community post caption (discriminated by "caption")
pub const CAPTION_SCHEMA: ResultSchema = ResultSchema {
    discriminating: "caption",
    fields: &[("caption", FieldKind::Text)],
};

/// Normalize a parsed AI response against a schema
///
/// # Arguments
/// * `value` - JSON value returned by [`crate::extract_json`]
/// * `schema` - target shape descriptor
///
/// # Returns
/// * `Ok(Value)` - object with every declared field coerced to its canonical
///   type, ready to deserialize into the typed result
/// * `Err(String)` - the discriminating key is missing; carries the model's
///   own "error" text when present, a generic message otherwise
pub fn decode(value: &Value, schema: &ResultSchema) -> std::result::Result<Value, String> {
    let Some(map) = value.as_object() else {
        return Err(UNSPECIFIED_ERROR.to_string());
    };

    if !map.contains_key(schema.discriminating) {
        let message = map
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| UNSPECIFIED_ERROR.to_string());
        return Err(message);
    }

    let mut out = Map::new();
    for (name, kind) in schema.fields {
        let field = map.get(*name);
        match kind {
            FieldKind::Text => {
                if let Some(text) = field.and_then(coerce_text) {
                    out.insert((*name).to_string(), Value::String(text));
                }
            }
            FieldKind::TextList => {
                let list = normalize_string_list(field);
                out.insert(
                    (*name).to_string(),
                    Value::Array(list.into_iter().map(Value::String).collect()),
                );
            }
            FieldKind::OptionalNumber => {
                if let Some(n) = field.and_then(coerce_number) {
                    out.insert((*name).to_string(), Value::from(n));
                }
            }
        }
    }

    Ok(Value::Object(out))
}

/// Coerce a scalar to text; null yields None so struct defaults apply
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Normalize a declared list-of-strings field
///
/// * string: split on newlines, strip leading `- ` bullets, drop empty lines
/// * array: pass through each element coerced to string
/// * other scalar: single-element list
/// * absent or null: empty list
pub fn normalize_string_list(field: Option<&Value>) -> Vec<String> {
    match field {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => s
            .lines()
            .map(|line| {
                let line = line.trim();
                line.strip_prefix("- ").unwrap_or(line).trim().to_string()
            })
            .filter(|line| !line.is_empty())
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(other) => vec![other.to_string()],
    }
}

/// Coerce a number-ish value; numeric strings count, anything else is None
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =============================================
    // normalize_string_list tests
    // =============================================

    #[test]
    fn test_string_list_from_bulleted_string() {
        let value = json!("- Water daily\n- Keep in sun\n\n- Prune dead leaves");
        let list = normalize_string_list(Some(&value));
        assert_eq!(list, vec!["Water daily", "Keep in sun", "Prune dead leaves"]);
    }

    #[test]
    fn test_string_list_from_plain_string() {
        let value = json!("Water daily\nKeep in sun");
        let list = normalize_string_list(Some(&value));
        assert_eq!(list, vec!["Water daily", "Keep in sun"]);
    }

    #[test]
    fn test_string_list_from_array() {
        let value = json!(["Water daily", 42, true]);
        let list = normalize_string_list(Some(&value));
        assert_eq!(list, vec!["Water daily", "42", "true"]);
    }

    #[test]
    fn test_string_list_absent_is_empty() {
        assert!(normalize_string_list(None).is_empty());
        assert!(normalize_string_list(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn test_string_list_from_scalar() {
        let value = json!(7);
        assert_eq!(normalize_string_list(Some(&value)), vec!["7"]);
    }

    // =============================================
    // coerce_number tests
    // =============================================

    #[test]
    fn test_coerce_number_from_number() {
        assert_eq!(coerce_number(&json!(85)), Some(85.0));
        assert_eq!(coerce_number(&json!(42.5)), Some(42.5));
    }

    #[test]
    fn test_coerce_number_from_string() {
        assert_eq!(coerce_number(&json!("90")), Some(90.0));
        assert_eq!(coerce_number(&json!(" 12.5 ")), Some(12.5));
    }

    #[test]
    fn test_coerce_number_invalid() {
        assert_eq!(coerce_number(&json!("high")), None);
        assert_eq!(coerce_number(&json!(true)), None);
    }

    // =============================================
    // decode tests
    // =============================================

    #[test]
    fn test_decode_diagnosis_normalizes_fields() {
        let value = json!({
            "condition": "Healthy",
            "statusTag": "Healthy",
            "diseaseName": "N/A",
            "careSuggestions": "- Water daily\n- Keep in sun",
            "confidenceLevel": "High",
            "confidencePercent": "92"
        });

        let decoded = decode(&value, &DIAGNOSIS_SCHEMA).unwrap();
        assert_eq!(decoded["condition"], "Healthy");
        assert_eq!(decoded["careSuggestions"], json!(["Water daily", "Keep in sun"]));
        assert_eq!(decoded["confidencePercent"], json!(92.0));
    }

    #[test]
    fn test_decode_missing_discriminating_key_uses_model_error() {
        let value = json!({"error": "Plant not found."});

        let err = decode(&value, &ENCYCLOPEDIA_SCHEMA).unwrap_err();
        assert_eq!(err, "Plant not found.");
    }

    #[test]
    fn test_decode_missing_discriminating_key_generic_message() {
        let value = json!({"something": "else"});

        let err = decode(&value, &FARMING_ADVICE_SCHEMA).unwrap_err();
        assert_eq!(err, "AI service returned an unspecified error.");
    }

    #[test]
    fn test_decode_non_object_is_error() {
        let value = json!(["not", "an", "object"]);
        assert!(decode(&value, &CAPTION_SCHEMA).is_err());
    }

    #[test]
    fn test_decode_crop_insight_lists() {
        let value = json!({
            "district": "Mandya",
            "month": "June",
            "suitableCrops": ["Ragi", "Paddy"],
            "tips": "Prepare bunds before the monsoon.",
            "climatePatterns": "Onset of south-west monsoon."
        });

        let decoded = decode(&value, &CROP_INSIGHT_SCHEMA).unwrap();
        assert_eq!(decoded["suitableCrops"], json!(["Ragi", "Paddy"]));
        // absent list normalizes to empty, the caller backfills from suitableCrops
        assert_eq!(decoded["allCrops"], json!([]));
    }

    #[test]
    fn test_decode_drops_null_text() {
        let value = json!({"summary": "A hardy shrub.", "sunlight": null});

        let decoded = decode(&value, &ENCYCLOPEDIA_SCHEMA).unwrap();
        assert_eq!(decoded["summary"], "A hardy shrub.");
        assert!(decoded.get("sunlight").is_none());
    }
}
