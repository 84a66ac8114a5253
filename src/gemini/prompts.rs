//! Prompt builders
//!
//! Deterministic instruction prompts for each domain caller. Every prompt
//! embeds the JSON schema the response is expected to follow; the parser
//! and schema decoder deal with the cases where the model ignores it.

/// Base prompt for image diagnosis
const DIAGNOSIS_BASE_PROMPT: &str = r#"You are a plant health expert. Analyze the attached plant image. Respond ONLY in JSON format with these keys:
1. "plantName": (string, the most likely plant species or common name, e.g., "Mango", "Apple", "Rose". If unknown, say "Unknown").
2. "plantEmoji": (string, a relevant emoji for the plant, e.g., "🥭" for Mango, "🍎" for Apple, "🌹" for Rose, or "🪴" if unknown).
3. "plantConfidencePercent": (number, 0-100, your confidence in the plant identification).
4. "condition": (string, e.g., "Healthy", "Diseased", "Needs Attention", "Unknown").
5. "statusTag": (string, one of "Healthy", "Diseased", "NeedsAttention", "Unknown"). This should correspond to the condition.
6. "diseaseName": (string, specific disease/issue if any, or "N/A").
7. "careSuggestions": (array of strings, practical, actionable tips as bullet points. If "Healthy" or "Unknown", provide general care tips or state "N/A").
8. "confidenceLevel": (string, e.g., "High", "Medium", "Low", or "N/A if not a plant").
9. "confidencePercent": (number, 0-100, your confidence in the disease diagnosis).
Respond with ONLY ONE JSON object. Do NOT return multiple objects or extra text. Do NOT repeat the keys. If the image is not a plant, set plantName to "Unknown", plantEmoji to "🪴", plantConfidencePercent to 0, condition to "Unknown", statusTag to "Unknown", and other relevant fields to "N/A"."#;

/// Instagram-style caption prompt for community posts
pub const CAPTION_PROMPT: &str = r#"Generate a fun, engaging, and informative Instagram-style caption for this plant photo. Keep it concise (1-3 sentences). Respond ONLY in JSON format with one key: "caption" (string)."#;

/// Diagnosis prompt, optionally prefixed with the user's own question
pub fn build_diagnosis_prompt(custom_prompt: Option<&str>) -> String {
    match custom_prompt {
        Some(custom) if !custom.trim().is_empty() => {
            format!("{} {}", custom, DIAGNOSIS_BASE_PROMPT)
        }
        _ => DIAGNOSIS_BASE_PROMPT.to_string(),
    }
}

/// Transcript cleanup prompt (text-only, plain-text response)
pub fn build_correction_prompt(transcript: &str) -> String {
    format!(
        "{}\nRewrite the above as a clear, grammatically correct, natural sentence in the same language. If the text is a question, make it a polite, complete question. Do not translate. Do not add extra information.",
        transcript
    )
}

/// Encyclopedia lookup prompt
pub fn build_encyclopedia_prompt(plant_name: &str) -> String {
    format!(
        r#"Provide an encyclopedia-style summary for the plant "{plant_name}". Respond ONLY in JSON format with the following keys: "plantName" (string), "summary" (string), "sunlight" (string), "watering" (string), "care" (string), "commonDiseases" (string). If the plant is not found, return an error message under an "error" key, and set other fields to "N/A" or empty strings."#
    )
}

/// Crop recommendation prompt for a Karnataka district and month
pub fn build_crop_insights_prompt(district: &str, month: &str) -> String {
    format!(
        r#"For {district} district in Karnataka, during the month of {month}, what are the most suitable crops to grow? Respond ONLY in JSON format with keys: "district" (string), "month" (string), "suitableCrops" (array of strings), "allCrops" (array of all major crops grown in this district/month, not just suitable ones), "tips" (string, general farming tips for these crops in this context), "climatePatterns" (string, typical climate patterns for this district and month)."#
    )
}

/// Weather-based advice prompt
///
/// # Arguments
/// * `weather_json` - serialized weather snapshot for the location
/// * `context` - free-text crop/farming context supplied by the user
pub fn build_weather_advice_prompt(weather_json: &str, context: &str) -> String {
    format!(
        r#"Given the following weather data for {context}: {weather_json}. You are a strict, highly experienced agricultural advisor. If the crop or farming context is NOT suitable for the current weather, location, or season (for example, rice in a dry region like Sidlaghatta), you must give a very clear, strict, and lengthy warning. Explain in detail why it is not suitable, including water, soil, and climate requirements, and strongly advise the farmer to avoid this crop. Suggest better alternatives if possible. Do NOT sugar-coat or encourage unsuitable choices. If the crop is suitable, provide a detailed, practical, and actionable plan for today. Respond ONLY in JSON format with one key: "advice" (string, at least 5-10 sentences if warning, and always detailed)."#
    )
}
