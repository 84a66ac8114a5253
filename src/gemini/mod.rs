//! Gemini API client and domain callers
//!
//! Each domain caller builds a prompt, invokes the generative model and maps
//! the raw response onto one of the typed results. The callers never return
//! an error and never panic: missing credentials, transport failures and
//! unparseable responses all land in the result's `error` field so the UI
//! can render them inline.

pub mod prompts;

use crate::config::Config;
use crate::error::{PlantCareError, Result};
use plantcare_common::{
    decode, extract_json, CaptionResult, CropInsight, EncyclopediaEntry, FarmingAdvice,
    PlantDiagnosis, ResultSchema, TranscriptCorrection, CAPTION_SCHEMA, CROP_INSIGHT_SCHEMA,
    DIAGNOSIS_SCHEMA, ENCYCLOPEDIA_SCHEMA, FARMING_ADVICE_SCHEMA,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const MISSING_KEY_ERROR: &str = "API Key not configured.";

/// Gemini API request
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

/// Gemini API response
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Extract the base64 data part of a data URL
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." style URL
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split(',').nth(1)
}

/// Extract the MIME type of a data URL, defaulting to "image/jpeg"
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .split(':')
        .nth(1)
        .and_then(|s| s.split(';').next())
        .unwrap_or("image/jpeg")
}

/// Image MIME type for a file extension, defaulting to "image/jpeg"
pub fn mime_type_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "image/jpeg",
    }
}

/// Gemini client with the domain callers
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>, timeout_seconds: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_key,
            model: model.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_api_key(),
            config.model.clone(),
            config.timeout_seconds,
        )
    }

    /// Raw generateContent call, returns the first candidate's text
    async fn generate(
        &self,
        api_key: &str,
        parts: Vec<Part>,
        response_mime_type: &str,
    ) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                response_mime_type: response_mime_type.to_string(),
            },
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, api_key
        );
        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(PlantCareError::ApiCall(format!(
                "API error: {}",
                response.status()
            )));
        }

        let payload: GeminiResponse = response.json().await?;
        let text = payload
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PlantCareError::ApiCall("AI did not return a response.".into()))?;

        Ok(text)
    }

    /// Diagnose a plant photo
    ///
    /// # Arguments
    /// * `image_base64` - base64-encoded image bytes (no data-URL prefix)
    /// * `mime_type` - declared image MIME type
    /// * `custom_prompt` - optional user question prepended to the base prompt
    pub async fn diagnose_plant(
        &self,
        image_base64: &str,
        mime_type: &str,
        custom_prompt: Option<&str>,
    ) -> PlantDiagnosis {
        let Some(api_key) = self.api_key.clone() else {
            return PlantDiagnosis::with_error(MISSING_KEY_ERROR);
        };

        let parts = vec![
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.to_string(),
                    data: image_base64.to_string(),
                },
            },
            Part::Text {
                text: prompts::build_diagnosis_prompt(custom_prompt),
            },
        ];

        let text = match self.generate(&api_key, parts, "application/json").await {
            Ok(text) => text,
            Err(e) => return PlantDiagnosis::with_error(format!("Error from AI: {}", e)),
        };

        match parse_result::<PlantDiagnosis>(&text, &DIAGNOSIS_SCHEMA) {
            Ok(diagnosis) => diagnosis,
            Err(message) => PlantDiagnosis::with_error(message),
        }
    }

    /// Grammatically clean up a speech-to-text transcript
    ///
    /// Text-only call; the model answers in plain text, not JSON.
    pub async fn correct_transcript(&self, transcript: &str) -> TranscriptCorrection {
        let Some(api_key) = self.api_key.clone() else {
            return TranscriptCorrection::with_error(MISSING_KEY_ERROR);
        };

        let parts = vec![Part::Text {
            text: prompts::build_correction_prompt(transcript),
        }];

        match self.generate(&api_key, parts, "text/plain").await {
            Ok(text) => TranscriptCorrection {
                text: text.trim().to_string(),
                error: None,
            },
            Err(e) => TranscriptCorrection::with_error(format!("Error from AI: {}", e)),
        }
    }

    /// Fetch an encyclopedia-style summary for a plant
    pub async fn encyclopedia_entry(&self, plant_name: &str) -> EncyclopediaEntry {
        let Some(api_key) = self.api_key.clone() else {
            return EncyclopediaEntry::with_error(plant_name, MISSING_KEY_ERROR);
        };

        let parts = vec![Part::Text {
            text: prompts::build_encyclopedia_prompt(plant_name),
        }];

        let text = match self.generate(&api_key, parts, "application/json").await {
            Ok(text) => text,
            Err(e) => {
                return EncyclopediaEntry::with_error(plant_name, format!("Error from AI: {}", e))
            }
        };

        match parse_result::<EncyclopediaEntry>(&text, &ENCYCLOPEDIA_SCHEMA) {
            Ok(mut entry) => {
                if entry.plant_name.is_empty() {
                    entry.plant_name = plant_name.to_string();
                }
                entry
            }
            Err(message) => EncyclopediaEntry::with_error(plant_name, message),
        }
    }

    /// Fetch crop recommendations for a district and month
    pub async fn crop_insights(&self, district: &str, month: &str) -> CropInsight {
        let Some(api_key) = self.api_key.clone() else {
            return CropInsight::with_error(district, month, MISSING_KEY_ERROR);
        };

        let parts = vec![Part::Text {
            text: prompts::build_crop_insights_prompt(district, month),
        }];

        let text = match self.generate(&api_key, parts, "application/json").await {
            Ok(text) => text,
            Err(e) => {
                return CropInsight::with_error(district, month, format!("Error from AI: {}", e))
            }
        };

        match parse_result::<CropInsight>(&text, &CROP_INSIGHT_SCHEMA) {
            Ok(mut insight) => {
                if insight.district.is_empty() {
                    insight.district = district.to_string();
                }
                if insight.month.is_empty() {
                    insight.month = month.to_string();
                }
                // models often omit allCrops; fall back to the suitable list
                if insight.all_crops.is_empty() {
                    insight.all_crops = insight.suitable_crops.clone();
                }
                insight
            }
            Err(message) => CropInsight::with_error(district, month, message),
        }
    }

    /// Fetch weather-based farming advice
    ///
    /// # Arguments
    /// * `weather_json` - serialized weather snapshot
    /// * `context` - crop/farming context, e.g. "rice near Mandya"
    pub async fn weather_advice(&self, weather_json: &str, context: &str) -> FarmingAdvice {
        let Some(api_key) = self.api_key.clone() else {
            return FarmingAdvice::with_error(MISSING_KEY_ERROR);
        };

        let parts = vec![Part::Text {
            text: prompts::build_weather_advice_prompt(weather_json, context),
        }];

        let text = match self.generate(&api_key, parts, "application/json").await {
            Ok(text) => text,
            Err(e) => return FarmingAdvice::with_error(format!("Error from AI: {}", e)),
        };

        match parse_result::<FarmingAdvice>(&text, &FARMING_ADVICE_SCHEMA) {
            Ok(advice) => advice,
            Err(message) => FarmingAdvice::with_error(message),
        }
    }

    /// Generate an Instagram-style caption for a community post photo
    pub async fn generate_caption(&self, image_base64: &str, mime_type: &str) -> CaptionResult {
        let Some(api_key) = self.api_key.clone() else {
            return CaptionResult::with_error(MISSING_KEY_ERROR);
        };

        let parts = vec![
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.to_string(),
                    data: image_base64.to_string(),
                },
            },
            Part::Text {
                text: prompts::CAPTION_PROMPT.to_string(),
            },
        ];

        let text = match self.generate(&api_key, parts, "application/json").await {
            Ok(text) => text,
            Err(e) => return CaptionResult::with_error(format!("Error from AI: {}", e)),
        };

        match parse_result::<CaptionResult>(&text, &CAPTION_SCHEMA) {
            Ok(caption) => caption,
            Err(message) => CaptionResult::with_error(message),
        }
    }
}

/// Raw response text -> extractor -> schema decode -> typed result
///
/// The error string is ready for the result's `error` field: either the
/// parse diagnostic carrying the original text, or the model's own error.
fn parse_result<T: DeserializeOwned>(
    text: &str,
    schema: &ResultSchema,
) -> std::result::Result<T, String> {
    let value = extract_json(text).map_err(|e| match e {
        plantcare_common::Error::Parse(message) => message,
        other => other.to_string(),
    })?;

    let normalized = decode(&value, schema)?;
    serde_json::from_value(normalized)
        .map_err(|_| "AI service returned an unspecified error.".to_string())
}
