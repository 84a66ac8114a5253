//! Text-to-speech proxy
//!
//! Synthesizes MP3 audio via the Google Text-to-Speech REST API and returns
//! the base64 audio payload unchanged.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

const TTS_URL: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_language")]
    pub language_code: String,
    /// Specific voice, e.g. "en-US-Neural2-C"; provider default when absent
    pub voice_name: Option<String>,
}

fn default_language() -> String {
    "en-US".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakResponse {
    #[serde(default)]
    pub audio_content: String,
}

pub async fn speak(
    State(state): State<AppState>,
    Json(payload): Json<SpeakRequest>,
) -> Result<Json<SpeakResponse>, ApiError> {
    let mut voice = json!({ "languageCode": payload.language_code, "ssmlGender": "NEUTRAL" });
    if let Some(name) = payload.voice_name {
        voice["name"] = json!(name);
    }

    let response = state
        .http
        .post(TTS_URL)
        .query(&[("key", state.args.google_api_key.as_str())])
        .json(&json!({
            "input": { "text": payload.text },
            "voice": voice,
            "audioConfig": { "audioEncoding": "MP3" },
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::Upstream(format!(
            "TTS failed: {}",
            response.status()
        )));
    }

    let synthesized: SpeakResponse = response.json().await?;
    if synthesized.audio_content.is_empty() {
        return Err(ApiError::Upstream("TTS failed: No audio generated.".into()));
    }
    Ok(Json(synthesized))
}

// =============================================
// Tests
// =============================================
