//! Speech-to-text proxy
//!
//! Recognizes base64-encoded audio via the Google Speech REST API. The
//! recognizer auto-detects among five languages; the encoding is picked from
//! the client-supplied MIME type.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

const SPEECH_URL: &str = "https://speech.googleapis.com/v1/speech:recognize";

/// Candidate languages offered to the recognizer
const ALTERNATIVE_LANGUAGES: &[&str] = &["en-US", "hi-IN", "kn-IN", "te-IN", "ta-IN"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SttRequest {
    pub audio_content: Option<String>,
    pub mime_type: Option<String>,
    /// Primary language hint; auto-detection still runs over the shortlist
    pub language_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SttResponse {
    pub text: String,
    pub language: String,
}

#[derive(Deserialize)]
struct GoogleSpeechResponse {
    #[serde(default)]
    results: Vec<SpeechResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpeechResult {
    #[serde(default)]
    alternatives: Vec<SpeechAlternative>,
    #[serde(default)]
    language_code: String,
}

#[derive(Deserialize)]
struct SpeechAlternative {
    #[serde(default)]
    transcript: String,
}

/// Recognizer encoding and sample rate for a client MIME type. Raw PCM and
/// WAV are 16 kHz LINEAR16; everything else (browser recordings) is
/// WEBM_OPUS with the rate read from the container.
fn encoding_for_mime(mime_type: Option<&str>) -> (&'static str, Option<u32>) {
    match mime_type {
        Some("audio/wav") | Some("audio/pcm") => ("LINEAR16", Some(16000)),
        _ => ("WEBM_OPUS", None),
    }
}

pub async fn transcribe(
    State(state): State<AppState>,
    Json(payload): Json<SttRequest>,
) -> Result<Json<SttResponse>, ApiError> {
    let audio_content = payload
        .audio_content
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No audioContent provided".into()))?;

    let (encoding, sample_rate) = encoding_for_mime(payload.mime_type.as_deref());
    let language_code = payload.language_code.as_deref().unwrap_or("en-US");
    let mut config = json!({
        "encoding": encoding,
        "languageCode": language_code,
        "enableAutomaticPunctuation": true,
        "alternativeLanguageCodes": ALTERNATIVE_LANGUAGES,
    });
    if let Some(rate) = sample_rate {
        config["sampleRateHertz"] = json!(rate);
    }

    let response = state
        .http
        .post(SPEECH_URL)
        .query(&[("key", state.args.google_api_key.as_str())])
        .json(&json!({ "config": config, "audio": { "content": audio_content } }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::Upstream(format!(
            "Speech API error: {}",
            response.status()
        )));
    }

    let recognized: GoogleSpeechResponse = response.json().await?;
    Ok(Json(transcription_from_results(recognized)))
}

fn transcription_from_results(response: GoogleSpeechResponse) -> SttResponse {
    let text = response
        .results
        .iter()
        .filter_map(|result| result.alternatives.first())
        .map(|alternative| alternative.transcript.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let language = response
        .results
        .first()
        .map(|result| result.language_code.clone())
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| "en".to_string());

    SttResponse { text, language }
}

// =============================================
// Tests
// =============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_for_wav_and_pcm_is_linear16() {
        assert_eq!(encoding_for_mime(Some("audio/wav")), ("LINEAR16", Some(16000)));
        assert_eq!(encoding_for_mime(Some("audio/pcm")), ("LINEAR16", Some(16000)));
    }

    #[test]
    fn test_encoding_defaults_to_webm_opus() {
        assert_eq!(encoding_for_mime(Some("audio/webm")), ("WEBM_OPUS", None));
        assert_eq!(encoding_for_mime(None), ("WEBM_OPUS", None));
    }

    #[test]
    fn test_transcription_joins_top_alternatives() {
        let response: GoogleSpeechResponse = serde_json::from_str(
            r#"{
                "results": [
                    {"alternatives": [{"transcript": "water the"}], "languageCode": "en-us"},
                    {"alternatives": [{"transcript": "tomato plants"}]}
                ]
            }"#,
        )
        .unwrap();

        let stt = transcription_from_results(response);
        assert_eq!(stt.text, "water the tomato plants");
        assert_eq!(stt.language, "en-us");
    }

    #[test]
    fn test_empty_results_fall_back_to_english() {
        let response: GoogleSpeechResponse = serde_json::from_str(r#"{}"#).unwrap();
        let stt = transcription_from_results(response);
        assert_eq!(stt.text, "");
        assert_eq!(stt.language, "en");
    }

    #[test]
    fn test_request_requires_audio_content() {
        let request: SttRequest = serde_json::from_str(r#"{"mimeType": "audio/webm"}"#).unwrap();
        assert!(request.audio_content.is_none());
    }
}
