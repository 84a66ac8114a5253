//! Batch translation proxy

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

const TRANSLATE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub texts: Option<Vec<String>>,
    pub target: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translations: Vec<String>,
}

#[derive(Deserialize)]
struct GoogleTranslateResponse {
    data: Option<GoogleTranslateData>,
}

#[derive(Deserialize)]
struct GoogleTranslateData {
    #[serde(default)]
    translations: Vec<GoogleTranslation>,
}

#[derive(Deserialize)]
struct GoogleTranslation {
    #[serde(rename = "translatedText", default)]
    translated_text: String,
}

pub async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let texts = payload.texts.filter(|texts| !texts.is_empty());
    let target = payload.target.filter(|target| !target.is_empty());
    let (Some(texts), Some(target)) = (texts, target) else {
        return Err(ApiError::BadRequest(
            "Invalid request. Provide texts (array) and target (language code).".into(),
        ));
    };

    let response = state
        .http
        .post(TRANSLATE_URL)
        .query(&[("key", state.args.google_api_key.as_str())])
        .json(&json!({ "q": texts, "target": target, "format": "text" }))
        .send()
        .await?;

    let payload: GoogleTranslateResponse = response.json().await?;
    let Some(data) = payload.data else {
        return Err(ApiError::Upstream("Translation API error".into()));
    };

    let translations = data
        .translations
        .into_iter()
        .map(|t| t.translated_text)
        .collect();
    Ok(Json(TranslateResponse { translations }))
}

// =============================================
// Tests
// =============================================
