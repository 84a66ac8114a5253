//! Translation client with an explicit cache
//!
//! Talks to the backend proxy's `/api/translate` endpoint. The cache is an
//! owned collaborator keyed by (source text, target language) rather than a
//! module-level global, so callers decide its lifetime and sharing.
//!
//! Providers occasionally return untranslated text for Indic targets, so
//! each single translation is checked against the Unicode block of the
//! target script before being trusted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::RangeInclusive;

#[derive(Serialize)]
struct TranslateRequest<'a> {
    texts: &'a [String],
    target: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translations: Vec<String>,
}

/// Unicode block for each supported target script; Marathi shares
/// Devanagari with Hindi
const SCRIPT_RANGES: &[(&str, RangeInclusive<char>)] = &[
    ("hi", '\u{0900}'..='\u{097F}'),
    ("mr", '\u{0900}'..='\u{097F}'),
    ("bn", '\u{0980}'..='\u{09FF}'),
    ("pa", '\u{0A00}'..='\u{0A7F}'),
    ("gu", '\u{0A80}'..='\u{0AFF}'),
    ("or", '\u{0B00}'..='\u{0B7F}'),
    ("ta", '\u{0B80}'..='\u{0BFF}'),
    ("te", '\u{0C00}'..='\u{0C7F}'),
    ("kn", '\u{0C80}'..='\u{0CFF}'),
    ("ml", '\u{0D00}'..='\u{0D7F}'),
    ("ur", '\u{0600}'..='\u{06FF}'),
];

/// Check that a translation actually uses the target language's script
///
/// Lenient by design: unknown languages and English always pass, texts
/// shorter than 20 non-space characters pass (plant names pick up Latin
/// loanwords), and longer texts pass when more than 20% of their non-space
/// characters fall in the expected Unicode block.
pub fn is_text_in_expected_script(text: &str, target: &str) -> bool {
    if text.is_empty() || target == "en" {
        return true;
    }

    let Some((_, range)) = SCRIPT_RANGES.iter().find(|(lang, _)| *lang == target) else {
        return true;
    };

    let non_space: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if non_space.is_empty() || non_space.len() < 20 {
        return true;
    }

    let matching = non_space.iter().filter(|c| range.contains(*c)).count();
    matching as f64 / non_space.len() as f64 > 0.2
}

/// One translated string plus the script validation verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub script_ok: bool,
}

/// Cache of completed translations
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: HashMap<(String, String), String>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, text: &str, target: &str) -> Option<&str> {
        self.entries
            .get(&(text.to_string(), target.to_string()))
            .map(String::as_str)
    }

    pub fn insert(&mut self, text: &str, target: &str, translated: String) {
        self.entries
            .insert((text.to_string(), target.to_string()), translated);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct TranslationClient {
    http: reqwest::Client,
    backend_url: String,
    cache: TranslationCache,
}

impl TranslationClient {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            backend_url: backend_url.into(),
            cache: TranslationCache::new(),
        }
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Translate one string, consulting the cache first
    ///
    /// Best effort: English targets and empty text pass through unchanged,
    /// and any backend failure returns the original text with `script_ok`
    /// true. Completed translations are script-checked, cached ones too.
    pub async fn translate(&mut self, text: &str, target: &str) -> Translation {
        if text.is_empty() || target == "en" {
            return Translation {
                text: text.to_string(),
                script_ok: true,
            };
        }

        if let Some(cached) = self.cache.get(text, target) {
            return Translation {
                script_ok: is_text_in_expected_script(cached, target),
                text: cached.to_string(),
            };
        }

        let texts = vec![text.to_string()];
        match self.request(&texts, target).await {
            Some(mut translations) if !translations.is_empty() => {
                let translated = translations.remove(0);
                self.cache.insert(text, target, translated.clone());
                Translation {
                    script_ok: is_text_in_expected_script(&translated, target),
                    text: translated,
                }
            }
            _ => Translation {
                text: text.to_string(),
                script_ok: true,
            },
        }
    }

    /// Translate a batch in one call; falls back to the originals on failure
    pub async fn translate_batch(&mut self, texts: &[String], target: &str) -> Vec<String> {
        if texts.is_empty() || target == "en" {
            return texts.to_vec();
        }

        match self.request(texts, target).await {
            Some(translations) if translations.len() == texts.len() => {
                for (text, translated) in texts.iter().zip(&translations) {
                    self.cache.insert(text, target, translated.clone());
                }
                translations
            }
            _ => texts.to_vec(),
        }
    }

    async fn request(&self, texts: &[String], target: &str) -> Option<Vec<String>> {
        let url = format!("{}/api/translate", self.backend_url);
        let response = self
            .http
            .post(&url)
            .json(&TranslateRequest { texts, target })
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }

        let payload: TranslateResponse = response.json().await.ok()?;
        Some(payload.translations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_miss_then_hit() {
        let mut cache = TranslationCache::new();
        assert!(cache.get("Healthy", "kn").is_none());

        cache.insert("Healthy", "kn", "ಆರೋಗ್ಯಕರ".to_string());
        assert_eq!(cache.get("Healthy", "kn"), Some("ಆರೋಗ್ಯಕರ"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_key_includes_target_language() {
        let mut cache = TranslationCache::new();
        cache.insert("Healthy", "kn", "ಆರೋಗ್ಯಕರ".to_string());

        assert!(cache.get("Healthy", "hi").is_none());
        assert!(cache.get("Diseased", "kn").is_none());
    }

    // =============================================
    // script validation tests
    // =============================================

    #[test]
    fn test_script_check_short_text_is_lenient() {
        // under 20 non-space characters: Latin plant names pass as-is
        assert!(is_text_in_expected_script("Tulsi", "kn"));
        assert!(is_text_in_expected_script("Snake Plant", "hi"));
    }

    #[test]
    fn test_script_check_long_latin_text_fails_ratio() {
        let text = "Water the plant every morning and keep it in partial shade.";
        assert!(!is_text_in_expected_script(text, "kn"));
    }

    #[test]
    fn test_script_check_long_native_text_passes_ratio() {
        let text = "ಪ್ರತಿ ಮುಂಜಾನೆ ಗಿಡಕ್ಕೆ ನೀರು ಹಾಕಿ ಮತ್ತು ಭಾಗಶಃ ನೆರಳಿನಲ್ಲಿ ಇರಿಸಿ.";
        assert!(is_text_in_expected_script(text, "kn"));
    }

    #[test]
    fn test_script_check_mixed_text_needs_twenty_percent() {
        // 8 Kannada chars out of 27 non-space characters: just over 20%
        let passing = "ನೀರು ಹಾಕಿ water the plants daily";
        assert!(is_text_in_expected_script(passing, "kn"));

        // 3 out of 38: well under the threshold
        let failing = "ಇದು mostly untranslated english advice text";
        assert!(!is_text_in_expected_script(failing, "kn"));
    }

    #[test]
    fn test_script_check_unknown_language_passes() {
        let text = "A long english sentence that never gets script-checked.";
        assert!(is_text_in_expected_script(text, "fr"));
        assert!(is_text_in_expected_script(text, "en"));
    }

    // =============================================
    // client behaviour tests
    // =============================================

    #[tokio::test]
    async fn test_translate_english_passes_through_without_call() {
        // unroutable backend: any attempted call would fail, not pass through
        let mut client = TranslationClient::new("http://127.0.0.1:0");
        let result = client.translate("Water daily", "en").await;
        assert_eq!(result.text, "Water daily");
        assert!(result.script_ok);
        assert!(client.cache().is_empty());
    }

    #[tokio::test]
    async fn test_translate_cached_value_skips_backend() {
        let mut client = TranslationClient::new("http://127.0.0.1:0");
        client.cache.insert("Healthy", "kn", "ಆರೋಗ್ಯಕರ".to_string());

        let result = client.translate("Healthy", "kn").await;
        assert_eq!(result.text, "ಆರೋಗ್ಯಕರ");
        assert!(result.script_ok);
    }

    #[tokio::test]
    async fn test_translate_cached_value_is_script_checked() {
        let mut client = TranslationClient::new("http://127.0.0.1:0");
        client.cache.insert(
            "Care instructions",
            "kn",
            "Water the plant every morning and keep it in shade.".to_string(),
        );

        let result = client.translate("Care instructions", "kn").await;
        assert!(!result.script_ok);
    }

    #[tokio::test]
    async fn test_translate_backend_failure_returns_original() {
        let mut client = TranslationClient::new("http://127.0.0.1:0");
        let result = client.translate("Healthy", "kn").await;
        assert_eq!(result.text, "Healthy");
        assert!(result.script_ok);
    }

    #[tokio::test]
    async fn test_batch_backend_failure_returns_originals() {
        let mut client = TranslationClient::new("http://127.0.0.1:0");
        let texts = vec!["Healthy".to_string(), "Diseased".to_string()];
        let result = client.translate_batch(&texts, "hi").await;
        assert_eq!(result, texts);
    }
}
