//! Result and record types
//!
//! Shared between the CLI, the API clients and the local history store:
//! - PlantDiagnosis / ScanRecord: photo scan results and their history entries
//! - EncyclopediaEntry / CropInsight / FarmingAdvice / CaptionResult:
//!   transient per-query results
//! - CommunityPost: shared feed entries
//!
//! Every AI-backed result carries an optional `error` field. When it is set,
//! the other fields hold their defaults; when the call succeeded it is absent.

use serde::{Deserialize, Deserializer, Serialize};

/// Plant condition tag for UI styling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum StatusTag {
    Healthy,
    Diseased,
    NeedsAttention,
    #[default]
    Unknown,
}

impl<'de> Deserialize<'de> for StatusTag {
    /// Lenient: "Needs Attention" and "needsattention" both count;
    /// anything unrecognized falls back to Unknown
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let tag = match raw.replace(' ', "").to_ascii_lowercase().as_str() {
            "healthy" => StatusTag::Healthy,
            "diseased" => StatusTag::Diseased,
            "needsattention" => StatusTag::NeedsAttention,
            _ => StatusTag::Unknown,
        };
        Ok(tag)
    }
}

/// Diagnosis result for one plant photo
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlantDiagnosis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant_emoji: Option<String>,

    /// Confidence in the plant identification, 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant_confidence_percent: Option<f64>,

    pub condition: String,

    pub status_tag: StatusTag,

    pub disease_name: String,

    /// Always normalized to a list, even when the model returned a single
    /// newline-delimited string
    pub care_suggestions: Vec<String>,

    pub confidence_level: String,

    /// Confidence in the disease diagnosis, 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_percent: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlantDiagnosis {
    /// Default-shaped result with only `error` set
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// One persisted scan: image preview, diagnosis and the prompt that produced it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanRecord {
    pub id: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    pub image_preview_url: String,
    pub diagnosis: PlantDiagnosis,
    pub original_prompt: String,
}

/// Encyclopedia-style plant summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncyclopediaEntry {
    pub plant_name: String,
    pub summary: String,
    pub sunlight: String,
    pub watering: String,
    pub care: String,
    pub common_diseases: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EncyclopediaEntry {
    pub fn with_error(plant_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            plant_name: plant_name.into(),
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Crop recommendations for a district and month
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropInsight {
    pub district: String,
    pub month: String,
    pub suitable_crops: Vec<String>,
    /// All major crops grown in the district/month, not just suitable ones
    pub all_crops: Vec<String>,
    pub tips: String,
    pub climate_patterns: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CropInsight {
    pub fn with_error(
        district: impl Into<String>,
        month: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            district: district.into(),
            month: month.into(),
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Weather-based advice for a farming context
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmingAdvice {
    pub advice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FarmingAdvice {
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Generated caption for a community post photo
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptionResult {
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaptionResult {
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Grammatically cleaned speech-to-text transcript
///
/// Its own type on purpose: the text-only correction mode is unrelated to
/// diagnosis and should not ride on the diagnosis shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranscriptCorrection {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranscriptCorrection {
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// One community feed post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommunityPost {
    pub id: String,
    pub image_url: String,
    pub caption: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

/// Current weather for a city
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherData {
    pub city: String,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    pub description: String,
    /// Rain in the last hour, mm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain: Option<f64>,
    pub icon_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // StatusTag tests
    // =============================================

    #[test]
    fn test_status_tag_default() {
        assert_eq!(StatusTag::default(), StatusTag::Unknown);
    }

    #[test]
    fn test_status_tag_deserialize_exact() {
        let tag: StatusTag = serde_json::from_str("\"Diseased\"").unwrap();
        assert_eq!(tag, StatusTag::Diseased);
    }

    #[test]
    fn test_status_tag_deserialize_with_space() {
        let tag: StatusTag = serde_json::from_str("\"Needs Attention\"").unwrap();
        assert_eq!(tag, StatusTag::NeedsAttention);
    }

    #[test]
    fn test_status_tag_deserialize_unrecognized() {
        let tag: StatusTag = serde_json::from_str("\"Thriving\"").unwrap();
        assert_eq!(tag, StatusTag::Unknown);
    }

    // =============================================
    // PlantDiagnosis tests
    // =============================================

    #[test]
    fn test_plant_diagnosis_default() {
        let diagnosis = PlantDiagnosis::default();
        assert_eq!(diagnosis.condition, "");
        assert!(diagnosis.care_suggestions.is_empty());
        assert!(diagnosis.error.is_none());
        assert!(diagnosis.confidence_percent.is_none());
    }

    #[test]
    fn test_plant_diagnosis_with_error() {
        let diagnosis = PlantDiagnosis::with_error("API Key not configured.");
        assert_eq!(diagnosis.error.as_deref(), Some("API Key not configured."));
        assert_eq!(diagnosis.condition, "");
        assert_eq!(diagnosis.status_tag, StatusTag::Unknown);
    }

    #[test]
    fn test_plant_diagnosis_deserialize_camel_case() {
        let json = r#"{
            "condition": "Diseased",
            "statusTag": "Diseased",
            "diseaseName": "Leaf spot",
            "careSuggestions": ["Remove affected leaves"],
            "confidenceLevel": "High",
            "confidencePercent": 88
        }"#;

        let diagnosis: PlantDiagnosis = serde_json::from_str(json).unwrap();
        assert_eq!(diagnosis.disease_name, "Leaf spot");
        assert_eq!(diagnosis.status_tag, StatusTag::Diseased);
        assert_eq!(diagnosis.confidence_percent, Some(88.0));
        assert!(diagnosis.plant_name.is_none());
    }

    #[test]
    fn test_plant_diagnosis_serialize_omits_absent_options() {
        let diagnosis = PlantDiagnosis {
            condition: "Healthy".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&diagnosis).unwrap();
        assert!(json.contains("\"condition\":\"Healthy\""));
        assert!(!json.contains("error"));
        assert!(!json.contains("plantName"));
    }

    // =============================================
    // ScanRecord tests
    // =============================================

    #[test]
    fn test_scan_record_roundtrip() {
        let record = ScanRecord {
            id: "scan-1718000000000".to_string(),
            timestamp: 1_718_000_000_000,
            image_preview_url: "data:image/jpeg;base64,/9j/4AAQ".to_string(),
            diagnosis: PlantDiagnosis {
                condition: "Healthy".to_string(),
                status_tag: StatusTag::Healthy,
                ..Default::default()
            },
            original_prompt: "Is my tomato plant healthy?".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"imagePreviewUrl\""));
        assert!(json.contains("\"originalPrompt\""));

        let restored: ScanRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, record.id);
        assert_eq!(restored.diagnosis.status_tag, StatusTag::Healthy);
    }

    // =============================================
    // CropInsight tests
    // =============================================

    #[test]
    fn test_crop_insight_with_error_keeps_query_echo() {
        let insight = CropInsight::with_error("Mandya", "June", "Error from AI: timeout");
        assert_eq!(insight.district, "Mandya");
        assert_eq!(insight.month, "June");
        assert!(insight.suitable_crops.is_empty());
        assert!(insight.error.is_some());
    }

    // =============================================
    // WeatherData tests
    // =============================================

    #[test]
    fn test_weather_data_deserialize() {
        let json = r#"{
            "city": "Mysuru",
            "temperature": 24.5,
            "humidity": 71,
            "description": "light rain",
            "rain": 0.4,
            "iconUrl": "https://openweathermap.org/img/wn/10d@2x.png",
            "coordinates": {"lat": 12.3, "lon": 76.6}
        }"#;

        let weather: WeatherData = serde_json::from_str(json).unwrap();
        assert_eq!(weather.city, "Mysuru");
        assert_eq!(weather.rain, Some(0.4));
        assert_eq!(weather.coordinates.unwrap().lat, 12.3);
    }
}
