use crate::error::{PlantCareError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default Gemini model; supports multimodal input, so the same model serves
/// both text and vision calls
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-04-17";

const DEFAULT_BACKEND_URL: &str = "http://localhost:5001";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub weather_api_key: Option<String>,
    pub pexels_api_key: Option<String>,
    #[serde(default)]
    pub youtube_api_key: Option<String>,
    pub model: String,
    pub backend_url: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            weather_api_key: None,
            pexels_api_key: None,
            youtube_api_key: None,
            model: DEFAULT_GEMINI_MODEL.into(),
            backend_url: DEFAULT_BACKEND_URL.into(),
            timeout_seconds: 120,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PlantCareError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("plantcare-ai").join("config.json"))
    }

    /// Gemini credential; the environment variable wins over the config file
    pub fn gemini_api_key(&self) -> Option<String> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.gemini_api_key.clone())
    }

    /// OpenWeatherMap credential; the environment variable wins
    pub fn weather_api_key(&self) -> Option<String> {
        std::env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.weather_api_key.clone())
    }

    /// Pexels credential for community feed seeding; the environment
    /// variable wins
    pub fn pexels_api_key(&self) -> Option<String> {
        std::env::var("PEXELS_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.pexels_api_key.clone())
    }

    /// YouTube Data API credential for video search; the environment
    /// variable wins
    pub fn youtube_api_key(&self) -> Option<String> {
        std::env::var("YOUTUBE_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.youtube_api_key.clone())
    }

    pub fn set_gemini_api_key(&mut self, key: String) -> Result<()> {
        self.gemini_api_key = Some(key);
        self.save()
    }

    pub fn set_weather_api_key(&mut self, key: String) -> Result<()> {
        self.weather_api_key = Some(key);
        self.save()
    }
}
