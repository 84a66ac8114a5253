use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantCareError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Weather API Key not configured.")]
    MissingWeatherApiKey,

    #[error("{0}")]
    ApiCall(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlantCareError>;
