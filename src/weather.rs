//! OpenWeatherMap client
//!
//! Current weather by city name. City-not-found and invalid-credential are
//! mapped to distinct, user-facing messages.

use crate::config::Config;
use crate::error::{PlantCareError, Result};
use plantcare_common::{Coordinates, WeatherData};
use serde::Deserialize;
use std::collections::HashMap;

const OPENWEATHERMAP_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// OpenWeatherMap wire response (subset)
#[derive(Deserialize)]
struct OwmResponse {
    name: String,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    #[serde(default)]
    rain: HashMap<String, f64>,
    coord: Option<OwmCoord>,
}

#[derive(Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Deserialize)]
struct OwmWeather {
    description: String,
    icon: String,
}

#[derive(Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct OwmError {
    #[serde(default)]
    message: String,
}

pub struct WeatherClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.weather_api_key())
    }

    /// Fetch current weather for a city (metric units)
    pub async fn fetch(&self, city: &str) -> Result<WeatherData> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(PlantCareError::MissingWeatherApiKey);
        };

        let response = self
            .http
            .get(OPENWEATHERMAP_API_URL)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 401 {
                return Err(PlantCareError::ApiCall(
                    "Invalid Weather API Key. Please contact support.".into(),
                ));
            }
            if status.as_u16() == 404 {
                return Err(PlantCareError::ApiCall(format!(
                    "City \"{}\" not found. Please check the spelling.",
                    city
                )));
            }
            let detail: OwmError = response.json().await.unwrap_or(OwmError {
                message: String::new(),
            });
            let message = if detail.message.is_empty() {
                format!("HTTP error! status: {}", status)
            } else {
                detail.message
            };
            return Err(PlantCareError::ApiCall(message));
        }

        let data: OwmResponse = response.json().await?;
        Ok(weather_from_response(data))
    }
}

fn weather_from_response(data: OwmResponse) -> WeatherData {
    let (description, icon) = data
        .weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_default();

    WeatherData {
        city: data.name,
        temperature: data.main.temp,
        humidity: data.main.humidity,
        description,
        rain: data.rain.get("1h").copied(),
        icon_url: format!("https://openweathermap.org/img/wn/{}@2x.png", icon),
        coordinates: data
            .coord
            .map(|c| Coordinates { lat: c.lat, lon: c.lon }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_from_response_maps_fields() {
        let json = r#"{
            "name": "Mysuru",
            "main": {"temp": 24.5, "humidity": 71},
            "weather": [{"description": "light rain", "icon": "10d"}],
            "rain": {"1h": 0.4},
            "coord": {"lat": 12.3, "lon": 76.6}
        }"#;

        let data: OwmResponse = serde_json::from_str(json).unwrap();
        let weather = weather_from_response(data);

        assert_eq!(weather.city, "Mysuru");
        assert_eq!(weather.temperature, 24.5);
        assert_eq!(weather.rain, Some(0.4));
        assert_eq!(
            weather.icon_url,
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
        assert_eq!(weather.coordinates.unwrap().lon, 76.6);
    }

    #[test]
    fn test_weather_from_response_without_rain() {
        let json = r#"{
            "name": "Ballari",
            "main": {"temp": 34.0, "humidity": 28},
            "weather": [{"description": "clear sky", "icon": "01d"}]
        }"#;

        let data: OwmResponse = serde_json::from_str(json).unwrap();
        let weather = weather_from_response(data);

        assert!(weather.rain.is_none());
        assert!(weather.coordinates.is_none());
    }

    #[tokio::test]
    async fn test_fetch_without_key_short_circuits() {
        let client = WeatherClient::new(None);
        let err = client.fetch("Mysuru").await.unwrap_err();
        assert!(matches!(err, PlantCareError::MissingWeatherApiKey));
    }
}
