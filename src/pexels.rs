//! Pexels stock-photo fallback
//!
//! Seeds the community feed with plant photos when no posts exist locally.

use crate::config::Config;
use crate::error::{PlantCareError, Result};
use plantcare_common::{CommunityPost, MAX_COMMUNITY_POSTS};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

const PEXELS_API_URL: &str = "https://api.pexels.com/v1/search?query=plants&per_page=40";

/// Captions rotated across seeded posts
const DEFAULT_CAPTIONS: &[&str] = &[
    "Nature's masterpiece 🌱",
    "Green therapy for the soul",
    "Plant power!",
    "Leafy love",
    "A touch of green magic",
    "Breathe in, breathe out: plant style",
    "Rooted in beauty",
    "Sun-kissed leaves",
    "Fresh air, fresh vibes",
    "Plant parent goals",
    "Jungle vibes at home",
    "Sprouting happiness",
    "Botanical bliss",
    "Chlorophyll dreams",
    "Nature's artwork",
    "Serenity in green",
    "Flourishing friends",
    "Tiny forests, big joy",
    "Grow through what you go through",
    "Earth's little wonders",
];

#[derive(Deserialize)]
struct PexelsSearchResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Deserialize)]
struct PexelsPhoto {
    id: u64,
    src: PexelsPhotoSrc,
}

#[derive(Deserialize)]
struct PexelsPhotoSrc {
    #[serde(default)]
    original: String,
    #[serde(default)]
    large: String,
}

pub struct PexelsClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl PexelsClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.pexels_api_key())
    }

    /// Fetch up to 20 plant photos as seed posts, shuffled, with rotating
    /// captions and spread-out timestamps
    pub async fn fetch_plant_posts(&self) -> Result<Vec<CommunityPost>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(PlantCareError::Config("Pexels API Key not configured.".into()));
        };

        let response = self
            .http
            .get(PEXELS_API_URL)
            .header("Authorization", api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PlantCareError::ApiCall(format!(
                "Failed to fetch from Pexels: {}",
                response.status()
            )));
        }

        let payload: PexelsSearchResponse = response.json().await?;
        Ok(seed_posts_from_photos(payload.photos))
    }
}

fn seed_posts_from_photos(mut photos: Vec<PexelsPhoto>) -> Vec<CommunityPost> {
    let mut rng = rand::thread_rng();
    photos.shuffle(&mut rng);

    let now = chrono::Utc::now().timestamp_millis();
    photos
        .into_iter()
        .take(MAX_COMMUNITY_POSTS)
        .enumerate()
        .map(|(idx, photo)| {
            let image_url = if photo.src.large.is_empty() {
                photo.src.original
            } else {
                photo.src.large
            };
            CommunityPost {
                id: format!("pexels-{}", photo.id),
                image_url,
                caption: DEFAULT_CAPTIONS[idx % DEFAULT_CAPTIONS.len()].to_string(),
                // randomized age so the seeded feed does not look minted at once
                timestamp: now - rng.gen_range(0..1_000_000_000),
            }
        })
        .collect()
}
