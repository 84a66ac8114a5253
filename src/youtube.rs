//! YouTube video search
//!
//! Care-video lookup via the YouTube Data API. Best effort like the rest of
//! the supplementary content: a missing key or a failed request yields an
//! empty list, never an error.

use crate::config::Config;
use serde::Deserialize;

const YOUTUBE_SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// One video search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoResult {
    pub title: String,
    pub thumbnail_url: String,
    pub video_id: String,
}

impl VideoResult {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Deserialize, Default)]
struct ItemId {
    #[serde(rename = "videoId", default)]
    video_id: String,
}

#[derive(Deserialize, Default)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Deserialize, Default)]
struct Thumbnails {
    medium: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    #[serde(default)]
    url: String,
}

pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl YouTubeClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.youtube_api_key())
    }

    /// Search videos for a query; empty list without a key or on any failure
    pub async fn search_videos(&self, query: &str, max_results: u32) -> Vec<VideoResult> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Vec::new();
        };

        let response = self
            .http
            .get(YOUTUBE_SEARCH_URL)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query),
                ("maxResults", &max_results.to_string()),
                ("key", api_key),
            ])
            .send()
            .await;

        let Ok(response) = response else {
            return Vec::new();
        };
        if !response.status().is_success() {
            return Vec::new();
        }

        match response.json::<SearchResponse>().await {
            Ok(payload) => videos_from_response(payload),
            Err(_) => Vec::new(),
        }
    }
}

fn videos_from_response(response: SearchResponse) -> Vec<VideoResult> {
    response
        .items
        .into_iter()
        .filter(|item| !item.id.video_id.is_empty())
        .map(|item| VideoResult {
            title: item.snippet.title,
            thumbnail_url: item
                .snippet
                .thumbnails
                .medium
                .map(|t| t.url)
                .unwrap_or_default(),
            video_id: item.id.video_id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_videos_from_response_maps_fields() {
        let payload: SearchResponse = serde_json::from_str(
            r#"{
                "items": [{
                    "id": {"videoId": "abc123"},
                    "snippet": {
                        "title": "Tomato care basics",
                        "thumbnails": {"medium": {"url": "https://i.ytimg.com/vi/abc123/mqdefault.jpg"}}
                    }
                }]
            }"#,
        )
        .unwrap();

        let videos = videos_from_response(payload);
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].title, "Tomato care basics");
        assert_eq!(
            videos[0].thumbnail_url,
            "https://i.ytimg.com/vi/abc123/mqdefault.jpg"
        );
        assert_eq!(videos[0].watch_url(), "https://www.youtube.com/watch?v=abc123");
    }

    #[test]
    fn test_videos_from_response_skips_items_without_video_id() {
        // channel/playlist hits carry a different id shape
        let payload: SearchResponse = serde_json::from_str(
            r#"{"items": [{"id": {"channelId": "xyz"}, "snippet": {"title": "A channel"}}]}"#,
        )
        .unwrap();

        assert!(videos_from_response(payload).is_empty());
    }

    #[test]
    fn test_videos_from_empty_response() {
        let payload: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(videos_from_response(payload).is_empty());
    }

    #[tokio::test]
    async fn test_search_without_key_returns_empty() {
        let client = YouTubeClient::new(None);
        let videos = client.search_videos("tomato blight", 2).await;
        assert!(videos.is_empty());
    }
}
