//! YouTube adapter using the Data API v3.
//!
//! Reads the concurrent-viewer count of a live video from the `videos`
//! endpoint with `part=liveStreamingDetails`. Requires an API key; Google
//! rejects unauthenticated Data API requests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use streamwatch_adapters::youtube::YouTubeAdapter;
//! use streamwatch_adapters::ViewCountSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = YouTubeAdapter::builder()
//!         .api_key("AIza...")
//!         .video_id("dQw4w9WgXcQ")
//!         .build()?;
//!
//!     let viewers = adapter.view_count().await?;
//!     println!("{} watching", viewers);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{AdapterError, ViewCountSource};

const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3";

/// YouTube adapter for reading live viewer counts.
#[derive(Debug, Clone)]
pub struct YouTubeAdapter {
    client: Client,
    endpoint: String,
    api_key: String,
    video_id: String,
}

impl YouTubeAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> YouTubeAdapterBuilder {
        YouTubeAdapterBuilder::default()
    }

    /// The video id this adapter is bound to.
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    async fn fetch_video_list(&self) -> Result<VideoListResponse, AdapterError> {
        let url = format!("{}/videos", self.endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "liveStreamingDetails"),
                ("id", self.video_id.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AdapterError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ViewCountSource for YouTubeAdapter {
    async fn view_count(&self) -> Result<u64, AdapterError> {
        let response = self.fetch_video_list().await?;
        decode_video_list(&response)
    }
}

/// Extract the concurrent-viewer count from a video-list response.
///
/// The lookup was by a single id, so anything other than exactly one item
/// means the video is gone or the id is wrong.
fn decode_video_list(response: &VideoListResponse) -> Result<u64, AdapterError> {
    if response.items.len() != 1 {
        return Err(AdapterError::Upstream(format!(
            "YouTube returned {} videos",
            response.items.len()
        )));
    }

    let video = &response.items[0];
    let details = video
        .live_streaming_details
        .as_ref()
        .ok_or_else(|| AdapterError::Upstream("video has no live streaming details".to_string()))?;

    // The API renders the count as a decimal string; absent when not live
    let viewers = details
        .concurrent_viewers
        .as_deref()
        .ok_or_else(|| AdapterError::Upstream("video reports no concurrent viewers".to_string()))?;

    viewers
        .parse::<u64>()
        .map_err(|e| AdapterError::Parse(format!("concurrentViewers {:?}: {}", viewers, e)))
}

/// Builder for YouTubeAdapter.
#[derive(Debug, Default)]
pub struct YouTubeAdapterBuilder {
    endpoint: Option<String>,
    api_key: Option<String>,
    video_id: Option<String>,
    timeout: Option<Duration>,
}

impl YouTubeAdapterBuilder {
    /// Set the API endpoint. Defaults to the public Data API v3 base URL;
    /// override for tests or API proxies.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the API key (required).
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the live video id to watch (required).
    pub fn video_id(mut self, video_id: impl Into<String>) -> Self {
        self.video_id = Some(video_id.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the adapter.
    ///
    /// Fails if the API key or video id is missing or empty.
    pub fn build(self) -> Result<YouTubeAdapter, AdapterError> {
        let api_key = match self.api_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(AdapterError::Setup("API key not specified".to_string())),
        };

        let video_id = match self.video_id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(AdapterError::Setup("video id not specified".to_string())),
        };

        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdapterError::Setup(e.to_string()))?;

        Ok(YouTubeAdapter {
            client,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key,
            video_id,
        })
    }
}

/// Video list response from the Data API v3 `videos` endpoint.
#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Video {
    #[serde(rename = "liveStreamingDetails")]
    live_streaming_details: Option<LiveStreamingDetails>,
}

#[derive(Debug, Deserialize)]
struct LiveStreamingDetails {
    #[serde(rename = "concurrentViewers")]
    concurrent_viewers: Option<String>,
}
