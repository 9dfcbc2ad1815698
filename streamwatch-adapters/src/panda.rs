//! Panda TV adapter using the public room-info API.
//!
//! Reads the viewer count of a room from `api_room`, which reports the
//! current audience as `data.roominfo.person_num`. No credentials are
//! required.
//!
//! ## Example
//!
//! ```rust,no_run
//! use streamwatch_adapters::panda::PandaAdapter;
//! use streamwatch_adapters::ViewCountSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = PandaAdapter::builder().room_id(10300).build()?;
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

const DEFAULT_ENDPOINT: &str = "http://www.panda.tv";

/// Panda TV adapter for reading room viewer counts.
#[derive(Debug, Clone)]
pub struct PandaAdapter {
    client: Client,
    endpoint: String,
    room_id: u64,
}

impl PandaAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> PandaAdapterBuilder {
        PandaAdapterBuilder::default()
    }

    /// The room id this adapter is bound to.
    pub fn room_id(&self) -> u64 {
        self.room_id
    }

    async fn fetch_room(&self) -> Result<RoomResponse, AdapterError> {
        let url = format!("{}/api_room", self.endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[("roomid", self.room_id.to_string())])
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
impl ViewCountSource for PandaAdapter {
    async fn view_count(&self) -> Result<u64, AdapterError> {
        let response = self.fetch_room().await?;
        decode_room(&response)
    }
}

/// Extract the viewer count from a room-info response.
fn decode_room(response: &RoomResponse) -> Result<u64, AdapterError> {
    if response.errno != 0 {
        return Err(AdapterError::Upstream(format!(
            "errno {}: {}",
            response.errno, response.errmsg
        )));
    }

    // person_num is a decimal string on the wire
    let person_num = &response.data.roominfo.person_num;
    person_num
        .parse::<u64>()
        .map_err(|e| AdapterError::Parse(format!("person_num {:?}: {}", person_num, e)))
}

/// Builder for PandaAdapter.
#[derive(Debug, Default)]
pub struct PandaAdapterBuilder {
    endpoint: Option<String>,
    room_id: Option<u64>,
    timeout: Option<Duration>,
}

impl PandaAdapterBuilder {
    /// Set the API endpoint. Defaults to the public site; override for tests.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the room id to watch (required).
    pub fn room_id(mut self, room_id: u64) -> Self {
        self.room_id = Some(room_id);
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the adapter.
    ///
    /// Fails if the room id is missing.
    pub fn build(self) -> Result<PandaAdapter, AdapterError> {
        let room_id = self
            .room_id
            .ok_or_else(|| AdapterError::Setup("room id not specified".to_string()))?;

        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdapterError::Setup(e.to_string()))?;

        Ok(PandaAdapter {
            client,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            room_id,
        })
    }
}

/// Room information from the Panda TV API.
#[derive(Debug, Deserialize)]
struct RoomResponse {
    #[serde(default)]
    errno: i64,
    #[serde(default)]
    errmsg: String,
    #[serde(default)]
    data: RoomData,
}

#[derive(Debug, Default, Deserialize)]
struct RoomData {
    #[serde(default)]
    roominfo: RoomInfo,
}

#[derive(Debug, Default, Deserialize)]
struct RoomInfo {
    #[serde(default)]
    person_num: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let adapter = PandaAdapter::builder().room_id(10300).build().unwrap();
        assert_eq!(adapter.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(adapter.room_id(), 10300);
    }

    #[test]
    fn test_builder_custom_endpoint() {
        let adapter = PandaAdapter::builder()
            .endpoint("http://localhost:9999")
            .room_id(1)
            .build()
            .unwrap();

        assert_eq!(adapter.endpoint, "http://localhost:9999");
    }

    #[test]
    fn builder_requires_room_id() {
        let err = PandaAdapter::builder().build().unwrap_err();
        assert!(matches!(err, AdapterError::Setup(_)));
    }

    #[test]
    fn test_decode_room() {
        let response: RoomResponse = serde_json::from_str(
            r#"{
                "errno": 0,
                "errmsg": "",
                "data": {"roominfo": {"person_num": "48213"}}
            }"#,
        )
        .unwrap();

        assert_eq!(decode_room(&response).unwrap(), 48213);
    }

    #[test]
    fn decode_rejects_api_error() {
        let response: RoomResponse = serde_json::from_str(
            r#"{"errno": 4001, "errmsg": "room not found", "data": {}}"#,
        )
        .unwrap();

        let err = decode_room(&response).unwrap_err();
        assert!(err.to_string().contains("room not found"));
    }

    #[test]
    fn decode_rejects_unparseable_person_num() {
        let response: RoomResponse = serde_json::from_str(
            r#"{"errno": 0, "errmsg": "", "data": {"roominfo": {"person_num": "many"}}}"#,
        )
        .unwrap();

        let err = decode_room(&response).unwrap_err();
        assert!(matches!(err, AdapterError::Parse(_)));
    }

    #[test]
    fn decode_rejects_missing_roominfo() {
        // Empty person_num (missing roominfo defaults) does not parse as a count
        let response: RoomResponse =
            serde_json::from_str(r#"{"errno": 0, "errmsg": "", "data": {}}"#).unwrap();

        assert!(decode_room(&response).is_err());
    }
}
