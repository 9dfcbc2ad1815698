//! # streamwatch-adapters
//!
//! Pre-built adapters for reading live viewer counts from popular streaming
//! platforms.
//!
//! Each adapter wraps one platform's public API behind the single
//! [`ViewCountSource`] capability: one upstream query per call, returning the
//! current concurrent-viewer count or an error. Adapters never retry
//! internally - a failed query is reported to the caller, which decides what
//! to do with it (streamwatch simply omits that stream from the cycle's
//! sample).
//!
//! ## Supported Platforms
//!
//! - **YouTube** - concurrent viewers of a live video via the Data API v3
//!   (requires an API key)
//! - **Panda TV** - room viewer counts via the public room-info API
//!
//! ## Quick Start (YouTube)
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
//!     println!("{} concurrent viewers", viewers);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod panda;
pub mod youtube;

pub use error::AdapterError;
pub use panda::PandaAdapter;
pub use youtube::YouTubeAdapter;

use async_trait::async_trait;

/// The capability every viewer-count source provides.
///
/// Implementations perform exactly one synchronous query against their
/// upstream system per call and return the current concurrent-viewer count.
/// On any failure (transport error, bad response shape, unparseable count)
/// they return an [`AdapterError`] and no count.
///
/// Retry policy belongs to the caller; implementations must not retry
/// internally. Implementations must also be safe to call concurrently with
/// other adapters - no shared mutable state between sources.
#[async_trait]
pub trait ViewCountSource: Send + Sync {
    /// Query the upstream platform for the current viewer count.
    async fn view_count(&self) -> Result<u64, AdapterError>;
}
