// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # streamwatch
//!
//! A poller and library for tracking live-stream viewer counts over time.
//!
//! streamwatch periodically queries every configured stream's platform API,
//! folds the results into one timestamped sample, appends it to an
//! append-only series persisted as a flat JSON file, and serves the history
//! over HTTP together with a chart page.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                          Application                           │
//! │  ┌───────────┐    ┌─────────┐    ┌─────────┐    ┌─────────┐    │
//! │  │ scheduler │───▶│ sampler │───▶│  store  │◀───│ server  │    │
//! │  │  (ticks)  │    │ (cycle) │    │ (series)│    │ (HTTP)  │    │
//! │  └───────────┘    └────┬────┘    └────┬────┘    └─────────┘    │
//! │                        │              │                        │
//! │                        ▼              ▼                        │
//! │                  ┌──────────┐   historical file                │
//! │                  │ registry │◀── YouTubeAdapter | PandaAdapter │
//! │                  │ (config) │                                  │
//! │                  └──────────┘                                  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`config`]**: the stream-name -> provider-id configuration file
//! - **[`registry`]**: fixed name -> adapter bindings built once at startup
//! - **[`sampler`]**: one polling cycle - concurrent fan-out over all
//!   adapters, failures isolated per source
//! - **[`store`]**: the append-only series, its lock discipline, and the
//!   atomically-replaced historical file
//! - **[`scheduler`]**: the background tick loop (fixed interval,
//!   single-flight, immediate bootstrap cycle when history is empty)
//! - **[`server`]**: the `/data` API and embedded chart page
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the streams in scrobbler.config.json every 20 seconds
//! streamwatch --youtube-api-key AIza...
//!
//! # Custom files and cadence
//! streamwatch --config streams.json --history history.json --interval 60
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use streamwatch::registry::SourceRegistry;
//! use streamwatch::scheduler::Scheduler;
//! use streamwatch::store::SeriesStore;
//!
//! # tokio_test::block_on(async {
//! let mut registry = SourceRegistry::new();
//! // registry.insert("my-stream", some_adapter);
//!
//! let store = Arc::new(SeriesStore::load("history.json").unwrap());
//! let handle = Scheduler::new(registry, store.clone(), Duration::from_secs(20)).start();
//! # });
//! ```

pub mod config;
pub mod registry;
pub mod sampler;
pub mod scheduler;
pub mod server;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use registry::SourceRegistry;
pub use scheduler::{Scheduler, SchedulerHandle};
pub use store::{SeriesStore, StoreError};
pub use streamwatch_types::{Sample, Series};
