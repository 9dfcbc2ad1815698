//! # streamwatch-types
//!
//! Core types for live-stream viewer-count tracking. This crate defines the
//! schema shared by the streamwatch poller, its storage layer, and anything
//! that consumes the exported history.
//!
//! ## Design Goals
//!
//! - **One record shape everywhere**: the same [`Sample`] is what the poller
//!   produces, what lands in the historical file, and what `/data` serves
//! - **Append-only history**: [`Series`] only ever grows; samples are never
//!   mutated, reordered, or deduplicated after being recorded
//! - **Stable wire format**: serialized field names (`timestamp`,
//!   `viewCounts`) match the historical files written by earlier deployments,
//!   so old data loads unchanged
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use streamwatch_types::{Sample, Series};
//!
//! let mut series = Series::new();
//!
//! let mut sample = Sample::new(Utc::now());
//! sample.record("main-stage", 1204);
//! sample.record("backstage", 87);
//! series.push(sample);
//!
//! assert_eq!(series.len(), 1);
//! assert_eq!(series.last().unwrap().get("main-stage"), Some(1204));
//! ```

mod sample;
mod series;

pub use sample::*;
pub use series::*;
