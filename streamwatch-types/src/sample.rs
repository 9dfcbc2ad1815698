//! Sample - one timestamped set of per-stream viewer counts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point-in-time record of viewer counts across all polled streams.
///
/// One sample is produced per polling cycle. The `view_counts` map holds an
/// entry for every stream whose upstream query succeeded in that cycle;
/// streams that failed are simply absent. There is no zero-filling and no
/// carry-forward of stale values, so a missing key means "unknown this
/// cycle", never "zero viewers".
///
/// Samples are immutable once recorded into a [`crate::Series`].
///
/// # Wire format
///
/// Serialized as `{"timestamp": "<RFC 3339>", "viewCounts": {"name": count}}`,
/// matching the historical files written by earlier deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// When this polling cycle started.
    pub timestamp: DateTime<Utc>,

    /// Viewer count per stream name, successes only.
    #[serde(rename = "viewCounts")]
    pub view_counts: BTreeMap<String, u64>,
}

impl Sample {
    /// Create an empty sample for the given cycle timestamp.
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            view_counts: BTreeMap::new(),
        }
    }

    /// Record a successful viewer-count reading for a stream.
    pub fn record(&mut self, stream: impl Into<String>, count: u64) {
        self.view_counts.insert(stream.into(), count);
    }

    /// Get the recorded count for a stream, if its query succeeded.
    pub fn get(&self, stream: &str) -> Option<u64> {
        self.view_counts.get(stream).copied()
    }

    /// Number of streams that reported a count in this cycle.
    pub fn len(&self) -> usize {
        self.view_counts.len()
    }

    /// Check whether every stream failed this cycle.
    pub fn is_empty(&self) -> bool {
        self.view_counts.is_empty()
    }

    /// Iterate over `(stream, count)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, u64)> {
        self.view_counts.iter().map(|(name, count)| (name, *count))
    }
}
