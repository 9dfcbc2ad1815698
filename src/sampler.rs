//! Sampler - one polling cycle across every registered source.
//!
//! Each cycle fans out to all sources concurrently, waits for every query to
//! finish, and folds the successes into a single [`Sample`]. Source failures
//! are isolated: one stream's broken API never prevents the others from being
//! recorded, and never aborts the cycle.

use chrono::Utc;
use futures_util::future::join_all;
use tracing::warn;

use streamwatch_types::Sample;

use crate::registry::SourceRegistry;

/// Run one polling cycle and produce the aggregated sample.
///
/// The sample's timestamp is captured once, at cycle start, so every count in
/// it shares one logical instant regardless of how long individual queries
/// take. Failed sources are logged and omitted from the sample; they are
/// never zero-filled or carried forward.
///
/// All queries are awaited before this returns - a cycle never completes
/// with calls still in flight.
pub async fn take_sample(registry: &SourceRegistry) -> Sample {
    let mut sample = Sample::new(Utc::now());

    let queries = registry
        .iter()
        .map(|(name, source)| async move { (name, source.view_count().await) });

    for (name, result) in join_all(queries).await {
        match result {
            Ok(count) => sample.record(name.clone(), count),
            Err(e) => warn!(stream = %name, error = %e, "viewer count query failed"),
        }
    }

    sample
}
