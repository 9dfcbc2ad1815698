//! Series store - the in-memory series plus its durable copy on disk.
//!
//! The store owns the process-wide series behind a [`RwLock`]. The scheduler
//! is the only writer; HTTP request handlers read concurrently through
//! [`SeriesStore::snapshot`]. Every append rewrites the whole historical file
//! (the series is small - one record per polling interval), replacing it
//! atomically so no reader of the file ever sees a half-written document.

use std::io;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use thiserror::Error;
use tracing::info;

use streamwatch_types::{Sample, Series};

/// Errors from loading or persisting the historical series.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Historical file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Historical file exists but is not a valid series document.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The series could not be serialized.
    #[error("failed to encode series: {0}")]
    Encode(#[source] serde_json::Error),

    /// The historical file could not be written or replaced.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Owns the append-only series and keeps the historical file in sync with it.
#[derive(Debug)]
pub struct SeriesStore {
    path: PathBuf,
    series: RwLock<Series>,
}

impl SeriesStore {
    /// Load the store from the historical file.
    ///
    /// A missing file means no history has been recorded yet and yields an
    /// empty series. A file that exists but cannot be read or parsed is an
    /// error - silently discarding recorded history would be worse than
    /// refusing to start.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let series = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no historical file, starting empty");
                Series::new()
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.clone(),
                    source,
                })
            }
        };

        Ok(Self {
            path,
            series: RwLock::new(series),
        })
    }

    /// Append a sample and persist the full series.
    ///
    /// The in-memory append always takes effect, even when persistence fails;
    /// the sample stays queued in memory and the next successful append
    /// flushes the whole accumulated series. Callers log the error and keep
    /// going - a full disk should cost at most the samples recorded while it
    /// stays full, not the process.
    pub async fn append(&self, sample: Sample) -> Result<(), StoreError> {
        self.series.write().push(sample);
        self.persist().await
    }

    /// A consistent copy of the current series.
    ///
    /// Taken in one read-locked step, so it is never a torn view of an
    /// in-progress append: callers see the series strictly before or strictly
    /// after any concurrent write.
    pub fn snapshot(&self) -> Series {
        self.series.read().clone()
    }

    /// Serialize a snapshot of the series for the HTTP surface.
    pub fn to_json(&self) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(&self.snapshot()).map_err(StoreError::Encode)
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.series.read().len()
    }

    /// Check whether any samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.series.read().is_empty()
    }

    /// Path of the historical file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full series to the historical file.
    ///
    /// Serialization works from a snapshot, not under the lock, so disk I/O
    /// never blocks concurrent readers. The document lands in a temporary
    /// sibling first and is renamed over the target, which keeps the replace
    /// atomic for anything reading the file directly.
    async fn persist(&self) -> Result<(), StoreError> {
        let snapshot = self.snapshot();
        let json = serde_json::to_string_pretty(&snapshot).map_err(StoreError::Encode)?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| StoreError::Write {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })
    }
}
