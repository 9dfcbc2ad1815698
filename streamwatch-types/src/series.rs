//! Series - the full ordered history of samples.

use serde::{Deserialize, Serialize};

use crate::Sample;

/// The ordered, append-only history of polling samples.
///
/// Samples appear strictly in the order they were appended. Timestamps are
/// expected to be non-decreasing under normal operation, but nothing here
/// assumes it: clock skew never causes reordering or deduplication.
///
/// The only way the series changes is [`Series::push`]; existing samples are
/// never mutated or removed.
///
/// # Wire format
///
/// Serialized transparently as a JSON array of samples, which is exactly the
/// historical-file format and the `/data` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample to the end of the series.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Number of samples recorded.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check whether any samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The most recently appended sample.
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Iterate over samples in append order.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// View the samples as a slice, in append order.
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }
}

impl From<Vec<Sample>> for Series {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
