//! In-memory activity dataset
//!
//! Owns the normalized samples of one recording for the lifetime of an
//! analysis. Read-only once constructed.

use chrono::{DateTime, Utc};

use crate::error::{AnalyzerError, Result};
use crate::models::Sample;

/// Ordered samples of a single activity, anchored at the first sample
#[derive(Debug, Clone)]
pub struct ActivityDataset {
    samples: Vec<Sample>,
    start_time: DateTime<Utc>,
}

impl ActivityDataset {
    /// Build a dataset from samples in non-decreasing timestamp order
    pub fn new(samples: Vec<Sample>) -> Result<Self> {
        let start_time = samples
            .first()
            .map(|sample| sample.timestamp)
            .ok_or(AnalyzerError::EmptyDataset)?;

        // Section extraction slices by binary search
        if let Some(pair) = samples
            .windows(2)
            .find(|pair| pair[1].timestamp < pair[0].timestamp)
        {
            return Err(AnalyzerError::Format {
                reason: format!(
                    "samples out of chronological order at {}",
                    pair[1].timestamp.to_rfc3339()
                ),
            });
        }

        Ok(Self {
            samples,
            start_time,
        })
    }

    /// Timestamp of the first sample
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Timestamp of the last sample
    pub fn end_time(&self) -> DateTime<Utc> {
        self.samples
            .last()
            .map(|sample| sample.timestamp)
            .unwrap_or(self.start_time)
    }

    /// Seconds between the activity start and the given sample
    pub fn relative_seconds(&self, sample: &Sample) -> f64 {
        seconds_between(self.start_time, sample.timestamp)
    }

    /// Seconds covered by the recording
    pub fn duration_seconds(&self) -> f64 {
        seconds_between(self.start_time, self.end_time())
    }

    pub fn all_samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    }
}
