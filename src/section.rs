//! Time ranges and section extraction
//!
//! A range bound is either a number of seconds from the activity start or a
//! clock-style string. Clock strings are positional: three colon-separated
//! fields are `HH:MM:SS`, two are `MM:SS`, anything else must be a plain
//! number of seconds.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dataset::ActivityDataset;
use crate::error::{AnalyzerError, Result};
use crate::models::Sample;

/// One end of a requested time range, relative to the activity start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeBound {
    Seconds(f64),
    Clock(String),
}

impl TimeBound {
    /// Offset from the activity start in seconds
    pub fn offset_seconds(&self) -> Result<f64> {
        let seconds = match self {
            TimeBound::Seconds(value) => *value,
            TimeBound::Clock(text) => parse_clock(text)?,
        };

        if !seconds.is_finite() {
            return Err(self.invalid());
        }
        Ok(seconds)
    }

    /// Absolute instant of this bound for an activity starting at `start_time`
    pub fn resolve(&self, start_time: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let seconds = self.offset_seconds()?;
        let micros = (seconds * 1_000_000.0).round();
        if micros.abs() >= i64::MAX as f64 {
            return Err(self.invalid());
        }

        start_time
            .checked_add_signed(Duration::microseconds(micros as i64))
            .ok_or_else(|| self.invalid())
    }

    fn invalid(&self) -> AnalyzerError {
        AnalyzerError::InvalidTimeFormat {
            input: self.to_string(),
        }
    }
}

impl fmt::Display for TimeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBound::Seconds(value) => write!(f, "{}", value),
            TimeBound::Clock(text) => write!(f, "{}", text),
        }
    }
}

impl From<f64> for TimeBound {
    fn from(value: f64) -> Self {
        TimeBound::Seconds(value)
    }
}

impl From<u32> for TimeBound {
    fn from(value: u32) -> Self {
        TimeBound::Seconds(f64::from(value))
    }
}

impl From<&str> for TimeBound {
    fn from(value: &str) -> Self {
        TimeBound::Clock(value.to_string())
    }
}

impl From<String> for TimeBound {
    fn from(value: String) -> Self {
        TimeBound::Clock(value)
    }
}

impl std::str::FromStr for TimeBound {
    type Err = AnalyzerError;

    /// Validates eagerly so the CLI rejects bad input before loading files
    fn from_str(s: &str) -> Result<Self> {
        let bound = TimeBound::Clock(s.to_string());
        bound.offset_seconds()?;
        Ok(bound)
    }
}

/// Parse `HH:MM:SS`, `MM:SS` or a plain number into seconds
pub fn parse_clock(text: &str) -> Result<f64> {
    let invalid = || AnalyzerError::InvalidTimeFormat {
        input: text.to_string(),
    };
    let field = |part: &str| part.trim().parse::<f64>().map_err(|_| invalid());

    let parts: Vec<&str> = text.split(':').collect();
    match parts.as_slice() {
        [hours, minutes, seconds] => {
            Ok(field(hours)? * 3600.0 + field(minutes)? * 60.0 + field(seconds)?)
        }
        [minutes, seconds] => Ok(field(minutes)? * 60.0 + field(seconds)?),
        _ => field(text),
    }
}

/// Requested window as a pair of bounds; not required to be ordered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: TimeBound,
    pub end: TimeBound,
}

impl TimeRange {
    pub fn new(start: impl Into<TimeBound>, end: impl Into<TimeBound>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Start and end offsets in seconds from the activity start
    pub fn offsets(&self) -> Result<(f64, f64)> {
        Ok((self.start.offset_seconds()?, self.end.offset_seconds()?))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Samples of a dataset within an inclusive time window
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    samples: &'a [Sample],
}

impl<'a> Section<'a> {
    pub fn samples(&self) -> &'a [Sample] {
        self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'a, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl<'a> IntoIterator for Section<'a> {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Select the samples whose timestamps fall in `[start, end]`
///
/// An inverted range selects nothing and reports the same error as a range
/// outside the recording.
pub fn extract<'a>(
    dataset: &'a ActivityDataset,
    start: &TimeBound,
    end: &TimeBound,
) -> Result<Section<'a>> {
    let start_dt = start.resolve(dataset.start_time())?;
    let end_dt = end.resolve(dataset.start_time())?;

    let samples = dataset.all_samples();
    let first = samples.partition_point(|sample| sample.timestamp < start_dt);
    let last = samples.partition_point(|sample| sample.timestamp <= end_dt);

    if first >= last {
        return Err(AnalyzerError::EmptySection {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    Ok(Section {
        samples: &samples[first..last],
    })
}

/// Convenience wrapper over [`extract`] for a [`TimeRange`]
pub fn extract_range<'a>(dataset: &'a ActivityDataset, range: &TimeRange) -> Result<Section<'a>> {
    extract(dataset, &range.start, &range.end)
}
