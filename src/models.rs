use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped sensor reading from an activity recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Absolute time of the reading
    pub timestamp: DateTime<Utc>,

    /// Heart rate in beats per minute
    pub heart_rate: Option<f64>,

    /// Speed in meters per second
    pub speed: Option<f64>,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, heart_rate: Option<f64>, speed: Option<f64>) -> Self {
        Self {
            timestamp,
            heart_rate,
            speed,
        }
    }
}

/// A decoder's output row, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub timestamp: Option<DateTime<Utc>>,
    pub heart_rate: Option<f64>,
    pub speed: Option<f64>,
}

/// Averages over a collection of samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    /// Mean heart rate in beats per minute
    pub average_hr: Option<f64>,

    /// Mean speed in meters per second
    pub average_speed: Option<f64>,

    /// Pace in minutes per kilometer
    pub average_pace: Option<f64>,
}

/// Per-section part of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    /// Requested range, echoed as given
    pub time_range: String,

    /// Number of samples inside the window
    pub sample_count: usize,

    pub average_hr: Option<f64>,

    pub average_pace: Option<f64>,
}

/// Heart rate change from section 1 to section 2
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartRateComparison {
    /// Section 2 minus section 1, in beats per minute
    pub difference: Option<f64>,

    /// Difference relative to section 1, in percent
    pub percent_difference: Option<f64>,
}

/// Pace-to-heart-rate ratio of both sections
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceHeartRateRatio {
    /// min/km per bpm
    pub section1: f64,
    pub section2: f64,
    pub percent_difference: Option<f64>,
}

/// Complete result of comparing two sections of one activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub section1: SectionSummary,
    pub section2: SectionSummary,

    /// Averages over both sections together
    pub overall: Averages,

    pub heart_rate: HeartRateComparison,

    /// Present only when both sections have pace and heart rate data
    pub pace_heart_rate_ratio: Option<PaceHeartRateRatio>,
}
