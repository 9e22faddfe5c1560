//! Full-activity series for previews and charts

use serde::{Deserialize, Serialize};

use crate::dataset::ActivityDataset;
use crate::metrics::MPS_TO_KMH;

/// Heart rate and speed against seconds from the activity start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewData {
    pub timestamps: Vec<f64>,

    /// Gaps stay `None` so charts can break the line
    pub heart_rate: Vec<Option<f64>>,

    /// km/h; missing readings plotted as 0
    pub speed: Vec<f64>,

    pub total_time: f64,

    pub time_unit: String,
}

impl PreviewData {
    pub fn from_dataset(dataset: &ActivityDataset) -> Self {
        let samples = dataset.all_samples();
        let timestamps: Vec<f64> = samples
            .iter()
            .map(|sample| dataset.relative_seconds(sample))
            .collect();

        Self {
            total_time: timestamps.last().copied().unwrap_or(0.0),
            heart_rate: samples.iter().map(|sample| sample.heart_rate).collect(),
            speed: samples
                .iter()
                .map(|sample| sample.speed.map_or(0.0, |speed| speed * MPS_TO_KMH))
                .collect(),
            timestamps,
            time_unit: "seconds".to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Highest plotted heart rate, if any
    pub fn max_heart_rate(&self) -> Option<f64> {
        self.heart_rate.iter().flatten().copied().reduce(f64::max)
    }

    /// Highest plotted speed in km/h
    pub fn max_speed(&self) -> f64 {
        self.speed.iter().copied().fold(0.0, f64::max)
    }
}
