//! Heart rate and pace averages
//!
//! Missing readings are skipped, never treated as zero. A recorded speed of
//! zero is a real reading and counts towards the mean.

use crate::models::{Averages, Sample};

/// Converts a speed in m/s into a pace in min/km
pub const PACE_FACTOR: f64 = 16.6667;

/// Multiplier from m/s to km/h
pub const MPS_TO_KMH: f64 = 3.6;

/// Averages of any sample collection, including chained sections
pub fn averages<'a, I>(samples: I) -> Averages
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut hr = RunningMean::default();
    let mut speed = RunningMean::default();

    for sample in samples {
        if let Some(value) = sample.heart_rate {
            hr.push(value);
        }
        if let Some(value) = sample.speed {
            speed.push(value);
        }
    }

    let average_speed = speed.mean();
    Averages {
        average_hr: hr.mean(),
        average_speed,
        average_pace: average_speed.and_then(pace_from_speed),
    }
}

/// Pace in min/km for a speed in m/s; `None` unless the speed is positive
pub fn pace_from_speed(speed: f64) -> Option<f64> {
    if speed > 0.0 {
        Some(PACE_FACTOR / speed)
    } else {
        None
    }
}

#[derive(Debug, Default)]
struct RunningMean {
    sum: f64,
    count: usize,
}

impl RunningMean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn samples(values: &[(Option<f64>, Option<f64>)]) -> Vec<Sample> {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 6, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, (hr, speed))| Sample::new(start + Duration::seconds(i as i64), *hr, *speed))
            .collect()
    }

    #[test]
    fn test_average_heart_rate_skips_missing() {
        let data = samples(&[(Some(140.0), None), (None, None), (Some(160.0), None)]);
        let avg = averages(&data);

        assert_eq!(avg.average_hr, Some(150.0));
        assert_eq!(avg.average_speed, None);
        assert_eq!(avg.average_pace, None);
    }

    #[test]
    fn test_no_heart_rate_is_none() {
        let data = samples(&[(None, Some(3.0)), (None, Some(3.0))]);
        assert_eq!(averages(&data).average_hr, None);
    }

    #[test]
    fn test_zero_speed_yields_no_pace() {
        let data = samples(&[(None, Some(0.0)), (None, Some(0.0)), (None, Some(0.0))]);
        let avg = averages(&data);

        assert_eq!(avg.average_speed, Some(0.0));
        assert_eq!(avg.average_pace, None);
    }

    #[test]
    fn test_pace_from_mean_speed() {
        let data = samples(&[(None, Some(2.0)), (None, Some(4.0))]);
        let avg = averages(&data);

        assert_eq!(avg.average_speed, Some(3.0));
        let pace = avg.average_pace.unwrap();
        assert!((pace - 5.5556).abs() < 1e-3);
    }

    #[test]
    fn test_zero_speed_counts_towards_mean() {
        let data = samples(&[(None, Some(0.0)), (None, Some(4.0)), (None, None)]);
        let avg = averages(&data);

        assert_eq!(avg.average_speed, Some(2.0));
        assert!((avg.average_pace.unwrap() - PACE_FACTOR / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_chained_collections() {
        let first = samples(&[(Some(100.0), Some(2.0))]);
        let second = samples(&[(Some(200.0), Some(4.0)), (Some(150.0), None)]);
        let avg = averages(first.iter().chain(second.iter()));

        assert_eq!(avg.average_hr, Some(150.0));
        assert_eq!(avg.average_speed, Some(3.0));
    }

    #[test]
    fn test_empty_collection() {
        let avg = averages(std::iter::empty::<&Sample>());
        assert_eq!(avg, Averages::default());
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_average_heart_rate_within_bounds(
            readings in proptest::collection::vec(proptest::option::of(40.0f64..220.0), 1..200)
        ) {
            let data = samples(
                &readings.iter().map(|hr| (*hr, None::<f64>)).collect::<Vec<_>>(),
            );
            let present: Vec<f64> = readings.iter().flatten().copied().collect();

            match averages(&data).average_hr {
                Some(avg) => {
                    let min = present.iter().copied().fold(f64::INFINITY, f64::min);
                    let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    prop_assert!(avg >= min - 1e-9 && avg <= max + 1e-9);
                }
                None => prop_assert!(present.is_empty()),
            }
        }
    }
}
