//! Comparison of two sections of one activity

use crate::dataset::ActivityDataset;
use crate::error::Result;
use crate::metrics;
use crate::models::{
    Averages, ComparisonResult, HeartRateComparison, PaceHeartRateRatio, SectionSummary,
};
use crate::section::{extract_range, Section, TimeRange};

/// Compare `range2` against `range1`
///
/// Section 1 is extracted first, so its error wins when both ranges are
/// empty. The overall averages run over section 1 followed by section 2;
/// samples in overlapping ranges count once per section.
pub fn compare(
    dataset: &ActivityDataset,
    range1: &TimeRange,
    range2: &TimeRange,
) -> Result<ComparisonResult> {
    let section1 = extract_range(dataset, range1)?;
    let section2 = extract_range(dataset, range2)?;

    let avg1 = metrics::averages(section1);
    let avg2 = metrics::averages(section2);
    let overall = metrics::averages(section1.iter().chain(section2.iter()));

    Ok(ComparisonResult {
        section1: summarize(range1, &section1, &avg1),
        section2: summarize(range2, &section2, &avg2),
        overall,
        heart_rate: heart_rate_change(&avg1, &avg2),
        pace_heart_rate_ratio: pace_heart_rate_ratio(&avg1, &avg2),
    })
}

fn summarize(range: &TimeRange, section: &Section<'_>, averages: &Averages) -> SectionSummary {
    SectionSummary {
        time_range: range.to_string(),
        sample_count: section.len(),
        average_hr: averages.average_hr,
        average_pace: averages.average_pace,
    }
}

/// Absolute and relative heart rate change between two sections
pub fn heart_rate_change(first: &Averages, second: &Averages) -> HeartRateComparison {
    let (hr1, hr2) = match (first.average_hr, second.average_hr) {
        (Some(hr1), Some(hr2)) => (hr1, hr2),
        _ => return HeartRateComparison::default(),
    };

    let difference = hr2 - hr1;
    HeartRateComparison {
        difference: Some(difference),
        percent_difference: percent_of(difference, hr1),
    }
}

/// Pace per heart beat of both sections
///
/// Requires a non-zero pace and heart rate on both sides.
pub fn pace_heart_rate_ratio(first: &Averages, second: &Averages) -> Option<PaceHeartRateRatio> {
    let ratio1 = ratio(first)?;
    let ratio2 = ratio(second)?;

    Some(PaceHeartRateRatio {
        section1: ratio1,
        section2: ratio2,
        percent_difference: percent_of(ratio2 - ratio1, ratio1),
    })
}

fn ratio(averages: &Averages) -> Option<f64> {
    let pace = averages.average_pace.filter(|pace| *pace != 0.0)?;
    let hr = averages.average_hr.filter(|hr| *hr != 0.0)?;
    Some(pace / hr)
}

fn percent_of(delta: f64, base: f64) -> Option<f64> {
    (base != 0.0).then(|| delta / base * 100.0)
}
