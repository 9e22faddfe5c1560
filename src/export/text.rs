use std::io::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::Result;
use crate::models::ComparisonResult;

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "Section")]
    name: &'static str,
    #[tabled(rename = "Time range")]
    time_range: String,
    #[tabled(rename = "Samples")]
    samples: String,
    #[tabled(rename = "Avg HR (bpm)")]
    average_hr: String,
    #[tabled(rename = "Avg pace (min/km)")]
    average_pace: String,
}

/// Render a comparison as a human-readable report
pub fn write_comparison<W: Write>(result: &ComparisonResult, writer: &mut W) -> Result<()> {
    writeln!(writer, "HEART RATE ANALYSIS")?;
    writeln!(writer)?;

    let rows = vec![
        SectionRow {
            name: "Section 1",
            time_range: result.section1.time_range.clone(),
            samples: result.section1.sample_count.to_string(),
            average_hr: fmt_opt(result.section1.average_hr, 1),
            average_pace: fmt_pace(result.section1.average_pace),
        },
        SectionRow {
            name: "Section 2",
            time_range: result.section2.time_range.clone(),
            samples: result.section2.sample_count.to_string(),
            average_hr: fmt_opt(result.section2.average_hr, 1),
            average_pace: fmt_pace(result.section2.average_pace),
        },
        SectionRow {
            name: "Overall",
            time_range: "-".to_string(),
            samples: (result.section1.sample_count + result.section2.sample_count).to_string(),
            average_hr: fmt_opt(result.overall.average_hr, 1),
            average_pace: fmt_pace(result.overall.average_pace),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    writeln!(writer, "{}", table)?;
    writeln!(writer)?;

    writeln!(writer, "Heart Rate Differences:")?;
    writeln!(
        writer,
        "  Absolute Difference: {} BPM",
        fmt_opt(result.heart_rate.difference, 1)
    )?;
    writeln!(
        writer,
        "  Percentage Difference: {}%",
        fmt_opt(result.heart_rate.percent_difference, 1)
    )?;

    if let Some(ratio) = &result.pace_heart_rate_ratio {
        writeln!(writer)?;
        writeln!(writer, "Pace-to-Heart Rate Ratio:")?;
        writeln!(writer, "  Section 1: {:.4} min/km/BPM", ratio.section1)?;
        writeln!(writer, "  Section 2: {:.4} min/km/BPM", ratio.section2)?;
        writeln!(
            writer,
            "  Percentage Difference: {}%",
            fmt_opt(ratio.percent_difference, 1)
        )?;
    }

    Ok(())
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{:.*}", decimals, v))
        .unwrap_or_else(|| "-".to_string())
}

/// `5.56 (5:33)`: decimal minutes plus clock notation
fn fmt_pace(pace: Option<f64>) -> String {
    match pace {
        Some(minutes) => {
            let total_seconds = (minutes * 60.0).round() as u64;
            format!(
                "{:.2} ({}:{:02})",
                minutes,
                total_seconds / 60,
                total_seconds % 60
            )
        }
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Averages, HeartRateComparison, PaceHeartRateRatio, SectionSummary,
    };

    fn result(ratio: Option<PaceHeartRateRatio>) -> ComparisonResult {
        ComparisonResult {
            section1: SectionSummary {
                time_range: "00:00 to 05:00".to_string(),
                sample_count: 301,
                average_hr: Some(142.04),
                average_pace: Some(5.5556),
            },
            section2: SectionSummary {
                time_range: "10:00 to 15:00".to_string(),
                sample_count: 301,
                average_hr: Some(151.0),
                average_pace: None,
            },
            overall: Averages {
                average_hr: Some(146.5),
                average_speed: Some(3.0),
                average_pace: Some(5.5556),
            },
            heart_rate: HeartRateComparison {
                difference: Some(8.96),
                percent_difference: Some(6.308),
            },
            pace_heart_rate_ratio: ratio,
        }
    }

    fn render(result: &ComparisonResult) -> String {
        let mut out = Vec::new();
        write_comparison(result, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_report_contents() {
        let text = render(&result(None));

        assert!(text.contains("00:00 to 05:00"));
        assert!(text.contains("142.0"));
        assert!(text.contains("5.56 (5:33)"));
        assert!(text.contains("Absolute Difference: 9.0 BPM"));
        assert!(text.contains("Percentage Difference: 6.3%"));
        assert!(!text.contains("Pace-to-Heart Rate Ratio"));
    }

    #[test]
    fn test_text_report_with_ratio() {
        let text = render(&result(Some(PaceHeartRateRatio {
            section1: 0.0391,
            section2: 0.0368,
            percent_difference: Some(-5.88),
        })));

        assert!(text.contains("Pace-to-Heart Rate Ratio:"));
        assert!(text.contains("Section 1: 0.0391 min/km/BPM"));
        assert!(text.contains("Percentage Difference: -5.9%"));
    }

    #[test]
    fn test_missing_values_rendered_as_dash() {
        assert_eq!(fmt_opt(None, 1), "-");
        assert_eq!(fmt_pace(None), "-");
        assert_eq!(fmt_pace(Some(4.0)), "4.00 (4:00)");
    }
}
