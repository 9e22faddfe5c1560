use std::io::Write;

use crate::error::{AnalyzerError, Result};

/// Serialize any report structure as pretty JSON, missing values as `null`
pub fn write_json<T, W>(data: &T, writer: &mut W) -> Result<()>
where
    T: serde::Serialize,
    W: Write,
{
    serde_json::to_writer_pretty(&mut *writer, data)
        .map_err(|e| AnalyzerError::Export(e.to_string()))?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Averages, ComparisonResult, HeartRateComparison, SectionSummary,
    };

    fn summary(range: &str, hr: Option<f64>) -> SectionSummary {
        SectionSummary {
            time_range: range.to_string(),
            sample_count: 6,
            average_hr: hr,
            average_pace: None,
        }
    }

    #[test]
    fn test_comparison_json_fields() {
        let result = ComparisonResult {
            section1: summary("0 to 5", Some(150.0)),
            section2: summary("10 to 15", None),
            overall: Averages::default(),
            heart_rate: HeartRateComparison::default(),
            pace_heart_rate_ratio: None,
        };

        let mut out = Vec::new();
        write_json(&result, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["section1"]["time_range"], "0 to 5");
        assert_eq!(value["section1"]["average_hr"], 150.0);
        assert!(value["section2"]["average_hr"].is_null());
        assert!(value["heart_rate"]["difference"].is_null());
        assert!(value["pace_heart_rate_ratio"].is_null());
    }
}
