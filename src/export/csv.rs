use serde::Serialize;
use std::io::Write;

use crate::error::{AnalyzerError, Result};
use crate::preview::PreviewData;

#[derive(Serialize)]
struct PreviewRow {
    seconds: f64,
    heart_rate: Option<f64>,
    speed_kmh: f64,
}

/// One CSV row per sample; missing heart rate left empty
pub fn write_preview_csv<W: Write>(preview: &PreviewData, writer: &mut W) -> Result<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    for ((seconds, heart_rate), speed_kmh) in preview
        .timestamps
        .iter()
        .zip(&preview.heart_rate)
        .zip(&preview.speed)
    {
        csv_writer
            .serialize(PreviewRow {
                seconds: *seconds,
                heart_rate: *heart_rate,
                speed_kmh: *speed_kmh,
            })
            .map_err(|e| AnalyzerError::Export(e.to_string()))?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_csv_rows() {
        let preview = PreviewData {
            timestamps: vec![0.0, 1.5],
            heart_rate: vec![Some(120.0), None],
            speed: vec![10.8, 0.0],
            total_time: 1.5,
            time_unit: "seconds".to_string(),
        };

        let mut out = Vec::new();
        write_preview_csv(&preview, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "seconds,heart_rate,speed_kmh");
        assert_eq!(lines[1], "0.0,120.0,10.8");
        assert_eq!(lines[2], "1.5,,0.0");
    }
}
