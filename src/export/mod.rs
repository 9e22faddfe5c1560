//! Report writers for comparison results and preview series

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{AnalyzerError, Result};
use crate::models::ComparisonResult;
use crate::preview::PreviewData;

pub mod csv;
pub mod json;
pub mod text;

/// Output format of a comparison report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(AnalyzerError::Export(format!("unsupported report format: {}", s))),
        }
    }
}

/// Output format of the preview series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewFormat {
    Json,
    Csv,
}

impl std::str::FromStr for PreviewFormat {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(PreviewFormat::Json),
            "csv" => Ok(PreviewFormat::Csv),
            _ => Err(AnalyzerError::Export(format!("unsupported preview format: {}", s))),
        }
    }
}

/// Write a comparison report in the given format
pub fn write_report<W: Write>(
    result: &ComparisonResult,
    format: ReportFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        ReportFormat::Text => text::write_comparison(result, writer),
        ReportFormat::Json => json::write_json(result, writer),
    }
}

/// Write the preview series in the given format
pub fn write_preview<W: Write>(
    preview: &PreviewData,
    format: PreviewFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        PreviewFormat::Json => json::write_json(preview, writer),
        PreviewFormat::Csv => csv::write_preview_csv(preview, writer),
    }
}

/// Create `path` and hand a buffered writer to `write`
pub fn write_to_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer)?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), "Report written");
    Ok(())
}
