use std::path::Path;

use crate::dataset::ActivityDataset;
use crate::error::{AnalyzerError, Result};
use crate::models::{RawRecord, Sample};

pub mod fit;
pub mod gpx;

/// Trait for decoding activity recordings of one file format
pub trait Decoder {
    /// Lowercase file extensions handled by this decoder, without the dot
    fn extensions(&self) -> &'static [&'static str];

    /// Decode every record of the file
    fn decode(&self, file_path: &Path) -> Result<Vec<RawRecord>>;

    /// Get the format name for this decoder
    fn format_name(&self) -> &'static str;

    /// Check if this decoder can handle the given file
    fn can_decode(&self, file_path: &Path) -> bool {
        extension_of(file_path)
            .map(|ext| self.extensions().contains(&ext.as_str()))
            .unwrap_or(false)
    }
}

/// Registry dispatching files to decoders by extension
pub struct DecoderRegistry {
    decoders: Vec<Box<dyn Decoder>>,
}

impl DecoderRegistry {
    /// Create a registry with the FIT and GPX decoders
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(fit::FitDecoder::new()));
        registry.register(Box::new(gpx::GpxDecoder::new()));
        registry
    }

    /// Create a registry without any decoder
    pub fn empty() -> Self {
        Self {
            decoders: Vec::new(),
        }
    }

    /// Add a decoder; earlier registrations win on shared extensions
    pub fn register(&mut self, decoder: Box<dyn Decoder>) {
        self.decoders.push(decoder);
    }

    /// Find the decoder for a file
    pub fn decoder_for(&self, file_path: &Path) -> Result<&dyn Decoder> {
        self.decoders
            .iter()
            .find(|decoder| decoder.can_decode(file_path))
            .map(|decoder| &**decoder)
            .ok_or_else(|| AnalyzerError::UnsupportedFormat {
                extension: extension_of(file_path)
                    .map(|ext| format!(".{}", ext))
                    .unwrap_or_default(),
            })
    }

    /// Decode and normalize a recording into ordered samples
    pub fn load_samples(&self, file_path: &Path) -> Result<Vec<Sample>> {
        let decoder = self.decoder_for(file_path)?;
        tracing::debug!(
            file = %file_path.display(),
            format = decoder.format_name(),
            "Decoding activity"
        );

        let records = decoder.decode(file_path)?;
        let samples = normalize(records)?;

        tracing::info!(
            file = %file_path.display(),
            format = decoder.format_name(),
            samples = samples.len(),
            "Activity loaded"
        );
        Ok(samples)
    }

    /// Load a recording as an activity dataset
    pub fn load_dataset(&self, file_path: &Path) -> Result<ActivityDataset> {
        ActivityDataset::new(self.load_samples(file_path)?)
    }

    /// Names of all registered formats
    pub fn format_names(&self) -> Vec<&'static str> {
        self.decoders.iter().map(|d| d.format_name()).collect()
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn decoded records into samples ordered by timestamp
///
/// Records without a timestamp cannot be placed on the timeline and are
/// dropped. The sort is stable so duplicate timestamps keep file order.
pub fn normalize(records: Vec<RawRecord>) -> Result<Vec<Sample>> {
    if records.is_empty() {
        return Err(AnalyzerError::Format {
            reason: "recording contains no records".to_string(),
        });
    }

    let total = records.len();
    let mut samples: Vec<Sample> = records
        .into_iter()
        .filter_map(|record| {
            record
                .timestamp
                .map(|timestamp| Sample::new(timestamp, record.heart_rate, record.speed))
        })
        .collect();

    if samples.is_empty() {
        return Err(AnalyzerError::Format {
            reason: "no record carries a timestamp".to_string(),
        });
    }
    if samples.len() < total {
        tracing::debug!(dropped = total - samples.len(), "Skipped records without timestamp");
    }

    samples.sort_by_key(|sample| sample.timestamp);
    Ok(samples)
}

fn extension_of(file_path: &Path) -> Option<String> {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
