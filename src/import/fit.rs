use chrono::Utc;
use fitparser::profile::MesgNum;
use fitparser::{FitDataRecord, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{AnalyzerError, Result};
use crate::import::Decoder;
use crate::models::RawRecord;

/// FIT file decoder for Garmin native activity recordings
pub struct FitDecoder;

impl FitDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FitDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FitDecoder {
    fn extensions(&self) -> &'static [&'static str] {
        &["fit"]
    }

    fn decode(&self, file_path: &Path) -> Result<Vec<RawRecord>> {
        let file = File::open(file_path)?;
        let mut reader = BufReader::new(file);

        let messages: Vec<FitDataRecord> =
            fitparser::from_reader(&mut reader).map_err(|e| AnalyzerError::Decode {
                format: self.format_name(),
                reason: e.to_string(),
            })?;

        let records = records_from_messages(&messages);

        tracing::debug!(
            messages = messages.len(),
            records = records.len(),
            "Parsed FIT messages"
        );
        Ok(records)
    }

    fn format_name(&self) -> &'static str {
        "FIT"
    }
}

/// Keep only `record` messages; laps, sessions and device info carry no samples
fn records_from_messages(messages: &[FitDataRecord]) -> Vec<RawRecord> {
    messages
        .iter()
        .filter(|message| message.kind() == MesgNum::Record)
        .map(record_from_message)
        .collect()
}

/// Pull timestamp, heart rate and speed out of a `record` message
fn record_from_message(message: &FitDataRecord) -> RawRecord {
    let mut record = RawRecord::default();
    let mut enhanced_speed = None;

    for field in message.fields() {
        match field.name() {
            "timestamp" => {
                if let Value::Timestamp(t) = field.value() {
                    record.timestamp = Some(t.with_timezone(&Utc));
                }
            }
            "heart_rate" => record.heart_rate = value_to_f64(field.value()),
            "speed" => record.speed = value_to_f64(field.value()),
            "enhanced_speed" => enhanced_speed = value_to_f64(field.value()),
            _ => {}
        }
    }

    if record.speed.is_none() {
        record.speed = enhanced_speed;
    }
    record
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Float32(v) => Some(*v as f64),
        Value::Float64(v) => Some(*v),
        Value::SInt8(v) => Some(*v as f64),
        Value::SInt16(v) => Some(*v as f64),
        Value::SInt32(v) => Some(*v as f64),
        Value::SInt64(v) => Some(*v as f64),
        Value::UInt8(v) => Some(*v as f64),
        Value::UInt16(v) => Some(*v as f64),
        Value::UInt32(v) => Some(*v as f64),
        Value::UInt64(v) => Some(*v as f64),
        _ => None,
    }
}
