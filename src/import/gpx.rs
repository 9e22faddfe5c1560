//! GPX decoder
//!
//! Reads track points with their `<time>`, the heart rate carried in the
//! Garmin TrackPointExtension (`gpxtpx:hr`, or `heartrate` from some
//! exporters) and speed from a GPX 1.0 `<speed>` element or an extension of
//! the same name. Namespace prefixes are ignored.

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{AnalyzerError, Result};
use crate::import::Decoder;
use crate::models::RawRecord;

const FORMAT_NAME: &str = "GPX";

/// GPX importer for GPS track recordings
pub struct GpxDecoder;

impl GpxDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GpxDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for GpxDecoder {
    fn extensions(&self) -> &'static [&'static str] {
        &["gpx"]
    }

    fn decode(&self, file_path: &Path) -> Result<Vec<RawRecord>> {
        let file = File::open(file_path)?;
        parse_gpx(BufReader::new(file))
    }

    fn format_name(&self) -> &'static str {
        FORMAT_NAME
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PointField {
    Time,
    HeartRate,
    Speed,
}

impl PointField {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"time" => Some(PointField::Time),
            b"hr" | b"heartrate" => Some(PointField::HeartRate),
            b"speed" => Some(PointField::Speed),
            _ => None,
        }
    }
}

/// Parse GPX content into one record per track point
pub fn parse_gpx<R: BufRead>(source: R) -> Result<Vec<RawRecord>> {
    let mut reader = Reader::from_reader(source);
    reader.trim_text(true);

    let mut records = Vec::new();
    let mut point: Option<RawRecord> = None;
    let mut field: Option<PointField> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.local_name();
                if name.as_ref() == b"trkpt" {
                    point = Some(RawRecord::default());
                    field = None;
                } else if point.is_some() {
                    field = PointField::from_local_name(name.as_ref());
                }
            }
            Ok(Event::Empty(ref e)) => {
                // <trkpt lat=".." lon=".."/> carries nothing we read
                if e.local_name().as_ref() == b"trkpt" {
                    records.push(RawRecord::default());
                }
            }
            Ok(Event::Text(ref e)) => {
                if let (Some(current), Some(kind)) = (point.as_mut(), field) {
                    let text = e.unescape().map_err(decode_error)?;
                    apply_field(current, kind, text.trim())?;
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"trkpt" {
                    if let Some(finished) = point.take() {
                        records.push(finished);
                    }
                }
                field = None;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(decode_error(e)),
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(points = records.len(), "Parsed GPX track points");
    Ok(records)
}

fn apply_field(record: &mut RawRecord, field: PointField, text: &str) -> Result<()> {
    match field {
        PointField::Time => record.timestamp = Some(parse_timestamp(text)?),
        PointField::HeartRate => record.heart_rate = parse_number(text, "heart rate"),
        PointField::Speed => record.speed = parse_number(text, "speed"),
    }
    Ok(())
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Some exporters omit the zone designator; GPX times are UTC
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| AnalyzerError::Decode {
            format: FORMAT_NAME,
            reason: format!("invalid track point time '{}'", text),
        })
}

fn parse_number(text: &str, what: &str) -> Option<f64> {
    match text.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!(value = text, "Ignoring unparsable {}", what);
            None
        }
    }
}

fn decode_error(err: quick_xml::Error) -> AnalyzerError {
    AnalyzerError::Decode {
        format: FORMAT_NAME,
        reason: err.to_string(),
    }
}
