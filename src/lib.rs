// Library interface for hrcompare modules
// The binary and the integration tests both go through this crate

pub mod chart;
pub mod compare;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod preview;
pub mod section;

// Re-export commonly used types for convenience
pub use models::*;
pub use compare::compare;
pub use config::AppConfig;
pub use dataset::ActivityDataset;
pub use error::{AnalyzerError, ErrorSeverity, Result};
pub use export::{PreviewFormat, ReportFormat};
pub use import::{Decoder, DecoderRegistry};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use preview::PreviewData;
pub use section::{extract, extract_range, parse_clock, Section, TimeBound, TimeRange};
