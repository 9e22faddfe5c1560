//! Unified error hierarchy for hrcompare
//!
//! Every failure of the analysis pipeline is one variant of [`AnalyzerError`].
//! None of them are retried; they propagate unchanged to the presentation
//! layer, which turns them into a message and an exit status.

use thiserror::Error;

/// Top-level error type for all hrcompare operations
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// File extension does not map to a registered decoder
    #[error("Unsupported file type: {extension}")]
    UnsupportedFormat { extension: String },

    /// File decoded but yielded no usable records
    #[error("No data found in the file: {reason}")]
    Format { reason: String },

    /// Format-specific decoding failure
    #[error("Failed to decode {format} file: {reason}")]
    Decode { format: &'static str, reason: String },

    /// Dataset constructed from zero samples
    #[error("Activity contains no samples")]
    EmptyDataset,

    /// Range bound is not HH:MM:SS, MM:SS or a plain number of seconds
    #[error("Invalid time format: {input}. Use HH:MM:SS, MM:SS or seconds.")]
    InvalidTimeFormat { input: String },

    /// Resolved window contains no samples
    #[error("No data found in the specified time range: {start} to {end}")]
    EmptySection { start: String, end: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization errors
    #[error("Export error: {0}")]
    Export(String),

    /// Chart rendering errors
    #[error("Chart rendering failed: {0}")]
    Chart(String),
}

/// Result type alias for hrcompare operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

impl AnalyzerError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AnalyzerError::InvalidTimeFormat { .. } => ErrorSeverity::Warning,
            AnalyzerError::EmptySection { .. } => ErrorSeverity::Warning,
            AnalyzerError::Chart(_) => ErrorSeverity::Warning,
            AnalyzerError::Io(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            AnalyzerError::UnsupportedFormat { extension } => {
                format!(
                    "Unsupported file type '{}'. Please use .fit or .gpx files.",
                    extension
                )
            }
            AnalyzerError::EmptySection { start, end } => {
                format!(
                    "No samples between {} and {}. Check that the range lies within the activity and that the end is after the start.",
                    start, end
                )
            }
            AnalyzerError::EmptyDataset => {
                "The activity contains no samples to analyze.".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Process exit status for the command-line front end
    pub fn exit_code(&self) -> u8 {
        match self {
            AnalyzerError::InvalidTimeFormat { .. } => 2,
            AnalyzerError::UnsupportedFormat { .. }
            | AnalyzerError::Format { .. }
            | AnalyzerError::Decode { .. } => 3,
            AnalyzerError::EmptyDataset | AnalyzerError::EmptySection { .. } => 4,
            AnalyzerError::Io(_) | AnalyzerError::Export(_) | AnalyzerError::Chart(_) => 1,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Failure outside the user's control
    Critical,
    /// Error that prevents the analysis
    Error,
    /// Input problem the user can correct
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
