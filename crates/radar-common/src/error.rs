//! Error types for the radar plotter.

use thiserror::Error;

/// Result type alias using RadarError.
pub type RadarResult<T> = Result<T, RadarError>;

/// Primary error type for every plotting operation.
#[derive(Debug, Error)]
pub enum RadarError {
    /// Malformed timestamp segment in a scan filename.
    #[error("Malformed scan filename '{input}': {message}")]
    Parse { input: String, message: String },

    /// Variable tag that is not in the label/color-scale catalog.
    #[error("Unknown radar variable: {0}")]
    UnknownVariable(String),

    /// Requested field absent from the opened volume.
    #[error("Field '{field}' not present in {source_name}")]
    MissingField { field: String, source_name: String },

    /// Volume file unreadable or corrupt.
    #[error("Failed to read radar volume: {0}")]
    DataSource(String),

    /// Drawing or saving the figure failed.
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Invalid or unreadable configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl RadarError {
    pub fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        RadarError::Parse {
            input: input.into(),
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>, source_name: impl Into<String>) -> Self {
        RadarError::MissingField {
            field: field.into(),
            source_name: source_name.into(),
        }
    }

    /// Stable name of the error kind, used in run reports and log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            RadarError::Parse { .. } => "ParseError",
            RadarError::UnknownVariable(_) => "UnknownVariableError",
            RadarError::MissingField { .. } => "MissingFieldError",
            RadarError::DataSource(_) => "DataSourceError",
            RadarError::Render(_) => "RenderError",
            RadarError::Config(_) => "ConfigError",
        }
    }
}
