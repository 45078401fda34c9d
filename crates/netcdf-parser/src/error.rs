//! Error types for NetCDF reading.

use radar_common::RadarError;
use thiserror::Error;

/// Result type for NetCDF reader operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF reading.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The library refused to open the file
    #[error("Failed to open {path}: {message}")]
    Open { path: String, message: String },

    /// Missing required coordinate variable or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Requested field is not in the file
    #[error("Field '{field}' not found in {path}")]
    FieldNotFound { field: String, path: String },
}

impl From<NetCdfError> for RadarError {
    fn from(err: NetCdfError) -> Self {
        match err {
            NetCdfError::FieldNotFound { field, path } => RadarError::missing_field(field, path),
            other => RadarError::DataSource(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_not_found_maps_to_missing_field() {
        let err: RadarError = NetCdfError::FieldNotFound {
            field: "VELV".to_string(),
            path: "a.nc".to_string(),
        }
        .into();
        assert_eq!(err.kind(), "MissingFieldError");
    }

    #[test]
    fn test_other_errors_map_to_data_source() {
        let err: RadarError = NetCdfError::MissingData("range variable".to_string()).into();
        assert_eq!(err.kind(), "DataSourceError");
        assert!(err.to_string().contains("range variable"));
    }
}
