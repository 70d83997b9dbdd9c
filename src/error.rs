//! Error types for the brand-cards pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for brand-cards operations
pub type Result<T> = std::result::Result<T, CardGenError>;

/// Error types for card generation, split into fatal startup errors and
/// recoverable per-record errors (see [`CardGenError::is_recoverable`]).
#[derive(Error, Debug)]
pub enum CardGenError {
    /// Input spreadsheet could not be read or parsed
    #[error("Failed to read spreadsheet: {message}")]
    Spreadsheet {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Required spreadsheet columns are absent
    #[error("Spreadsheet is missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// Output directory could not be created
    #[error("Cannot use output path {}: {source}", path.display())]
    InvalidOutputPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {source}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },

    /// A single logo source failed (moves the fallback chain forward)
    #[error("Request to {url} failed: {message}")]
    SourceUnavailable {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Retrieved bytes were not a decodable image
    #[error("Failed to decode image: {message}")]
    DecodeFailure {
        message: String,
        #[source]
        source: Option<image::ImageError>,
    },

    /// Every logo source for a record was exhausted without success
    #[error("No logo source succeeded for brand '{brand}'")]
    NoSourceAvailable { brand: String },

    /// Compositing failed (e.g. zero-size logo)
    #[error("Card rendering failed: {reason}")]
    Render { reason: String },

    /// Finished card could not be written to disk
    #[error("Failed to write card {}: {source}", path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Archive bundling failed
    #[error("Failed to build archive: {message}")]
    Archive {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CardGenError {
    /// Create a spreadsheet error with context
    pub fn spreadsheet<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Spreadsheet {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error with context
    pub fn decode(message: impl Into<String>, source: image::ImageError) -> Self {
        Self::DecodeFailure {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create an archive error with context
    pub fn archive<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Archive {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check whether this error is recovered at the record level.
    ///
    /// Recoverable errors skip the current record and let the run continue;
    /// everything else aborts the whole run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CardGenError::SourceUnavailable { .. }
                | CardGenError::DecodeFailure { .. }
                | CardGenError::NoSourceAvailable { .. }
                | CardGenError::Render { .. }
                | CardGenError::ImageWrite { .. }
        )
    }
}
