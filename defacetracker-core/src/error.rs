use defacetracker_scanner::ScanError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Invalid domain format: {0}")]
    InvalidDomain(String),

    #[error("--domain and --tld cannot be used together")]
    ConflictingTarget,

    #[error("Page count must be between 1 and {max}, got {count}")]
    InvalidPageCount { count: u8, max: u8 },

    #[error("Invalid origin URL: {0}")]
    InvalidOrigin(String),

    #[error("Unsupported file format '{0}'. Use 'csv' or 'json'")]
    UnsupportedFormat(String),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write data to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TrackerError>;
