use std::path::PathBuf;
use thiserror::Error;

/// Result type for file-level operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised around the core: discovery, file I/O and reporting.
///
/// Scanning and classification never fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Only Ruby files are supported: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("No such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("unknown report format: {0}. Use text or json")]
    UnknownFormat(String),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
