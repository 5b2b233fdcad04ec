//! Error types for the page rendering engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a document or submitting a form.
///
/// Rendering itself is total: once a `PageDocument` exists, every style,
/// animation and section resolves to something. Errors only arise at the
/// edges (ingestion and the submission sink).
#[derive(Error, Debug)]
pub enum Error {
    /// The page document could not be parsed into the typed model
    #[error("Invalid page document: {0}")]
    DocumentError(String),

    /// The submission sink rejected or failed to deliver the form values
    #[error("Submission failed: {0}")]
    SubmissionError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to read a document or write output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
