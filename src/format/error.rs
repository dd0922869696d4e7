//! Error types for export operations.

use thiserror::Error;

/// Errors that can occur while producing or reading an export.
///
/// Data problems inside a document (dangling labels, missing dimensions) are
/// never errors; they are reported as [`FormatWarning`](super::FormatWarning)s.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML serialization error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Archive packaging error
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The requested export format does not exist
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        /// The format id that was requested
        format: String,
    },

    /// Version mismatch between expected and found
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Expected version string
        expected: String,
        /// Found version string
        found: String,
    },

    /// Background export task panicked or was cancelled
    #[error("Export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl FormatError {
    /// Create an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }
}
