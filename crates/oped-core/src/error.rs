//! Error types for oped operations.

use std::path::Path;

use thiserror::Error;

/// Result type alias for oped operations.
pub type OpedResult<T> = Result<T, OpedError>;

/// Main error type for all oped operations.
///
/// Only `Config`, `NoDocuments` and `OutputWrite` are allowed to end a run.
/// Everything else is recovered at the page or document level: an unreadable
/// document is skipped, a failed page extraction degrades to empty text, and
/// a failed remote classification falls back to the keyword matcher.
#[derive(Error, Debug)]
pub enum OpedError {
    /// Configuration error (missing credential, bad settings).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The input directory contains no PDF documents.
    #[error("No PDF documents found under {}", .dir.display())]
    NoDocuments { dir: std::path::PathBuf },

    /// A document could not be opened or parsed.
    #[error("Cannot open document {}: {message}", .path.display())]
    DocumentOpen {
        path: std::path::PathBuf,
        message: String,
    },

    /// A single page could not be read or copied.
    #[error("Page {page} could not be processed: {message}")]
    PageExtraction { page: usize, message: String },

    /// Transport-level failure talking to the remote classifier.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The remote classifier answered, but the payload was unusable.
    #[error("Unparseable classifier response: {message}")]
    ResponseParse { message: String },

    /// The consolidated output could not be written.
    #[error("Cannot write output {}: {message}", .path.display())]
    OutputWrite {
        path: std::path::PathBuf,
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OpedError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a document open error.
    pub fn document_open(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::DocumentOpen {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a page extraction error.
    pub fn page_extraction(page: usize, message: impl Into<String>) -> Self {
        Self::PageExtraction {
            page,
            message: message.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a response parse error.
    pub fn response_parse(message: impl Into<String>) -> Self {
        Self::ResponseParse {
            message: message.into(),
        }
    }

    /// Create an output write error.
    pub fn output_write(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::OutputWrite {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Whether this error is a transport failure eligible for retry.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
