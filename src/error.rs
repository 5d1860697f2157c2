//! Error types for unccda library.

use std::io;
use thiserror::Error;

/// Result type alias for unccda operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during CCDA processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not well-formed XML, or does not use the CCDA namespaces.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The uploaded file name does not look like an XML document.
    #[error("Not an XML file: {0}")]
    NotXml(String),

    /// No section carries the requested title.
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// Too many sections carry no data; the document was rejected.
    #[error("Insufficient data: {empty} empty sections (threshold {threshold})")]
    InsufficientData {
        /// Number of sections without data
        empty: usize,
        /// Rejection threshold in effect
        threshold: usize,
    },

    /// A required demographics field is missing.
    #[error("Demographics incomplete: missing {0}")]
    DemographicsIncomplete(String),

    /// The document store has no active document yet.
    #[error("No uploaded document found")]
    NoActiveDocument,

    /// The summarization collaborator failed.
    #[error("Summarization error: {0}")]
    Summarize(String),

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether callers should treat this error as "no data" rather than a failure.
    pub fn is_absence(&self) -> bool {
        matches!(self, Error::SectionNotFound(_))
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::MalformedDocument(err.to_string())
    }
}
