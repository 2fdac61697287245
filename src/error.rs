//! Error type for document loading and extraction.

use std::io;
use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures while loading a document or extracting page content.
///
/// Only byte-source retrieval and PDF decoding can fail. The heuristic
/// resume parsers are total functions; unmatched input yields empty
/// collections or default scalars, never an error.
#[derive(Error, Debug)]
pub enum Error {
    /// The byte source could not be retrieved.
    #[error("byte source unavailable: {0}")]
    Unavailable(#[from] io::Error),

    /// The bytes do not start with a PDF header.
    #[error("not a PDF: header magic missing")]
    UnknownFormat,

    /// The header's version marker is malformed.
    #[error("malformed PDF version marker: {0:?}")]
    UnsupportedVersion(String),

    /// The PDF structure could not be decoded.
    #[error("unreadable PDF: {0}")]
    Unreadable(String),

    /// The document is encrypted; there is no password path.
    #[error("document is encrypted")]
    Encrypted,

    /// Page number outside `[1, num_pages]`.
    #[error("page {page} out of range, document has {pages} pages")]
    PageOutOfRange { page: u32, pages: u32 },

    /// A page's text content could not be recovered.
    #[error("text extraction failed: {0}")]
    TextExtract(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Unavailable(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            other => Error::Unreadable(other.to_string()),
        }
    }
}
