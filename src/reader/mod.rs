//! Document loading and page text extraction.

mod backend;
mod document;

pub use backend::{decode_plain_text, LopdfBackend, PdfBackend};
pub use document::PdfDocument;
