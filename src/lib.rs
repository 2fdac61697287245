//! # cvlens
//!
//! PDF resume ingestion library for Rust.
//!
//! cvlens loads a PDF, extracts positioned text page by page, infers a
//! table of contents, builds a full-text search index, and heuristically
//! structures resume prose into typed records (contact, skills,
//! experience, education, and more).
//!
//! ## Quick Start
//!
//! ```no_run
//! use cvlens::DocumentSession;
//!
//! fn main() -> cvlens::Result<()> {
//!     // Load and process a document
//!     let session = DocumentSession::open("resume.pdf")?;
//!
//!     // Query the derived state
//!     println!("{} pages", session.info().num_pages);
//!     for entry in session.toc() {
//!         println!("p{} {}", entry.page, entry.title);
//!     }
//!     for hit in session.search("kubernetes") {
//!         println!("p{}: {}", hit.page, hit.context);
//!     }
//!
//!     // Structured resume for the landing page
//!     let resume = session.parse_resume();
//!     println!("{}", resume.contact.name);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Lazy page extraction**: per-page text with positions and font
//!   sizes, memoized per document
//! - **TOC inference**: native outline first, font-size heuristics as the
//!   fallback
//! - **Full-text search**: chunked inverted index with stable ranking
//! - **Resume structuring**: section segmentation plus independent,
//!   total field parsers
//! - **Override merging**: shallow-merge a user-supplied record over the
//!   parsed resume

pub mod detect;
pub mod error;
pub mod index;
pub mod model;
pub mod reader;
pub mod resume;
pub mod session;
pub mod toc;

// Re-export commonly used types
pub use detect::{is_pdf, is_pdf_bytes, sniff_bytes, sniff_file, PdfVersion};
pub use error::{Error, Result};
pub use index::{IndexChunk, SearchIndex, SearchResult};
pub use model::{
    Certification, Contact, ContactOverride, DocumentFile, DocumentInfo, Education, Experience,
    Metadata, OutlineNode, PageHandle, PageInfo, ParsedResume, Project, ResumeOverride, Skill,
    SkillCategory, SkillLevel, TextFragment, TocEntry,
};
pub use reader::{LopdfBackend, PdfBackend, PdfDocument};
pub use resume::{parse_resume, parse_resume_document, Section};
pub use session::{DocumentSession, LoadEvent};
pub use toc::generate_toc;

use std::path::Path;

/// Load a PDF file and return a document handle.
///
/// # Example
///
/// ```no_run
/// use cvlens::load_file;
///
/// let doc = load_file("resume.pdf").unwrap();
/// println!("Pages: {}", doc.num_pages());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<PdfDocument> {
    PdfDocument::open(path)
}

/// Load a PDF from an in-memory byte buffer.
pub fn load_bytes(data: &[u8]) -> Result<PdfDocument> {
    PdfDocument::from_bytes(data)
}

/// Extract the full text of a PDF file.
///
/// # Example
///
/// ```no_run
/// use cvlens::extract_text;
///
/// let text = extract_text("resume.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut doc = PdfDocument::open(path)?;
    Ok(doc.extract_all_text())
}

/// Load a PDF file and parse it as a resume.
pub fn parse_resume_file<P: AsRef<Path>>(path: P) -> Result<ParsedResume> {
    let mut doc = PdfDocument::open(path)?;
    Ok(resume::parse_resume_document(&mut doc))
}
