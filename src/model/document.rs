//! Document-level types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document metadata from the PDF Info dictionary.
///
/// Extraction is best-effort: a document with a missing or corrupt Info
/// dictionary yields an empty record, never a load failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Check whether no field was populated.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
            && self.creator.is_none()
            && self.producer.is_none()
            && self.created.is_none()
            && self.modified.is_none()
    }
}

/// Summary of a loaded document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Document metadata
    pub metadata: Metadata,

    /// Total number of pages
    pub num_pages: u32,

    /// Stable content fingerprint (hex md5 of the source bytes)
    pub fingerprint: String,
}

impl DocumentInfo {
    /// Resolve a display title, falling back to the given filename when the
    /// metadata carries none.
    pub fn title_or(&self, fallback: &str) -> String {
        self.metadata
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// A node of the document's native outline (bookmarks), as produced by the
/// decoding backend. Destinations are resolved to 1-based page numbers
/// where possible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Node title
    pub title: String,

    /// Target page number (1-indexed), if the destination resolved
    pub page: Option<u32>,

    /// Child nodes
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a new outline node.
    pub fn new(title: impl Into<String>, page: Option<u32>) -> Self {
        Self {
            title: title.into(),
            page,
            children: Vec::new(),
        }
    }
}

/// A table-of-contents entry, either from the native outline or inferred
/// from layout heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Stable identifier (`toc-{n}` for outline entries,
    /// `heading-{page}-{fragment}` for heuristic ones)
    pub id: String,

    /// Entry title
    pub title: String,

    /// Nesting level (1 = top)
    pub level: u8,

    /// Target page number (1-indexed)
    pub page: u32,

    /// Font size of the source fragment, for heuristically inferred entries
    pub font_size: Option<f32>,
}

/// A discovered document file, as supplied by the upstream document list.
///
/// The pipeline consumes only `path` (byte-source reference) and `filename`
/// (fallback title); the remaining fields pass through to presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFile {
    /// File name including extension
    pub filename: String,

    /// URL-safe identifier derived from the file name
    pub slug: String,

    /// Byte-source reference (path or URL)
    pub path: String,

    /// File size in bytes
    pub size: u64,

    /// Last modification time
    pub last_modified: DateTime<Utc>,
}
