//! Loaded-document handle with per-page extraction cache.

use std::collections::HashMap;
use std::path::Path;

use md5::{Digest, Md5};

use crate::detect;
use crate::error::Result;
use crate::model::{DocumentInfo, Metadata, OutlineNode, PageHandle, PageInfo};
use crate::reader::backend::{LopdfBackend, PdfBackend};

/// A loaded PDF document.
///
/// Owns the decoding backend and a per-page cache of extracted text. One
/// handle serves one pipeline instance at a time; all derived state is
/// discarded on [`close`](Self::close).
///
/// # Example
///
/// ```no_run
/// use cvlens::PdfDocument;
///
/// fn main() -> cvlens::Result<()> {
///     let mut doc = PdfDocument::open("resume.pdf")?;
///     println!("{} pages", doc.num_pages());
///
///     let text = doc.extract_all_text_with_progress(|pct| {
///         eprintln!("{:.0}%", pct);
///     });
///     println!("{}", text);
///     Ok(())
/// }
/// ```
pub struct PdfDocument {
    backend: Option<Box<dyn PdfBackend>>,
    info: DocumentInfo,
    pages: HashMap<u32, PageInfo>,
}

impl PdfDocument {
    /// Open a PDF file from a path.
    ///
    /// Fails with `Error::Unavailable` when the file cannot be read and
    /// `Error::UnknownFormat` when it is not a PDF.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Load a PDF from an in-memory byte buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect::sniff_bytes(data)?;

        let backend = LopdfBackend::load_bytes(data)?;
        let fingerprint = fingerprint_bytes(data);
        Ok(Self::from_backend(Box::new(backend), fingerprint))
    }

    /// Build a document over an arbitrary backend.
    pub(crate) fn from_backend(backend: Box<dyn PdfBackend>, fingerprint: String) -> Self {
        let info = DocumentInfo {
            metadata: backend.metadata(),
            num_pages: backend.page_count(),
            fingerprint,
        };
        Self {
            backend: Some(backend),
            info,
            pages: HashMap::new(),
        }
    }

    /// Document summary: metadata, page count, fingerprint.
    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    /// Document metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.info.metadata
    }

    /// Stable content fingerprint.
    pub fn fingerprint(&self) -> &str {
        &self.info.fingerprint
    }

    /// Number of pages, or 0 after the document was closed.
    pub fn num_pages(&self) -> u32 {
        if self.backend.is_some() {
            self.info.num_pages
        } else {
            0
        }
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.backend.is_none()
    }

    /// The document's native outline, or empty when absent.
    pub fn outline(&self) -> Vec<OutlineNode> {
        match &self.backend {
            Some(backend) => backend.outline(),
            None => Vec::new(),
        }
    }

    /// Get a handle to a page.
    ///
    /// Returns `None` for page numbers outside `[1, num_pages]` and for a
    /// closed document; never fails.
    pub fn get_page(&self, page: u32) -> Option<PageHandle> {
        let backend = self.backend.as_ref()?;
        if page < 1 || page > self.info.num_pages {
            return None;
        }
        let (width, height) = backend.page_size(page)?;
        Some(PageHandle {
            number: page,
            width,
            height,
        })
    }

    /// Extract positioned text for a page, memoized.
    ///
    /// The first call per page walks the content stream; subsequent calls
    /// return the cached [`PageInfo`] unchanged. Out-of-range pages yield
    /// `None`. A page whose extraction fails locally also yields `None`
    /// and is skipped by aggregate passes.
    pub fn extract_page_text(&mut self, page: u32) -> Option<&PageInfo> {
        if self.pages.contains_key(&page) {
            return self.pages.get(&page);
        }

        let backend = self.backend.as_ref()?;
        if page < 1 || page > self.info.num_pages {
            return None;
        }

        let (width, height) = backend.page_size(page)?;
        let fragments = match backend.page_fragments(page) {
            Ok(fragments) => fragments,
            Err(e) => {
                eprintln!("DEBUG failed to extract text from page {}: {}", page, e);
                return None;
            }
        };

        let text = flatten_fragments(&fragments);
        let info = PageInfo {
            number: page,
            width,
            height,
            text,
            fragments,
        };

        self.pages.insert(page, info);
        self.pages.get(&page)
    }

    /// Extract the full document text, joining page texts with a blank
    /// line. Pages that fail extraction are skipped.
    pub fn extract_all_text(&mut self) -> String {
        self.extract_all_text_with_progress(|_| {})
    }

    /// Extract the full document text, invoking `progress` with a
    /// percentage (0–100] after each page. The callback fires exactly
    /// `num_pages` times with non-decreasing values ending at 100.
    pub fn extract_all_text_with_progress<F>(&mut self, mut progress: F) -> String
    where
        F: FnMut(f32),
    {
        let num_pages = self.num_pages();
        let mut parts: Vec<String> = Vec::new();

        for page in 1..=num_pages {
            if let Some(info) = self.extract_page_text(page) {
                parts.push(info.text.clone());
            }
            progress(page as f32 / num_pages as f32 * 100.0);
        }

        parts.join("\n\n")
    }

    /// All cached pages in page order. Complete after a full extraction
    /// pass; partial otherwise.
    pub fn cached_pages(&self) -> Vec<&PageInfo> {
        let mut pages: Vec<&PageInfo> = self.pages.values().collect();
        pages.sort_by_key(|p| p.number);
        pages
    }

    /// Release the decoding backend and all cached page state.
    ///
    /// Idempotent: calling it again (or never) is safe. Afterwards every
    /// page lookup returns `None` and `num_pages` reports 0.
    pub fn close(&mut self) {
        self.backend = None;
        self.pages.clear();
    }
}

/// Join fragment texts in content-stream order, collapse whitespace runs
/// to single spaces, and trim the ends.
fn flatten_fragments(fragments: &[crate::model::TextFragment]) -> String {
    let joined = fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Hex md5 digest of the source bytes.
fn fingerprint_bytes(data: &[u8]) -> String {
    let digest = Md5::digest(data);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
