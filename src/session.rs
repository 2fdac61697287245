//! Document-viewing session: one loaded document plus everything derived
//! from it.
//!
//! A session drives the whole pipeline up front — load, full-text
//! extraction, index construction, TOC inference — while reporting
//! progress through [`LoadEvent`]s, then serves queries against the built
//! state. This is the plain request/response surface the presentation
//! layer consumes; there is no cross-session shared state and everything
//! is discarded on [`close`](DocumentSession::close).

use std::path::Path;

use crate::index::{SearchIndex, SearchResult};
use crate::model::{DocumentFile, DocumentInfo, PageHandle, PageInfo, ParsedResume, TocEntry};
use crate::reader::PdfDocument;
use crate::resume::parse_resume;
use crate::toc::generate_toc;
use crate::Result;

/// Progress events emitted while a session loads.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    /// The document opened; extraction is about to start.
    Started {
        /// Total number of pages
        num_pages: u32,
    },

    /// One page's text was extracted.
    PageExtracted {
        /// 1-indexed page number
        page: u32,
        /// Completion percentage, monotonically non-decreasing
        percent: f32,
    },

    /// The search index was built.
    IndexBuilt {
        /// Number of indexed chunks
        chunks: usize,
    },

    /// The table of contents is ready.
    TocReady {
        /// Number of TOC entries
        entries: usize,
    },

    /// Loading finished; the session is queryable.
    Completed,
}

/// A fully loaded document with its derived text, TOC, and search index.
pub struct DocumentSession {
    document: PdfDocument,
    filename: Option<String>,
    text: String,
    toc: Vec<TocEntry>,
    index: SearchIndex,
}

impl DocumentSession {
    /// Open and fully process a document from a path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_events(path, |_| {})
    }

    /// Open a document from a path, reporting progress events.
    pub fn open_with_events<P, F>(path: P, on_event: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: FnMut(LoadEvent),
    {
        let filename = path
            .as_ref()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        let document = PdfDocument::open(path)?;
        Ok(Self::load(document, filename, on_event))
    }

    /// Load a document from in-memory bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_events(data, |_| {})
    }

    /// Load a document from in-memory bytes, reporting progress events.
    pub fn from_bytes_with_events<F>(data: &[u8], on_event: F) -> Result<Self>
    where
        F: FnMut(LoadEvent),
    {
        let document = PdfDocument::from_bytes(data)?;
        Ok(Self::load(document, None, on_event))
    }

    /// Open a discovered document record, keeping its filename for
    /// fallback-title resolution.
    pub fn open_file(file: &DocumentFile) -> Result<Self> {
        let document = PdfDocument::open(&file.path)?;
        Ok(Self::load(document, Some(file.filename.clone()), |_| {}))
    }

    fn load<F>(mut document: PdfDocument, filename: Option<String>, mut on_event: F) -> Self
    where
        F: FnMut(LoadEvent),
    {
        on_event(LoadEvent::Started {
            num_pages: document.num_pages(),
        });

        let mut page = 0u32;
        let text = document.extract_all_text_with_progress(|percent| {
            page += 1;
            on_event(LoadEvent::PageExtracted { page, percent });
        });

        let index = SearchIndex::build(document.cached_pages());
        on_event(LoadEvent::IndexBuilt {
            chunks: index.len(),
        });

        let toc = generate_toc(&mut document);
        on_event(LoadEvent::TocReady {
            entries: toc.len(),
        });

        on_event(LoadEvent::Completed);

        Self {
            document,
            filename,
            text,
            toc,
            index,
        }
    }

    /// Document summary (metadata, page count, fingerprint).
    pub fn info(&self) -> &DocumentInfo {
        self.document.info()
    }

    /// Display title: document metadata title, else the source filename,
    /// else "Document".
    pub fn title(&self) -> String {
        let fallback = self.filename.as_deref().unwrap_or("Document");
        self.info().title_or(fallback)
    }

    /// The full extracted text (pages joined with blank lines).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The derived table of contents.
    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    /// Query the search index. Safe to call concurrently via shared
    /// references; the index is read-only after load.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        self.index.search(query)
    }

    /// Page handle lookup; `None` outside `[1, num_pages]`.
    pub fn get_page(&self, page: u32) -> Option<PageHandle> {
        self.document.get_page(page)
    }

    /// Extracted page state; served from the cache populated during load.
    pub fn page(&mut self, page: u32) -> Option<&PageInfo> {
        self.document.extract_page_text(page)
    }

    /// Parse the loaded text as a resume.
    pub fn parse_resume(&self) -> ParsedResume {
        parse_resume(&self.text)
    }

    /// Access the underlying document handle.
    pub fn document(&self) -> &PdfDocument {
        &self.document
    }

    /// Release the document and all derived state. Idempotent.
    pub fn close(&mut self) {
        self.document.close();
        self.text.clear();
        self.toc.clear();
        self.index = SearchIndex::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{resume_backend, sample_backend};

    fn session_from_backend(backend: Box<dyn crate::reader::PdfBackend>) -> DocumentSession {
        let document = PdfDocument::from_backend(backend, "test-fp".to_string());
        DocumentSession::load(document, Some("sample.pdf".to_string()), |_| {})
    }

    #[test]
    fn test_session_event_sequence() {
        let document =
            PdfDocument::from_backend(Box::new(sample_backend()), "test-fp".to_string());
        let mut events: Vec<String> = Vec::new();

        let session = DocumentSession::load(document, None, |event| {
            events.push(match event {
                LoadEvent::Started { .. } => "started".to_string(),
                LoadEvent::PageExtracted { page, .. } => format!("page-{}", page),
                LoadEvent::IndexBuilt { .. } => "index".to_string(),
                LoadEvent::TocReady { .. } => "toc".to_string(),
                LoadEvent::Completed => "done".to_string(),
            });
        });

        let num_pages = session.document().info().num_pages;
        assert_eq!(events.first().map(String::as_str), Some("started"));
        assert_eq!(events.last().map(String::as_str), Some("done"));
        assert_eq!(
            events.iter().filter(|e| e.starts_with("page-")).count(),
            num_pages as usize
        );
        let index_pos = events.iter().position(|e| e == "index").unwrap();
        let toc_pos = events.iter().position(|e| e == "toc").unwrap();
        assert!(index_pos < toc_pos);
    }

    #[test]
    fn test_session_search_and_toc() {
        let mut session = session_from_backend(Box::new(resume_backend()));

        assert!(!session.text().is_empty());
        let results = session.search("engineer");
        assert!(!results.is_empty());
        assert!(session.search("").is_empty());

        // Pages are cached during load.
        assert!(session.page(1).is_some());
        assert!(session.page(0).is_none());
    }

    #[test]
    fn test_session_title_fallback() {
        let session = session_from_backend(Box::new(resume_backend()));
        // The resume backend carries no metadata title.
        assert_eq!(session.title(), "sample.pdf");
    }

    #[test]
    fn test_session_parse_resume() {
        let session = session_from_backend(Box::new(resume_backend()));
        let resume = session.parse_resume();

        // Extracted page text is whitespace-collapsed, so the parsers see
        // one line per page and fall back to full-text scans.
        assert_eq!(resume.contact.email.as_deref(), Some("john@x.com"));
        let skill_names: Vec<&str> = resume.skills.iter().map(|s| s.name.as_str()).collect();
        assert!(skill_names.contains(&"AWS"));
        assert!(skill_names.contains(&"STIG"));
        assert!(!resume.keywords.is_empty());
    }

    #[test]
    fn test_session_close() {
        let mut session = session_from_backend(Box::new(resume_backend()));
        session.close();

        assert!(session.text().is_empty());
        assert!(session.toc().is_empty());
        assert!(session.search("engineer").is_empty());
        assert!(session.get_page(1).is_none());

        // Close is idempotent.
        session.close();
    }
}
