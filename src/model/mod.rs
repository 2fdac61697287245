//! Data model for extracted document content.
//!
//! These types bridge the PDF decoding backend and the consumers of the
//! pipeline (TOC navigation, search, resume structuring). They are plain
//! serde-serializable values with no ties to any concrete PDF library.

mod document;
mod page;
mod resume;

pub use document::{DocumentFile, DocumentInfo, Metadata, OutlineNode, TocEntry};
pub use page::{PageHandle, PageInfo, TextFragment};
pub use resume::{
    Certification, Contact, ContactOverride, Education, Experience, ParsedResume, Project,
    ResumeOverride, Skill, SkillCategory, SkillLevel,
};
