//! Heuristic resume structuring.
//!
//! Splits raw resume text into named sections, then runs independent,
//! pure field parsers over each section. Every parser is total: malformed
//! or unmatched input yields empty collections or default scalars, never
//! an error. The contract is "deterministic given identical input text",
//! not semantic correctness on arbitrary resumes.

mod contact;
mod education;
mod experience;
mod keywords;
mod sections;
mod skills;
mod summary;

pub use contact::parse_contact;
pub use education::parse_education;
pub use experience::{parse_experience, parse_projects};
pub use keywords::extract_keywords;
pub use sections::{segment, Section};
pub use skills::{parse_certifications, parse_skills};
pub use summary::{parse_highlights, parse_summary};

use crate::model::ParsedResume;
use crate::reader::PdfDocument;

/// Parse raw resume text into a structured resume.
///
/// A section never detected by the segmenter falls back to scanning the
/// full text (except the summary, which stays empty when no summary
/// heading exists).
pub fn parse_resume(text: &str) -> ParsedResume {
    let sections = segment(text);
    let section = |s: Section| sections.get(&s).map(String::as_str);

    ParsedResume {
        contact: parse_contact(section(Section::Header).unwrap_or(text)),
        summary: parse_summary(section(Section::Summary).unwrap_or("")),
        highlights: parse_highlights(section(Section::Summary).unwrap_or(text)),
        skills: parse_skills(section(Section::Skills).unwrap_or(text)),
        experience: parse_experience(section(Section::Experience).unwrap_or(text)),
        projects: parse_projects(section(Section::Projects).unwrap_or(text)),
        education: parse_education(section(Section::Education).unwrap_or(text)),
        certifications: parse_certifications(section(Section::Certifications).unwrap_or(text)),
        keywords: extract_keywords(text),
    }
}

/// Extract a document's full text and parse it as a resume.
pub fn parse_resume_document(doc: &mut PdfDocument) -> ParsedResume {
    let text = doc.extract_all_text();
    parse_resume(&text)
}
