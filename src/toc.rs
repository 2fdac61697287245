//! Table-of-contents inference.
//!
//! Two-tier strategy: the document's native outline wins when it exists;
//! otherwise headings are inferred from per-page font-size statistics over
//! the first few pages. Heuristic entries carry their source font size so
//! callers can inspect the provenance.

use regex::Regex;

use crate::model::{OutlineNode, TocEntry};
use crate::reader::PdfDocument;

/// Heuristic heading discovery never looks past this many pages. Bounds
/// the cost on large documents; headings beyond the cap are simply not
/// discovered.
pub const HEURISTIC_PAGE_LIMIT: u32 = 10;

/// Generate a table of contents for a loaded document.
///
/// Returns the flattened native outline when it yields at least one entry,
/// falling back to font-size heuristics over the first
/// `min(10, num_pages)` pages. Entries are in document order (page, then
/// appearance within the page).
pub fn generate_toc(doc: &mut PdfDocument) -> Vec<TocEntry> {
    let entries = outline_entries(doc);
    if !entries.is_empty() {
        log::debug!("toc: {} entries from native outline", entries.len());
        return entries;
    }

    let entries = heuristic_entries(doc);
    log::debug!("toc: {} entries from heading heuristics", entries.len());
    entries
}

/// Flatten the native outline depth-first, level 1 = top.
fn outline_entries(doc: &PdfDocument) -> Vec<TocEntry> {
    let nodes = doc.outline();
    let mut entries = Vec::new();
    flatten_outline(&nodes, 1, &mut entries);
    entries
}

fn flatten_outline(nodes: &[OutlineNode], level: u8, entries: &mut Vec<TocEntry>) {
    for node in nodes {
        // Container nodes without a destination contribute structure only.
        if let Some(page) = node.page {
            entries.push(TocEntry {
                id: format!("toc-{}", entries.len()),
                title: node.title.clone(),
                level,
                page,
                font_size: None,
            });
        }
        flatten_outline(&node.children, level + 1, entries);
    }
}

/// Infer headings from fragment font sizes and keyword patterns.
fn heuristic_entries(doc: &mut PdfDocument) -> Vec<TocEntry> {
    let keyword = Regex::new(r"(?i)^(chapter|section|part|\d+\.|\d+\.\d+)").unwrap();
    let limit = doc.num_pages().min(HEURISTIC_PAGE_LIMIT);
    let mut entries = Vec::new();

    for page in 1..=limit {
        let Some(info) = doc.extract_page_text(page) else {
            continue;
        };
        let Some(avg_size) = info.average_font_size() else {
            continue;
        };

        for (idx, fragment) in info.fragments.iter().enumerate() {
            let trimmed = fragment.text.trim();

            let is_larger = fragment.font_size > avg_size * 1.2;
            let has_keyword = keyword.is_match(trimmed);
            let is_short = trimmed.len() < 100;
            let not_all_caps = fragment.text != fragment.text.to_uppercase();

            if (is_larger || has_keyword) && is_short && not_all_caps && trimmed.len() > 3 {
                entries.push(TocEntry {
                    id: format!("heading-{}-{}", page, idx),
                    title: trimmed.to_string(),
                    level: level_from_font_size(fragment.font_size, avg_size),
                    page,
                    font_size: Some(fragment.font_size),
                });
            }
        }
    }

    entries
}

/// Map the fragment-to-page font-size ratio to a nesting level.
fn level_from_font_size(font_size: f32, avg_size: f32) -> u8 {
    let ratio = font_size / avg_size;

    if ratio >= 1.8 {
        1
    } else if ratio >= 1.4 {
        2
    } else if ratio >= 1.2 {
        3
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextFragment;
    use crate::testutil::{document_with_outline, document_with_pages, page_from_fragments};

    fn body(text: &str) -> TextFragment {
        TextFragment::new(text, 72.0, 400.0, 10.0)
    }

    #[test]
    fn test_outline_wins_over_heuristics() {
        let outline = vec![OutlineNode {
            title: "Overview".to_string(),
            page: Some(2),
            children: vec![OutlineNode::new("Details", Some(3))],
        }];
        // Page 1 carries an obvious heuristic heading that must not appear.
        let pages = vec![page_from_fragments(vec![
            TextFragment::new("Big Title", 72.0, 700.0, 30.0),
            body("plain body text here"),
        ])];

        let mut doc = document_with_outline(pages, outline);
        let toc = generate_toc(&mut doc);

        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].title, "Overview");
        assert_eq!(toc[0].level, 1);
        assert_eq!(toc[0].page, 2);
        assert_eq!(toc[0].id, "toc-0");
        assert_eq!(toc[1].title, "Details");
        assert_eq!(toc[1].level, 2);
        assert_eq!(toc[1].page, 3);
    }

    #[test]
    fn test_outline_skips_destination_less_containers() {
        let outline = vec![OutlineNode {
            title: "Container".to_string(),
            page: None,
            children: vec![OutlineNode::new("Child", Some(1))],
        }];
        let mut doc = document_with_outline(vec![page_from_fragments(vec![body("text")])], outline);

        let toc = generate_toc(&mut doc);
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].title, "Child");
        assert_eq!(toc[0].level, 2);
    }

    #[test]
    fn test_heuristic_font_size_levels() {
        // Nineteen 10pt body fragments + one large one keep the average
        // close to 10, so the ratios below stay predictable.
        let mut fragments: Vec<TextFragment> = (0..19).map(|_| body("body text line")).collect();
        fragments.push(TextFragment::new("Major Heading", 72.0, 700.0, 20.0));

        let mut doc = document_with_pages(vec![page_from_fragments(fragments)]);
        let toc = generate_toc(&mut doc);

        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].title, "Major Heading");
        assert_eq!(toc[0].level, 1); // 20 / ~10.5 >= 1.8
        assert_eq!(toc[0].font_size, Some(20.0));
        assert!(toc[0].id.starts_with("heading-1-"));
    }

    #[test]
    fn test_heuristic_keyword_match_at_body_size() {
        let fragments = vec![
            body("1. Introduction"),
            body("ordinary paragraph content"),
        ];
        let mut doc = document_with_pages(vec![page_from_fragments(fragments)]);

        let toc = generate_toc(&mut doc);
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].title, "1. Introduction");
        assert_eq!(toc[0].level, 4); // body-sized, keyword-matched
    }

    #[test]
    fn test_heuristic_rejects_caps_short_and_long() {
        let long_title = "x".repeat(120);
        let fragments = vec![
            TextFragment::new("SUMMARY", 72.0, 700.0, 24.0), // all caps
            TextFragment::new("Hi", 72.0, 680.0, 24.0),      // too short
            TextFragment::new(long_title, 72.0, 660.0, 24.0), // too long
            body("body"),
            body("body"),
        ];
        let mut doc = document_with_pages(vec![page_from_fragments(fragments)]);

        assert!(generate_toc(&mut doc).is_empty());
    }

    #[test]
    fn test_heuristic_never_scans_past_page_limit() {
        let mut pages = Vec::new();
        for _ in 0..12 {
            pages.push(page_from_fragments(vec![body("nothing heading-like")]));
        }
        // An unmistakable heading on page 12 must not be discovered.
        pages[11] = page_from_fragments(vec![
            TextFragment::new("Hidden Heading", 72.0, 700.0, 30.0),
            body("body"),
        ]);

        let mut doc = document_with_pages(pages);
        let toc = generate_toc(&mut doc);
        assert!(toc.iter().all(|e| e.page <= HEURISTIC_PAGE_LIMIT));
        assert!(toc.is_empty());
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(level_from_font_size(18.0, 10.0), 1);
        assert_eq!(level_from_font_size(14.0, 10.0), 2);
        assert_eq!(level_from_font_size(12.0, 10.0), 3);
        assert_eq!(level_from_font_size(11.0, 10.0), 4);
    }
}
