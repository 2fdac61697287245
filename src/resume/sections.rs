//! Resume section segmentation.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A named contiguous span of resume text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Everything before the first recognized heading
    Header,
    Summary,
    Experience,
    Skills,
    Education,
    Projects,
    Certifications,
    Achievements,
}

impl Section {
    /// Stable lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Skills => "skills",
            Section::Education => "education",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
            Section::Achievements => "achievements",
        }
    }
}

/// Ordered heading patterns; the first match per line wins.
fn heading_patterns() -> Vec<(Section, Regex)> {
    vec![
        (
            Section::Summary,
            Regex::new(r"(?i)^(summary|profile|about|overview|objective)").unwrap(),
        ),
        (
            Section::Experience,
            Regex::new(r"(?i)^(experience|work|employment|career|professional)").unwrap(),
        ),
        (
            Section::Skills,
            Regex::new(r"(?i)^(skills|technical|competencies|expertise)").unwrap(),
        ),
        (
            Section::Education,
            Regex::new(r"(?i)^(education|academic|school|university)").unwrap(),
        ),
        (
            Section::Projects,
            Regex::new(r"(?i)^(projects|portfolio|work samples)").unwrap(),
        ),
        (
            Section::Certifications,
            Regex::new(r"(?i)^(certifications|certificates|licenses|credentials)").unwrap(),
        ),
        (
            Section::Achievements,
            Regex::new(r"(?i)^(achievements|accomplishments|awards|honors)").unwrap(),
        ),
    ]
}

/// Split resume text into named sections.
///
/// Walks non-empty trimmed lines with a current-section cursor starting at
/// [`Section::Header`]. A line matching a heading pattern flushes the
/// accumulated buffer into the current section, switches the cursor, and
/// is itself consumed. Sections never encountered are absent from the map;
/// encounter order is preserved.
pub fn segment(text: &str) -> IndexMap<Section, String> {
    let patterns = heading_patterns();
    let mut sections: IndexMap<Section, String> = IndexMap::new();
    let mut current = Section::Header;
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let heading = patterns
            .iter()
            .find(|(_, pattern)| pattern.is_match(line))
            .map(|(section, _)| *section);

        match heading {
            Some(section) => {
                if !buffer.is_empty() {
                    sections.insert(current, buffer.join("\n"));
                }
                current = section;
                buffer.clear();
            }
            None => buffer.push(line),
        }
    }

    if !buffer.is_empty() {
        sections.insert(current, buffer.join("\n"));
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_example() {
        let text = "John Doe\njohn@x.com\n\nEXPERIENCE\nSenior Engineer\nAcme Inc\n01/2020 - Present\n• Built things";
        let sections = segment(text);

        assert_eq!(
            sections.get(&Section::Header).unwrap(),
            "John Doe\njohn@x.com"
        );
        assert_eq!(
            sections.get(&Section::Experience).unwrap(),
            "Senior Engineer\nAcme Inc\n01/2020 - Present\n• Built things"
        );
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_segment_heading_is_consumed() {
        let text = "SKILLS\nRust, Python";
        let sections = segment(text);

        assert_eq!(sections.get(&Section::Skills).unwrap(), "Rust, Python");
        assert!(sections.get(&Section::Header).is_none());
    }

    #[test]
    fn test_segment_case_insensitive_prefix() {
        let text = "intro\nWork History\njob line\nEducational Background\nschool line";
        let sections = segment(text);

        assert_eq!(sections.get(&Section::Header).unwrap(), "intro");
        assert_eq!(sections.get(&Section::Experience).unwrap(), "job line");
        // "Educational" prefix-matches the education pattern.
        assert_eq!(sections.get(&Section::Education).unwrap(), "school line");
    }

    #[test]
    fn test_segment_missing_sections_absent() {
        let sections = segment("just a header line");
        assert_eq!(sections.len(), 1);
        assert!(sections.contains_key(&Section::Header));
        assert!(!sections.contains_key(&Section::Skills));
    }

    #[test]
    fn test_segment_reconstruction_order_preserved() {
        let text = "Jane Roe\nSummary of Qualifications\ngreat person\nSKILLS\nRust\nEXPERIENCE\ndid work";
        let sections = segment(text);

        // Concatenating section bodies in encounter order reconstructs the
        // whitespace-normalized non-heading lines.
        let joined: Vec<&str> = sections.values().map(String::as_str).collect();
        assert_eq!(joined, vec!["Jane Roe", "great person", "Rust", "did work"]);

        let keys: Vec<Section> = sections.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                Section::Header,
                Section::Summary,
                Section::Skills,
                Section::Experience
            ]
        );
    }

    #[test]
    fn test_segment_empty_input() {
        assert!(segment("").is_empty());
        assert!(segment("\n\n  \n").is_empty());
    }

    #[test]
    fn test_section_names() {
        assert_eq!(Section::Header.name(), "header");
        assert_eq!(Section::Certifications.name(), "certifications");
    }
}
