//! Summary and highlight extraction.

use regex::Regex;

/// Condense summary/objective text into at most three sentences.
///
/// Sentences shorter than 20 characters are dropped; the survivors are
/// joined with `". "` and a trailing period is appended when any remain.
pub fn parse_summary(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.len() > 20)
        .collect();

    if sentences.is_empty() {
        return String::new();
    }

    let mut summary = sentences[..sentences.len().min(3)].join(". ");
    summary.push('.');
    summary
}

/// Extract highlight lines.
///
/// First pass collects bullet-marked lines (`•`, `-`, `*`, or numbered)
/// between 20 and 200 characters. When none exist, falls back to sentences
/// carrying an action verb between 30 and 150 characters. Capped at six
/// entries either way.
pub fn parse_highlights(text: &str) -> Vec<String> {
    let bullet = Regex::new(r"(?m)^\s*(?:[•\-*]|\d+\.)\s*(.+)$").unwrap();
    let mut highlights: Vec<String> = Vec::new();

    for captures in bullet.captures_iter(text) {
        let line = captures[1].trim().to_string();
        if line.len() > 20 && line.len() < 200 {
            highlights.push(line);
        }
    }

    if highlights.is_empty() {
        let action = Regex::new(
            r"(?i)\b(led|managed|developed|created|implemented|improved|increased|reduced|achieved)\b",
        )
        .unwrap();

        highlights = text
            .split(['.', '!', '?'])
            .filter(|s| s.len() > 30 && s.len() < 150 && action.is_match(s))
            .take(6)
            .map(|s| s.trim().to_string())
            .collect();
    }

    highlights.truncate(6);
    highlights
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_keeps_first_three_sentences() {
        let text = "Seasoned security engineer with a decade of experience. \
                    Deep background in compliance automation frameworks. \
                    Focused on measurable operational improvements. \
                    This fourth long sentence should never survive the cut.";
        let summary = parse_summary(text);

        assert!(summary.starts_with("Seasoned security engineer"));
        assert!(summary.ends_with("operational improvements."));
        assert!(!summary.contains("fourth"));
    }

    #[test]
    fn test_summary_drops_short_sentences() {
        let summary = parse_summary("Too short. Yes. No.");
        assert!(summary.is_empty());
    }

    #[test]
    fn test_summary_empty_input() {
        assert_eq!(parse_summary(""), "");
    }

    #[test]
    fn test_highlights_bullet_pass() {
        let text = "• Automated compliance scans across two hundred hosts\n\
                    • no\n\
                    - Reduced vulnerability backlog by forty percent overall\n\
                    plain prose line that is ignored entirely";
        let highlights = parse_highlights(text);

        assert_eq!(highlights.len(), 2);
        assert!(highlights[0].starts_with("Automated"));
        assert!(highlights[1].starts_with("Reduced"));
    }

    #[test]
    fn test_highlights_numbered_bullets() {
        let text = "1. Implemented zero-trust segmentation for the data center\n2. ok";
        let highlights = parse_highlights(text);
        assert_eq!(highlights.len(), 1);
        assert!(highlights[0].starts_with("Implemented"));
    }

    #[test]
    fn test_highlights_action_verb_fallback() {
        let text = "Led the migration of forty services to the cloud platform. \
                    The weather was nice for most of that year though. \
                    Improved deployment frequency from monthly to daily cadence.";
        let highlights = parse_highlights(text);

        assert_eq!(highlights.len(), 2);
        assert!(highlights[0].starts_with("Led the migration"));
        assert!(highlights[1].starts_with("Improved deployment"));
    }

    #[test]
    fn test_highlights_capped_at_six() {
        let mut text = String::new();
        for i in 0..10 {
            text.push_str(&format!(
                "• Delivered measurable improvement number {} this quarter\n",
                i
            ));
        }
        assert_eq!(parse_highlights(&text).len(), 6);
    }

    #[test]
    fn test_highlights_empty_input() {
        assert!(parse_highlights("").is_empty());
    }
}
