//! Education entry extraction.

use regex::Regex;

use crate::model::Education;

/// Extract degree records.
///
/// Entries anchor on a degree-level keyword followed by "in/of <field>";
/// the next line carrying an institution suffix names the school, and the
/// lines after it (up to the next degree line) are trailing details. The
/// graduation date is the last 4-digit year found in those details; a GPA
/// is picked up when the details carry one. A degree line with no
/// institution line in its block yields no record.
pub fn parse_education(text: &str) -> Vec<Education> {
    let degree =
        Regex::new(r"(?i)^(Bachelor|Master|PhD|Associate|Certificate).*(?:\bin|\bof)\s+(.+)$")
            .unwrap();
    let institution = Regex::new(r"(?i)(University|College|Institute|School)").unwrap();
    let year = Regex::new(r"\b\d{4}\b").unwrap();
    let gpa = Regex::new(r"(?i)GPA:?\s*([0-4]\.\d{1,2})").unwrap();

    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let mut entries = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let Some(captures) = degree.captures(lines[i]) else {
            i += 1;
            continue;
        };

        let mut end = i + 1;
        while end < lines.len() && !degree.is_match(lines[end]) {
            end += 1;
        }
        let block = &lines[i + 1..end];

        if let Some(inst_idx) = block.iter().position(|line| institution.is_match(line)) {
            let details = block[inst_idx + 1..].join("\n");

            entries.push(Education {
                degree: format!("{} in {}", captures[1].trim(), captures[2].trim()),
                institution: block[inst_idx].to_string(),
                location: None,
                graduation_date: year
                    .find_iter(&details)
                    .last()
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                gpa: gpa.captures(&details).map(|c| c[1].to_string()),
                honors: Vec::new(),
            });
        }

        i = end;
    }

    entries
}
