//! Vocabulary-driven skill and certification extraction.

use crate::model::{Certification, Skill, SkillCategory};

/// General technical vocabulary.
const TECHNICAL_SKILLS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C++",
    "C#",
    "Go",
    "Rust",
    "Swift",
    "React",
    "Vue",
    "Angular",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "Spring",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Git",
    "Linux",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "Redis",
    "GraphQL",
    "REST",
    "API",
    "Microservices",
    "DevOps",
    "CI/CD",
    "Terraform",
    "Jenkins",
    "GitHub",
    "Jira",
    "Agile",
    "Scrum",
];

/// Security and compliance vocabulary.
const SECURITY_SKILLS: &[&str] = &[
    "NIST",
    "RMF",
    "STIG",
    "FISMA",
    "DISA",
    "DoD",
    "Security+",
    "CISSP",
    "CEH",
    "Penetration Testing",
    "Vulnerability Assessment",
    "Risk Management",
    "Compliance",
    "Cybersecurity",
    "Information Security",
    "Network Security",
];

/// Known certification names.
const COMMON_CERTIFICATIONS: &[&str] = &[
    "Security+",
    "CISSP",
    "CEH",
    "CISM",
    "CISA",
    "GSEC",
    "AWS Certified",
    "Azure Certified",
    "Google Cloud",
    "CompTIA",
    "Certified Ethical Hacker",
    "SANS",
    "GIAC",
];

/// Match skills text against the fixed vocabularies.
///
/// Matching is case-insensitive and word-bounded; every vocabulary term
/// found becomes one record, categorized by the vocabulary it came from.
/// Output order follows vocabulary iteration order, not text order.
pub fn parse_skills(text: &str) -> Vec<Skill> {
    let haystack = text.to_lowercase();
    let mut skills = Vec::new();

    for &term in TECHNICAL_SKILLS {
        if word_bounded_contains(&haystack, &term.to_lowercase()) {
            skills.push(Skill::new(term, SkillCategory::Technical));
        }
    }
    for &term in SECURITY_SKILLS {
        if word_bounded_contains(&haystack, &term.to_lowercase()) {
            skills.push(Skill::new(term, SkillCategory::Certification));
        }
    }

    skills
}

/// Technical vocabulary terms present in the text, for project technology
/// lists.
pub(crate) fn technical_matches(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    TECHNICAL_SKILLS
        .iter()
        .filter(|term| word_bounded_contains(&haystack, &term.to_lowercase()))
        .map(|term| term.to_string())
        .collect()
}

/// Match certification names against the known-certification vocabulary.
///
/// The issuer is inferred from the name (`AWS` → Amazon, `Azure` →
/// Microsoft, else Various); no date extraction is attempted.
pub fn parse_certifications(text: &str) -> Vec<Certification> {
    let haystack = text.to_lowercase();

    COMMON_CERTIFICATIONS
        .iter()
        .filter(|cert| haystack.contains(&cert.to_lowercase()))
        .map(|&cert| {
            let issuer = if cert.contains("AWS") {
                "Amazon"
            } else if cert.contains("Azure") {
                "Microsoft"
            } else {
                "Various"
            };
            Certification {
                name: cert.to_string(),
                issuer: issuer.to_string(),
                date: String::new(),
                expiry_date: None,
                credential_id: None,
                url: None,
            }
        })
        .collect()
}

/// Case-sensitive substring scan with word-boundary checks applied only on
/// the term edges that are alphanumeric. Handles vocabulary terms such as
/// "C++" or "Security+" whose edges cannot sit on a regex `\b` boundary.
fn word_bounded_contains(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let needs_left = needle.chars().next().map_or(false, |c| c.is_alphanumeric());
    let needs_right = needle.chars().last().map_or(false, |c| c.is_alphanumeric());

    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        let start = from + pos;
        let end = start + needle.len();

        let left_ok = !needs_left
            || haystack[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
        let right_ok = !needs_right
            || haystack[end..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());

        if left_ok && right_ok {
            return true;
        }

        match haystack[start..].chars().next() {
            Some(c) => from = start + c.len_utf8(),
            None => break,
        }
    }

    false
}
