//! Contact information extraction from the resume header.

use regex::Regex;

use crate::model::Contact;

/// Parse contact details from header text.
///
/// The name is the first non-empty line (defaulting to "Professional");
/// every other field is the first pattern match in the text, absent when
/// nothing matches. LinkedIn and GitHub handles are normalized to
/// `https://` URLs.
pub fn parse_contact(header: &str) -> Contact {
    let email = Regex::new(r"(?i)[\w.\-]+@[\w.\-]+\.\w+").unwrap();
    let phone = Regex::new(r"\+?[\d\s\-().]{10,}").unwrap();
    let linkedin = Regex::new(r"(?i)linkedin\.com/in/[\w\-]+").unwrap();
    let github = Regex::new(r"(?i)github\.com/[\w\-]+").unwrap();
    let website = Regex::new(r"(?i)https?://[\w.\-]+").unwrap();
    let location = Regex::new(r"([A-Z][a-z\s]+),?\s*([A-Z]{2}|[A-Z][a-z\s]+)").unwrap();

    let name = header
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("Professional")
        .to_string();

    Contact {
        name,
        email: email.find(header).map(|m| m.as_str().to_string()),
        phone: phone.find(header).map(|m| collapse_whitespace(m.as_str())),
        location: location.find(header).map(|m| m.as_str().to_string()),
        website: website.find(header).map(|m| m.as_str().to_string()),
        linkedin: linkedin
            .find(header)
            .map(|m| format!("https://{}", m.as_str())),
        github: github
            .find(header)
            .map(|m| format!("https://{}", m.as_str())),
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
