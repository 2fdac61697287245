//! Experience and project entry extraction.

use regex::Regex;

use super::keywords::extract_keywords;
use super::skills::technical_matches;
use crate::model::{Experience, Project};

/// A capitalized line carrying a role keyword.
fn title_pattern() -> Regex {
    Regex::new(
        r"^[A-Z].*(Engineer|Developer|Manager|Analyst|Specialist|Consultant|Director|Lead|Senior|Junior|Intern)",
    )
    .unwrap()
}

/// A capitalized line carrying an organization suffix.
fn company_pattern() -> Regex {
    Regex::new(r"^[A-Z].*(Inc|LLC|Corp|Company|University|Department|Agency)").unwrap()
}

/// Loose date: MM/YYYY, YYYY, or "Month YYYY".
fn date_pattern() -> Regex {
    Regex::new(r"\d{1,2}/\d{4}|\d{4}|[A-Z][a-z]+\s+\d{4}").unwrap()
}

/// Extract date-ranged job entries.
///
/// A title line (role keyword) directly followed by a company line
/// (organization suffix) opens an entry; its content runs to the next
/// title line or the end of the text. The first date match is the start,
/// the second the end; a missing second date (or one containing
/// "present") flags the entry as current with an end date of "Present".
pub fn parse_experience(text: &str) -> Vec<Experience> {
    let title = title_pattern();
    let company = company_pattern();
    let date = date_pattern();
    let bullet = Regex::new(r"(?m)^\s*[•\-*]\s*(.+)$").unwrap();

    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let mut entries = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let opens_entry =
            title.is_match(lines[i]) && i + 1 < lines.len() && company.is_match(lines[i + 1]);
        if !opens_entry {
            i += 1;
            continue;
        }

        let mut end = i + 2;
        while end < lines.len() && !title.is_match(lines[end]) {
            end += 1;
        }

        let content = lines[i + 2..end].join("\n");
        let dates: Vec<&str> = date.find_iter(&content).map(|m| m.as_str()).collect();

        let current = dates
            .get(1)
            .map_or(true, |d| d.to_lowercase().contains("present"));

        entries.push(Experience {
            title: lines[i].to_string(),
            company: lines[i + 1].to_string(),
            location: None,
            start_date: dates.first().copied().unwrap_or("").to_string(),
            end_date: dates.get(1).copied().unwrap_or("Present").to_string(),
            current,
            bullets: bullet
                .captures_iter(&content)
                .map(|c| c[1].trim().to_string())
                .collect(),
            keywords: extract_keywords(&content),
        });

        i = end;
    }

    entries
}

/// Extract project entries.
///
/// A short non-bullet line opens a project; bullet lines become
/// highlights, everything else accumulates into the description. The
/// technology list is the technical vocabulary matched over the project
/// body.
pub fn parse_projects(text: &str) -> Vec<Project> {
    let lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let mut projects: Vec<Project> = Vec::new();
    let mut current: Option<Project> = None;

    for line in lines {
        let is_bullet = line.starts_with('•') || line.starts_with('-');

        if line.len() < 100 && !is_bullet {
            if let Some(project) = current.take() {
                projects.push(project);
            }
            current = Some(Project {
                title: line.to_string(),
                description: String::new(),
                technologies: Vec::new(),
                url: None,
                github: None,
                highlights: Vec::new(),
            });
        } else if let Some(project) = current.as_mut() {
            if is_bullet {
                project
                    .highlights
                    .push(line.trim_start_matches(['•', '-']).trim().to_string());
            } else {
                project.description = format!("{} {}", project.description, line).trim().to_string();
            }
        }
    }
    if let Some(project) = current.take() {
        projects.push(project);
    }

    for project in &mut projects {
        let body = format!(
            "{} {} {}",
            project.title,
            project.description,
            project.highlights.join(" ")
        );
        project.technologies = technical_matches(&body);
    }

    projects
}
