//! Typed resume records produced by the heuristic field parsers.
//!
//! All records serialize with camelCase field names, matching what the
//! presentation layer consumes and what override files supply.

use serde::{Deserialize, Serialize};

/// Category of a parsed skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Soft,
    Language,
    Certification,
}

/// Self-reported or inferred proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// A single skill entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<SkillLevel>,
}

impl Skill {
    /// Create a skill with no level.
    pub fn new(name: impl Into<String>, category: SkillCategory) -> Self {
        Self {
            name: name.into(),
            category,
            level: None,
        }
    }
}

/// Contact information from the resume header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Candidate name; defaults to "Professional" when the header yields
    /// nothing
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            name: "Professional".to_string(),
            email: None,
            phone: None,
            location: None,
            website: None,
            linkedin: None,
            github: None,
        }
    }
}

/// A date-ranged employment entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A portfolio project entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// A degree record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub graduation_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub honors: Vec<String>,
}

/// A professional certification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The structured resume produced by one parse invocation.
///
/// Built once from raw text, immutable afterwards. Presentation layers may
/// apply a [`ResumeOverride`] via [`ParsedResume::merged`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    pub contact: Contact,
    pub summary: String,
    pub highlights: Vec<String>,
    pub skills: Vec<Skill>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub keywords: Vec<String>,
}

/// Field-by-field contact override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactOverride {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

/// A user-supplied override record, shallow-merged over a parsed resume.
///
/// Contact merges field-by-field with override precedence; every
/// list-valued section replaces the parsed list wholesale when present —
/// never concatenated or merged element-wise.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeOverride {
    pub contact: Option<ContactOverride>,
    pub summary: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub skills: Option<Vec<Skill>>,
    pub experience: Option<Vec<Experience>>,
    pub projects: Option<Vec<Project>>,
    pub education: Option<Vec<Education>>,
    pub certifications: Option<Vec<Certification>>,
    pub keywords: Option<Vec<String>>,
}

impl ParsedResume {
    /// Apply an override record, returning the merged resume.
    pub fn merged(mut self, overrides: &ResumeOverride) -> Self {
        if let Some(contact) = &overrides.contact {
            if let Some(name) = &contact.name {
                self.contact.name = name.clone();
            }
            merge_field(&mut self.contact.email, &contact.email);
            merge_field(&mut self.contact.phone, &contact.phone);
            merge_field(&mut self.contact.location, &contact.location);
            merge_field(&mut self.contact.website, &contact.website);
            merge_field(&mut self.contact.linkedin, &contact.linkedin);
            merge_field(&mut self.contact.github, &contact.github);
        }
        if let Some(summary) = &overrides.summary {
            self.summary = summary.clone();
        }
        if let Some(highlights) = &overrides.highlights {
            self.highlights = highlights.clone();
        }
        if let Some(skills) = &overrides.skills {
            self.skills = skills.clone();
        }
        if let Some(experience) = &overrides.experience {
            self.experience = experience.clone();
        }
        if let Some(projects) = &overrides.projects {
            self.projects = projects.clone();
        }
        if let Some(education) = &overrides.education {
            self.education = education.clone();
        }
        if let Some(certifications) = &overrides.certifications {
            self.certifications = certifications.clone();
        }
        if let Some(keywords) = &overrides.keywords {
            self.keywords = keywords.clone();
        }
        self
    }
}

fn merge_field(target: &mut Option<String>, source: &Option<String>) {
    if source.is_some() {
        *target = source.clone();
    }
}
