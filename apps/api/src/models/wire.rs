//! Flattened request shape accepted by `POST /api/cv/generate`.
//!
//! This is the projection the standalone generator page posts: personal fields
//! hoisted to the top level, experience reduced to a few fields, and skills as
//! free text. It is converted into a full `CvRecord` so that every caller goes
//! through the same layout path.

use serde::Deserialize;

use crate::models::cv::{CvRecord, ExperienceEntry, PersonalInfo, SkillEntry};

/// Every field is optional and `null` is read as absent, matching the
/// permissive form that posts it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub summary: Option<String>,
    pub experience: Option<Vec<WireExperience>>,
    pub skills: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireExperience {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl From<GenerateRequest> for CvRecord {
    fn from(req: GenerateRequest) -> Self {
        let experience = req
            .experience
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, e)| ExperienceEntry {
                id: (i + 1).to_string(),
                job_title: e.job_title.unwrap_or_default(),
                company: e.company.unwrap_or_default(),
                location: e.location.unwrap_or_default(),
                start_date: e.start_date.unwrap_or_default(),
                end_date: e.end_date.unwrap_or_default(),
                current: e.current.unwrap_or_default(),
                description: e.description.unwrap_or_default(),
            })
            .collect();

        CvRecord {
            personal_info: PersonalInfo {
                full_name: req.name.unwrap_or_default(),
                email: req.email.unwrap_or_default(),
                phone: req.phone.unwrap_or_default(),
                ..PersonalInfo::default()
            },
            summary: req.summary.unwrap_or_default(),
            experience,
            education: Vec::new(),
            skills: split_skills(req.skills.as_deref().unwrap_or_default()),
            projects: Vec::new(),
            languages: Vec::new(),
            certifications: Vec::new(),
        }
    }
}

/// Splits a free-text skills field on commas and newlines. Levels are unknown.
fn split_skills(text: &str) -> Vec<SkillEntry> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(i, name)| SkillEntry {
            id: (i + 1).to_string(),
            name: name.to_string(),
            level: None,
        })
        .collect()
}
