//! The form controller: sole owner of the mutable CV record.
//!
//! Every mutation persists the whole record afterwards. Persistence is
//! fire-and-forget: a failed save is logged and the in-memory record stays
//! authoritative until the next successful write.

pub mod fields;
pub mod handlers;
pub mod list;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::models::cv::{
    CertificationEntry, CvRecord, EducationEntry, ExperienceEntry, LanguageEntry, PersonalInfo,
    ProjectEntry, SkillEntry,
};
use crate::store::CvRepository;

use self::fields::{EditableEntry, PersonalField};
use self::list::EntryList;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("index {index} is out of range for a list of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("a list must keep at least one entry")]
    LastEntry,

    #[error("unknown section '{0}'")]
    UnknownSection(String),

    #[error("invalid field edit: {0}")]
    InvalidField(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// The repeating lists of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Experience,
    Education,
    Skills,
    Projects,
    Languages,
    Certifications,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::Languages,
        Section::Certifications,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Languages => "languages",
            Section::Certifications => "certifications",
        }
    }
}

impl FromStr for Section {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| EditError::UnknownSection(s.to_string()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Partial updates
// ────────────────────────────────────────────────────────────────────────────

/// A partial record. Present lists replace the stored list wholesale;
/// `personalInfo` is merged field by field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvPatch {
    pub personal_info: Option<PersonalInfoPatch>,
    pub summary: Option<String>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub education: Option<Vec<EducationEntry>>,
    pub skills: Option<Vec<SkillEntry>>,
    pub projects: Option<Vec<ProjectEntry>>,
    pub languages: Option<Vec<LanguageEntry>>,
    pub certifications: Option<Vec<CertificationEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

impl PersonalInfoPatch {
    fn merge_into(self, info: &mut PersonalInfo) {
        if let Some(v) = self.full_name {
            info.full_name = v;
        }
        if let Some(v) = self.email {
            info.email = v;
        }
        if let Some(v) = self.phone {
            info.phone = v;
        }
        if let Some(v) = self.address {
            info.address = v;
        }
        if let Some(v) = self.linkedin {
            info.linkedin = Some(v);
        }
        if let Some(v) = self.github {
            info.github = Some(v);
        }
        if let Some(v) = self.website {
            info.website = Some(v);
        }
    }
}

impl CvPatch {
    pub fn merge_into(self, cv: &mut CvRecord) {
        if let Some(personal) = self.personal_info {
            personal.merge_into(&mut cv.personal_info);
        }
        if let Some(v) = self.summary {
            cv.summary = v;
        }
        if let Some(v) = self.experience {
            cv.experience = v;
        }
        if let Some(v) = self.education {
            cv.education = v;
        }
        if let Some(v) = self.skills {
            cv.skills = v;
        }
        if let Some(v) = self.projects {
            cv.projects = v;
        }
        if let Some(v) = self.languages {
            cv.languages = v;
        }
        if let Some(v) = self.certifications {
            cv.certifications = v;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Editor
// ────────────────────────────────────────────────────────────────────────────

pub struct CvEditor {
    record: CvRecord,
    repo: CvRepository,
}

impl CvEditor {
    /// Loads the persisted record, falling back to defaults.
    pub async fn open(repo: CvRepository) -> Self {
        let record = match repo.load().await {
            Some(record) => {
                info!("Loaded stored CV");
                record
            }
            None => {
                info!("Starting from the default CV");
                CvRecord::default()
            }
        };
        Self { record, repo }
    }

    pub fn record(&self) -> &CvRecord {
        &self.record
    }

    pub async fn update(&mut self, patch: CvPatch) {
        patch.merge_into(&mut self.record);
        self.persist().await;
    }

    pub async fn set_personal(&mut self, field: PersonalField) {
        field.apply(&mut self.record.personal_info);
        self.persist().await;
    }

    pub async fn reset(&mut self) {
        self.record = CvRecord::default();
        self.persist().await;
    }

    pub async fn load_sample(&mut self) {
        self.record = CvRecord::sample();
        self.persist().await;
    }

    /// Appends a blank entry to `section` and returns its index.
    pub async fn add_entry(&mut self, section: Section) -> usize {
        let cv = &mut self.record;
        let index = match section {
            Section::Experience => cv.experience.push_blank(),
            Section::Education => cv.education.push_blank(),
            Section::Skills => cv.skills.push_blank(),
            Section::Projects => cv.projects.push_blank(),
            Section::Languages => cv.languages.push_blank(),
            Section::Certifications => cv.certifications.push_blank(),
        };
        self.persist().await;
        index
    }

    pub async fn remove_entry(&mut self, section: Section, index: usize) -> Result<(), EditError> {
        let cv = &mut self.record;
        let removed = match section {
            Section::Experience => cv.experience.remove_entry(index).map(drop),
            Section::Education => cv.education.remove_entry(index).map(drop),
            Section::Skills => cv.skills.remove_entry(index).map(drop),
            Section::Projects => cv.projects.remove_entry(index).map(drop),
            Section::Languages => cv.languages.remove_entry(index).map(drop),
            Section::Certifications => cv.certifications.remove_entry(index).map(drop),
        };
        removed?;
        self.persist().await;
        Ok(())
    }

    /// Applies a `{"field": ..., "value": ...}` edit to one entry. The field
    /// tag is checked against the entry type of `section`.
    pub async fn edit_entry(
        &mut self,
        section: Section,
        index: usize,
        edit: serde_json::Value,
    ) -> Result<(), EditError> {
        let cv = &mut self.record;
        let applied = match section {
            Section::Experience => apply_edit(&mut cv.experience, index, edit),
            Section::Education => apply_edit(&mut cv.education, index, edit),
            Section::Skills => apply_edit(&mut cv.skills, index, edit),
            Section::Projects => apply_edit(&mut cv.projects, index, edit),
            Section::Languages => apply_edit(&mut cv.languages, index, edit),
            Section::Certifications => apply_edit(&mut cv.certifications, index, edit),
        };
        applied?;
        self.persist().await;
        Ok(())
    }

    async fn persist(&self) {
        if let Err(e) = self.repo.save(&self.record).await {
            error!("Failed to persist CV: {e}");
        }
    }
}

fn apply_edit<T: EditableEntry>(
    list: &mut Vec<T>,
    index: usize,
    edit: serde_json::Value,
) -> Result<(), EditError> {
    let field: T::Field =
        serde_json::from_value(edit).map_err(|e| EditError::InvalidField(e.to_string()))?;
    list.entry_mut(index)?.apply(field);
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
