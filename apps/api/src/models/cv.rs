//! The CV record: the complete content unit edited by the form and rendered to PDF.
//!
//! Field names serialize in camelCase so the persisted blob keeps the shape the
//! browser form has always written under the `cvData` key.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Record
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvRecord {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub languages: Vec<LanguageEntry>,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// List entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// Ongoing position; the end marker renders as "Present".
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn label(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillEntry {
    pub id: String,
    pub name: String,
    /// Absent for skills that arrive as free text (see the generate endpoint).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<SkillLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proficiency {
    Basic,
    Conversational,
    #[default]
    Professional,
    Native,
}

impl Proficiency {
    pub fn label(self) -> &'static str {
        match self {
            Proficiency::Basic => "Basic",
            Proficiency::Conversational => "Conversational",
            Proficiency::Professional => "Professional",
            Proficiency::Native => "Native",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageEntry {
    pub id: String,
    pub name: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationEntry {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Entry behaviour shared by every list
// ────────────────────────────────────────────────────────────────────────────

/// Common contract for the elements of a repeating list.
pub trait Entry: Clone {
    /// A blank entry carrying the given id.
    fn blank(id: String) -> Self;

    /// Whether the entry has a heading worth printing. Entries for which this
    /// is false are skipped by the layout engine.
    fn has_heading(&self) -> bool;
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

impl Entry for ExperienceEntry {
    fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn has_heading(&self) -> bool {
        filled(&self.job_title) || filled(&self.company)
    }
}

impl Entry for EducationEntry {
    fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn has_heading(&self) -> bool {
        filled(&self.degree) || filled(&self.institution)
    }
}

impl Entry for SkillEntry {
    fn blank(id: String) -> Self {
        Self {
            id,
            name: String::new(),
            level: Some(SkillLevel::Intermediate),
        }
    }

    fn has_heading(&self) -> bool {
        filled(&self.name)
    }
}

impl Entry for ProjectEntry {
    fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn has_heading(&self) -> bool {
        filled(&self.name)
    }
}

impl Entry for LanguageEntry {
    fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn has_heading(&self) -> bool {
        filled(&self.name)
    }
}

impl Entry for CertificationEntry {
    fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn has_heading(&self) -> bool {
        filled(&self.name) || filled(&self.issuer)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Defaults and the sample record
// ────────────────────────────────────────────────────────────────────────────

impl Default for CvRecord {
    /// Empty personal info and one blank entry per list, matching what the form
    /// shows on first load.
    fn default() -> Self {
        let first = || "1".to_string();
        Self {
            personal_info: PersonalInfo {
                linkedin: Some(String::new()),
                github: Some(String::new()),
                website: Some(String::new()),
                ..PersonalInfo::default()
            },
            summary: String::new(),
            experience: vec![ExperienceEntry::blank(first())],
            education: vec![EducationEntry::blank(first())],
            skills: vec![SkillEntry::blank(first())],
            projects: vec![ProjectEntry::blank(first())],
            languages: vec![LanguageEntry::blank(first())],
            certifications: vec![CertificationEntry::blank(first())],
        }
    }
}

impl CvRecord {
    /// A fully populated example used by the "load sample" action.
    pub fn sample() -> Self {
        let s = |v: &str| v.to_string();
        Self {
            personal_info: PersonalInfo {
                full_name: s("Alex Johnson"),
                email: s("alex.johnson@example.com"),
                phone: s("+1 (555) 123-4567"),
                address: s("San Francisco, CA"),
                linkedin: Some(s("linkedin.com/in/alexjohnson")),
                github: Some(s("github.com/alexjohnson")),
                website: Some(s("alexjohnson.dev")),
            },
            summary: s("Experienced software engineer with 5+ years in full-stack development. \
                        Passionate about creating scalable web applications and mentoring junior developers."),
            experience: vec![
                ExperienceEntry {
                    id: s("1"),
                    job_title: s("Senior Frontend Developer"),
                    company: s("TechCorp Inc."),
                    location: s("San Francisco, CA"),
                    start_date: s("2020-03"),
                    end_date: s("2023-12"),
                    current: false,
                    description: s("Led a team of 5 developers in building a customer-facing SaaS platform."),
                },
                ExperienceEntry {
                    id: s("2"),
                    job_title: s("Full Stack Developer"),
                    company: s("StartupXYZ"),
                    location: s("Remote"),
                    start_date: s("2018-01"),
                    end_date: s("2020-02"),
                    current: false,
                    description: s("Developed and maintained multiple web applications using React and Node.js."),
                },
            ],
            education: vec![EducationEntry {
                id: s("1"),
                degree: s("Master of Science in Computer Science"),
                institution: s("Stanford University"),
                location: s("Stanford, CA"),
                start_date: s("2015-09"),
                end_date: s("2017-06"),
                gpa: Some(s("3.8")),
                description: s("Specialized in Software Engineering and Machine Learning."),
            }],
            skills: [
                ("1", "React", SkillLevel::Expert),
                ("2", "TypeScript", SkillLevel::Expert),
                ("3", "Node.js", SkillLevel::Advanced),
                ("4", "Next.js", SkillLevel::Advanced),
                ("5", "MongoDB", SkillLevel::Intermediate),
            ]
            .into_iter()
            .map(|(id, name, level)| SkillEntry {
                id: s(id),
                name: s(name),
                level: Some(level),
            })
            .collect(),
            projects: vec![ProjectEntry {
                id: s("1"),
                name: s("E-commerce Platform"),
                description: s("Full-stack e-commerce solution with real-time inventory management."),
                technologies: vec![s("React"), s("Node.js"), s("MongoDB"), s("Redis")],
                link: Some(s("github.com/alexjohnson/ecommerce")),
            }],
            languages: vec![
                LanguageEntry {
                    id: s("1"),
                    name: s("English"),
                    proficiency: Proficiency::Native,
                },
                LanguageEntry {
                    id: s("2"),
                    name: s("Spanish"),
                    proficiency: Proficiency::Professional,
                },
            ],
            certifications: vec![CertificationEntry {
                id: s("1"),
                name: s("AWS Certified Solutions Architect"),
                issuer: s("Amazon Web Services"),
                date: s("2022-05"),
                credential_id: Some(s("AWS-123456")),
            }],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
