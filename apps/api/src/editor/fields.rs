//! Typed single-field edits.
//!
//! Each entry type has its own field enum, so an edit can only name a field
//! that exists and can only carry a value of that field's type. On the wire an
//! edit is `{"field": "<camelCaseName>", "value": ...}`.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::models::cv::{
    CertificationEntry, EducationEntry, Entry, ExperienceEntry, LanguageEntry, PersonalInfo,
    Proficiency, ProjectEntry, SkillEntry, SkillLevel,
};

/// An entry type that accepts typed field edits.
pub trait EditableEntry: Entry {
    type Field: DeserializeOwned;

    fn apply(&mut self, field: Self::Field);
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum PersonalField {
    FullName(String),
    Email(String),
    Phone(String),
    Address(String),
    Linkedin(String),
    Github(String),
    Website(String),
}

impl PersonalField {
    pub fn apply(self, info: &mut PersonalInfo) {
        match self {
            PersonalField::FullName(v) => info.full_name = v,
            PersonalField::Email(v) => info.email = v,
            PersonalField::Phone(v) => info.phone = v,
            PersonalField::Address(v) => info.address = v,
            PersonalField::Linkedin(v) => info.linkedin = Some(v),
            PersonalField::Github(v) => info.github = Some(v),
            PersonalField::Website(v) => info.website = Some(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ExperienceField {
    JobTitle(String),
    Company(String),
    Location(String),
    StartDate(String),
    EndDate(String),
    Current(bool),
    Description(String),
}

impl EditableEntry for ExperienceEntry {
    type Field = ExperienceField;

    fn apply(&mut self, field: ExperienceField) {
        match field {
            ExperienceField::JobTitle(v) => self.job_title = v,
            ExperienceField::Company(v) => self.company = v,
            ExperienceField::Location(v) => self.location = v,
            ExperienceField::StartDate(v) => self.start_date = v,
            ExperienceField::EndDate(v) => self.end_date = v,
            ExperienceField::Current(v) => self.current = v,
            ExperienceField::Description(v) => self.description = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum EducationField {
    Degree(String),
    Institution(String),
    Location(String),
    StartDate(String),
    EndDate(String),
    Gpa(String),
    Description(String),
}

impl EditableEntry for EducationEntry {
    type Field = EducationField;

    fn apply(&mut self, field: EducationField) {
        match field {
            EducationField::Degree(v) => self.degree = v,
            EducationField::Institution(v) => self.institution = v,
            EducationField::Location(v) => self.location = v,
            EducationField::StartDate(v) => self.start_date = v,
            EducationField::EndDate(v) => self.end_date = v,
            EducationField::Gpa(v) => self.gpa = Some(v),
            EducationField::Description(v) => self.description = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum SkillField {
    Name(String),
    Level(Option<SkillLevel>),
}

impl EditableEntry for SkillEntry {
    type Field = SkillField;

    fn apply(&mut self, field: SkillField) {
        match field {
            SkillField::Name(v) => self.name = v,
            SkillField::Level(v) => self.level = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ProjectField {
    Name(String),
    Description(String),
    Technologies(Vec<String>),
    Link(String),
}

impl EditableEntry for ProjectEntry {
    type Field = ProjectField;

    fn apply(&mut self, field: ProjectField) {
        match field {
            ProjectField::Name(v) => self.name = v,
            ProjectField::Description(v) => self.description = v,
            ProjectField::Technologies(v) => self.technologies = v,
            ProjectField::Link(v) => self.link = Some(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum LanguageField {
    Name(String),
    Proficiency(Proficiency),
}

impl EditableEntry for LanguageEntry {
    type Field = LanguageField;

    fn apply(&mut self, field: LanguageField) {
        match field {
            LanguageField::Name(v) => self.name = v,
            LanguageField::Proficiency(v) => self.proficiency = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum CertificationField {
    Name(String),
    Issuer(String),
    Date(String),
    CredentialId(String),
}

impl EditableEntry for CertificationEntry {
    type Field = CertificationField;

    fn apply(&mut self, field: CertificationField) {
        match field {
            CertificationField::Name(v) => self.name = v,
            CertificationField::Issuer(v) => self.issuer = v,
            CertificationField::Date(v) => self.date = v,
            CertificationField::CredentialId(v) => self.credential_id = Some(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_experience_field_from_wire() {
        let field: ExperienceField =
            serde_json::from_value(json!({"field": "jobTitle", "value": "CTO"})).unwrap();
        assert_eq!(field, ExperienceField::JobTitle("CTO".into()));

        let field: ExperienceField =
            serde_json::from_value(json!({"field": "current", "value": true})).unwrap();
        let mut e = ExperienceEntry::blank("1".into());
        e.apply(field);
        assert!(e.current);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ExperienceField, _> =
            serde_json::from_value(json!({"field": "salary", "value": "1"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_value_type_rejected() {
        let result: Result<ExperienceField, _> =
            serde_json::from_value(json!({"field": "current", "value": "yes"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_skill_level_and_language_proficiency() {
        let mut skill = SkillEntry::blank("1".into());
        skill.apply(serde_json::from_value(json!({"field": "level", "value": "Expert"})).unwrap());
        assert_eq!(skill.level, Some(SkillLevel::Expert));

        let mut lang = LanguageEntry::blank("1".into());
        lang.apply(
            serde_json::from_value(json!({"field": "proficiency", "value": "Native"})).unwrap(),
        );
        assert_eq!(lang.proficiency, Proficiency::Native);
    }

    #[test]
    fn test_personal_field_apply() {
        let mut info = PersonalInfo::default();
        let field: PersonalField =
            serde_json::from_value(json!({"field": "github", "value": "github.com/x"})).unwrap();
        field.apply(&mut info);
        assert_eq!(info.github.as_deref(), Some("github.com/x"));
    }
}
