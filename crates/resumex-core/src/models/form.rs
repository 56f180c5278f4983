//! Candidate form state that extracted records are merged into.

use serde::{Deserialize, Serialize};

/// The candidate application form as the web client holds it.
///
/// Unlike [`ExtractedRecord`](super::record::ExtractedRecord), every field
/// is a plain value: an empty string means "not filled in yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CandidateForm {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub more_info: String,
    pub work_experience: Vec<WorkExperienceInput>,
    pub education: Vec<EducationInput>,
    pub language_skills: Vec<LanguageSkillInput>,
}

/// One work-experience row of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkExperienceInput {
    pub company_name: String,
    pub title: String,
    /// `"Yes"`, `"No"` or empty when unknown.
    pub currently_working: String,
    /// `YYYY-MM-DD` or empty.
    pub from_date: String,
    /// `YYYY-MM-DD` or empty.
    pub end_date: String,
    pub country: String,
    pub responsibilities: String,
}

/// One education row of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationInput {
    pub institute: String,
    /// One of the configured degree options, or empty.
    pub degree: String,
    pub major: String,
    pub from_date: String,
    pub end_date: String,
    pub country: String,
}

/// One language row of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageSkillInput {
    pub language: String,
    pub speaking: String,
    pub reading: String,
    pub writing: String,
}
