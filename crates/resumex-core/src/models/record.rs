//! The structured candidate record produced by every extractor.

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder for a job whose company could not be found.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Placeholder for a job whose title could not be found.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Structured resume data.
///
/// Every field is optional. Absent fields are omitted from JSON and
/// collections are never emitted empty, so a consumer can tell
/// "not found" apart from "found but blank".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecord {
    /// Candidate's first name.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub first_name: Option<String>,

    /// Candidate's last name.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub last_name: Option<String>,

    /// Primary email address.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub email: Option<String>,

    /// Primary phone number (digits, optional leading `+`).
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub phone: Option<String>,

    /// Most recent job title.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub title: Option<String>,

    /// Work history in document order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<Vec<WorkExperience>>,

    /// Education history in document order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<Education>>,

    /// Spoken languages in document order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_skills: Option<Vec<LanguageSkill>>,

    /// Skill keywords in first-seen order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

/// A single job entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    /// Employer name, or [`UNKNOWN_COMPANY`].
    #[serde(default)]
    pub company_name: String,

    /// Job title, or [`UNKNOWN_TITLE`].
    #[serde(default)]
    pub title: String,

    /// Employment period as printed.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub dates: Option<String>,

    /// Responsibilities joined with newlines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<String>,
}

/// A single education entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,

    /// Graduation (or last attended) year.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub year: Option<String>,
}

/// A language with optional per-skill proficiency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSkill {
    #[serde(default)]
    pub language: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaking: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writing: Option<String>,
}

impl ExtractedRecord {
    /// Check if nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.title.is_none()
            && self.work_experience.is_none()
            && self.education.is_none()
            && self.language_skills.is_none()
            && self.skills.is_none()
    }

    /// Collapse blank strings and empty collections into absent fields.
    ///
    /// Records coming from the LLM collaborator may use `""` or `[]` for
    /// missing data; after normalization they follow the same absence rules
    /// as heuristic output.
    pub fn normalize(self) -> Self {
        let work_experience = self.work_experience.map(|jobs| {
            jobs.into_iter()
                .filter_map(WorkExperience::normalize)
                .collect::<Vec<_>>()
        });
        let education = self.education.map(|entries| {
            entries
                .into_iter()
                .filter_map(Education::normalize)
                .collect::<Vec<_>>()
        });
        let language_skills = self.language_skills.map(|langs| {
            langs
                .into_iter()
                .filter_map(LanguageSkill::normalize)
                .collect::<Vec<_>>()
        });
        let skills = self.skills.map(|skills| {
            skills
                .into_iter()
                .filter_map(|s| non_blank(Some(s)))
                .collect::<Vec<_>>()
        });

        Self {
            first_name: non_blank(self.first_name),
            last_name: non_blank(self.last_name),
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            title: non_blank(self.title),
            work_experience: work_experience.and_then(non_empty),
            education: education.and_then(non_empty),
            language_skills: language_skills.and_then(non_empty),
            skills: skills.and_then(non_empty),
        }
    }

    /// Number of populated top-level fields.
    pub fn field_count(&self) -> usize {
        [
            self.first_name.is_some(),
            self.last_name.is_some(),
            self.email.is_some(),
            self.phone.is_some(),
            self.title.is_some(),
            self.work_experience.is_some(),
            self.education.is_some(),
            self.language_skills.is_some(),
            self.skills.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

impl WorkExperience {
    fn normalize(self) -> Option<Self> {
        let company = non_blank(Some(self.company_name));
        let title = non_blank(Some(self.title));
        let dates = non_blank(self.dates);
        let responsibilities = non_blank(self.responsibilities);

        if company.is_none() && title.is_none() && dates.is_none() && responsibilities.is_none() {
            return None;
        }

        Some(Self {
            company_name: company.unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            title: title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            dates,
            responsibilities,
        })
    }
}

impl Education {
    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        self.degree.is_none() && self.institution.is_none() && self.year.is_none()
    }

    fn normalize(self) -> Option<Self> {
        let entry = Self {
            degree: non_blank(self.degree),
            institution: non_blank(self.institution),
            year: non_blank(self.year),
        };
        (!entry.is_empty()).then_some(entry)
    }
}

impl LanguageSkill {
    /// Create a language entry with no proficiency.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Default::default()
        }
    }

    fn normalize(self) -> Option<Self> {
        let language = non_blank(Some(self.language))?;
        Some(Self {
            language,
            speaking: non_blank(self.speaking),
            reading: non_blank(self.reading),
            writing: non_blank(self.writing),
        })
    }
}

/// Trim a value and drop it when nothing is left.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Wrap a collection, dropping it when empty.
pub(crate) fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

/// Accept `"2020"`, `2020` or `null` for string fields.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<StringOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_absent_fields_are_omitted() {
        let record = ExtractedRecord {
            first_name: Some("Jane".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"firstName":"Jane"}"#);
    }

    #[test]
    fn test_normalize_collapses_blanks() {
        let record = ExtractedRecord {
            first_name: Some("  ".to_string()),
            email: Some(" jane@mail.com ".to_string()),
            skills: Some(vec![String::new()]),
            education: Some(vec![Education::default()]),
            ..Default::default()
        }
        .normalize();

        assert_eq!(record.first_name, None);
        assert_eq!(record.email.as_deref(), Some("jane@mail.com"));
        assert_eq!(record.skills, None);
        assert_eq!(record.education, None);
    }

    #[test]
    fn test_normalize_fills_job_placeholders() {
        let record = ExtractedRecord {
            work_experience: Some(vec![WorkExperience {
                company_name: String::new(),
                title: "Engineer".to_string(),
                dates: Some(String::new()),
                responsibilities: None,
            }]),
            ..Default::default()
        }
        .normalize();

        let jobs = record.work_experience.unwrap();
        assert_eq!(jobs[0].company_name, UNKNOWN_COMPANY);
        assert_eq!(jobs[0].dates, None);
        assert_eq!(jobs[0].title, "Engineer");
    }

    #[test]
    fn test_lenient_year_and_phone() {
        let json = r#"{"phone": 5551234567, "education": [{"institution": "MIT", "year": 2020}]}"#;
        let record: ExtractedRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.phone.as_deref(), Some("5551234567"));
        assert_eq!(record.education.unwrap()[0].year.as_deref(), Some("2020"));
    }

    #[test]
    fn test_field_count() {
        let record = ExtractedRecord {
            email: Some("a@b.co".to_string()),
            skills: Some(vec!["Rust".to_string()]),
            ..Default::default()
        };
        assert_eq!(record.field_count(), 2);
        assert!(!record.is_empty());
        assert!(ExtractedRecord::default().is_empty());
    }
}
