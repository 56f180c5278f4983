//! Merging extracted records into the candidate form.

pub mod dates;

pub use dates::{parse_date_span, parse_date_string, split_date_range, DateSpan};

use tracing::debug;

use crate::models::config::FormConfig;
use crate::models::form::{CandidateForm, EducationInput, LanguageSkillInput, WorkExperienceInput};
use crate::models::record::{Education, ExtractedRecord, LanguageSkill, WorkExperience};
use crate::resume::rules::patterns::DEGREE;
use crate::resume::FieldMatcher;

use dates::form_date;

/// Degree abbreviations and the word the option lists use for them.
const DEGREE_ALIASES: &[(&[&str], &str)] = &[
    (&["bsc", "b.sc", "ba", "b.a", "bs", "b.s", "btech", "b.tech", "beng", "b.eng", "bba"], "bachelor"),
    (&["msc", "m.sc", "ma", "m.a", "ms", "m.s", "mtech", "m.tech", "meng", "m.eng", "mba"], "master"),
    (&["ph.d", "ph. d", "doctorate", "doctor of"], "phd"),
];

/// Copy a present value over a form field.
fn set_if_present(field: &mut String, value: Option<&String>) {
    if let Some(value) = value {
        *field = value.clone();
    }
}

/// Applies extracted records to candidate forms.
#[derive(Debug, Clone)]
pub struct FormPrefill {
    degrees: FieldMatcher,
    proficiencies: FieldMatcher,
}

impl FormPrefill {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            degrees: FieldMatcher::new(config.degree_options.iter().cloned()),
            proficiencies: FieldMatcher::new(config.proficiency_options.iter().cloned()),
        }
    }

    /// Merge a record into the form.
    ///
    /// Present values overwrite, absent values leave the form untouched.
    /// Collections are replaced as a whole when present.
    pub fn apply(&self, form: &mut CandidateForm, record: &ExtractedRecord) {
        set_if_present(&mut form.first_name, record.first_name.as_ref());
        set_if_present(&mut form.last_name, record.last_name.as_ref());
        set_if_present(&mut form.email, record.email.as_ref());
        set_if_present(&mut form.phone, record.phone.as_ref());
        set_if_present(&mut form.title, record.title.as_ref());

        if let Some(skills) = &record.skills {
            form.skills = skills.clone();
        }
        if let Some(jobs) = &record.work_experience {
            form.work_experience = jobs.iter().map(|job| self.work_row(job)).collect();
        }
        if let Some(entries) = &record.education {
            form.education = entries.iter().map(|entry| self.education_row(entry)).collect();
        }
        if let Some(languages) = &record.language_skills {
            form.language_skills = languages.iter().map(|l| self.language_row(l)).collect();
        }

        debug!("Prefilled form from {} extracted fields", record.field_count());
    }

    /// Build a fresh form from a record.
    pub fn prefill(&self, record: &ExtractedRecord) -> CandidateForm {
        let mut form = CandidateForm::default();
        self.apply(&mut form, record);
        form
    }

    /// Map a free-text degree onto the degree options.
    pub fn match_degree(&self, degree: &str) -> Option<&str> {
        if let Some(found) = self.degrees.best_match(degree) {
            return Some(found);
        }

        let keyword = DEGREE.find(degree)?.as_str().trim_end_matches('.').to_lowercase();
        let keyword = keyword.trim_end_matches("'s").trim_end_matches("’s");
        if let Some(found) = self.degrees.best_match(keyword) {
            return Some(found);
        }

        DEGREE_ALIASES
            .iter()
            .find(|(aliases, _)| aliases.contains(&keyword))
            .and_then(|(_, word)| self.degrees.best_match(word))
    }

    /// Map a free-text proficiency onto the proficiency options.
    pub fn match_proficiency(&self, level: &str) -> Option<&str> {
        self.proficiencies.best_match(level)
    }

    fn work_row(&self, job: &WorkExperience) -> WorkExperienceInput {
        let span = job.dates.as_deref().map(parse_date_span).unwrap_or_default();
        let currently_working = if span.ongoing {
            "Yes"
        } else if span.to.is_some() {
            "No"
        } else {
            ""
        };

        WorkExperienceInput {
            company_name: job.company_name.clone(),
            title: job.title.clone(),
            currently_working: currently_working.to_string(),
            from_date: form_date(span.from),
            end_date: form_date(span.to),
            country: String::new(),
            responsibilities: job.responsibilities.clone().unwrap_or_default(),
        }
    }

    fn education_row(&self, entry: &Education) -> EducationInput {
        EducationInput {
            institute: entry.institution.clone().unwrap_or_default(),
            degree: entry
                .degree
                .as_deref()
                .and_then(|d| self.match_degree(d))
                .unwrap_or_default()
                .to_string(),
            end_date: form_date(entry.year.as_deref().and_then(parse_date_string)),
            ..Default::default()
        }
    }

    fn language_row(&self, language: &LanguageSkill) -> LanguageSkillInput {
        let level = |value: &Option<String>| {
            value
                .as_deref()
                .and_then(|v| self.match_proficiency(v))
                .unwrap_or_default()
                .to_string()
        };

        LanguageSkillInput {
            language: language.language.clone(),
            speaking: level(&language.speaking),
            reading: level(&language.reading),
            writing: level(&language.writing),
        }
    }
}

impl Default for FormPrefill {
    fn default() -> Self {
        Self::new(&FormConfig::default())
    }
}
