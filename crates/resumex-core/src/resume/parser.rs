//! Heuristic resume parser combining the section rules.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::record::{non_empty, ExtractedRecord, UNKNOWN_TITLE};

use super::document::Document;
use super::rules::{
    ContactExtractor, EducationParser, ExperienceParser, LanguageParser, SectionKind,
    SectionParser, SectionSegmenter, SkillsParser,
};
use super::{ResumeExtractor, Result};

/// Result of resume extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: ExtractedRecord,
    /// Non-fatal problems found along the way.
    pub warnings: Vec<String>,
    /// Sections that produced content, in document order.
    pub sections: Vec<SectionKind>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for resume parsing.
pub trait ResumeParser {
    /// Parse a resume from text.
    fn parse(&self, text: &str) -> Result<ExtractionResult>;
}

/// Pattern-based resume parser.
///
/// Cheap to build; create one per document or share it, it holds no state
/// between calls.
#[derive(Debug, Clone)]
pub struct HeuristicResumeParser {
    /// Number of leading lines searched for contact details.
    header_window: usize,
    /// Maximum number of skills kept.
    max_skills: usize,
    extra_languages: Vec<String>,
    extra_title_stopwords: Vec<String>,
}

impl HeuristicResumeParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            header_window: config.header_window,
            max_skills: config.max_skills,
            extra_languages: config.extra_languages.clone(),
            extra_title_stopwords: config.extra_title_stopwords.clone(),
        }
    }

    /// Set the number of leading lines searched for contact details.
    pub fn with_header_window(mut self, lines: usize) -> Self {
        self.header_window = lines;
        self
    }

    /// Set the maximum number of skills kept.
    pub fn with_max_skills(mut self, max_skills: usize) -> Self {
        self.max_skills = max_skills;
        self
    }

    /// Recognize additional language names.
    pub fn with_extra_languages(mut self, languages: Vec<String>) -> Self {
        self.extra_languages = languages;
        self
    }

    /// Add words that rule a line out as the candidate's name.
    pub fn with_extra_title_stopwords(mut self, words: Vec<String>) -> Self {
        self.extra_title_stopwords = words;
        self
    }

    fn parse_document(&self, document: &Document<'_>) -> Result<ExtractionResult> {
        let started = now();
        let mut warnings = Vec::new();

        info!("Parsing resume from {} lines", document.lines().len());

        let contact = ContactExtractor::new()
            .with_extra_stopwords(&self.extra_title_stopwords)
            .extract(document.header_window(self.header_window));

        if contact.first_name.is_none() {
            warnings.push("Could not extract candidate name".to_string());
        }
        if contact.email.is_none() && contact.phone.is_none() {
            warnings.push("Could not extract contact details".to_string());
        }

        let sections = SectionSegmenter::new().segment(document.lines());
        for kind in sections.malformed() {
            let problem = ExtractionError::MalformedSection(kind);
            warn!("{}", problem);
            warnings.push(problem.to_string());
        }

        let work_experience = sections
            .get(SectionKind::Experience)
            .map(|lines| ExperienceParser::new().parse(lines))
            .unwrap_or_default();
        let education = sections
            .get(SectionKind::Education)
            .map(|lines| EducationParser::new().parse(lines))
            .unwrap_or_default();
        let skills = sections
            .get(SectionKind::Skills)
            .map(|lines| SkillsParser::new().with_max_skills(self.max_skills).parse(lines))
            .unwrap_or_default();
        let language_skills = sections
            .get(SectionKind::Languages)
            .map(|lines| {
                LanguageParser::new()
                    .with_extra_languages(&self.extra_languages)
                    .parse(lines)
            })
            .unwrap_or_default();

        debug!(
            "Found {} jobs, {} education entries, {} skills, {} languages",
            work_experience.len(),
            education.len(),
            skills.len(),
            language_skills.len()
        );

        let title = work_experience
            .iter()
            .map(|job| job.title.as_str())
            .find(|title| *title != UNKNOWN_TITLE)
            .map(str::to_string);

        let record = ExtractedRecord {
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            title,
            work_experience: non_empty(work_experience),
            education: non_empty(education),
            language_skills: non_empty(language_skills),
            skills: non_empty(skills),
        };

        if record.is_empty() {
            warn!("No fields could be extracted");
            return Err(ExtractionError::NoExtractableContent);
        }

        Ok(ExtractionResult {
            record,
            warnings,
            sections: sections.found(),
            processing_time_ms: elapsed_ms(started),
        })
    }
}

impl Default for HeuristicResumeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeParser for HeuristicResumeParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        self.parse_document(&Document::parse(text)?)
    }
}

impl ResumeExtractor for HeuristicResumeParser {
    fn extract_from_text(&self, text: &str) -> Result<ExtractedRecord> {
        Ok(self.parse(text)?.record)
    }

    fn extract_from_bytes(&self, bytes: &[u8]) -> Result<ExtractedRecord> {
        Ok(self.parse_document(&Document::from_bytes(bytes)?)?.record)
    }
}

// `Instant::now` panics on wasm32-unknown-unknown.
#[cfg(not(target_arch = "wasm32"))]
fn now() -> Option<std::time::Instant> {
    Some(std::time::Instant::now())
}

#[cfg(target_arch = "wasm32")]
fn now() -> Option<std::time::Instant> {
    None
}

fn elapsed_ms(started: Option<std::time::Instant>) -> u64 {
    started
        .map(|s| s.elapsed().as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{Education, WorkExperience};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_contact_and_education() {
        let text = "Jane Doe\njane.doe@mail.com\n555-123-4567\nEDUCATION\nBachelor of Science, MIT, 2020";
        let result = HeuristicResumeParser::new().parse(text).unwrap();

        assert_eq!(
            result.record,
            ExtractedRecord {
                first_name: Some("Jane".to_string()),
                last_name: Some("Doe".to_string()),
                email: Some("jane.doe@mail.com".to_string()),
                phone: Some("5551234567".to_string()),
                education: Some(vec![Education {
                    degree: Some("Bachelor of Science".to_string()),
                    institution: Some("MIT".to_string()),
                    year: Some("2020".to_string()),
                }]),
                ..Default::default()
            }
        );
        assert_eq!(result.sections, vec![SectionKind::Education]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_title_from_first_job() {
        let text = "EXPERIENCE\n2020 | Acme Corp\nSoftware Engineer\n• Built APIs";
        let record = HeuristicResumeParser::new().extract_from_text(text).unwrap();

        assert_eq!(record.title.as_deref(), Some("Software Engineer"));
        assert_eq!(
            record.work_experience,
            Some(vec![WorkExperience {
                company_name: "Acme Corp".to_string(),
                title: "Software Engineer".to_string(),
                dates: Some("2020".to_string()),
                responsibilities: Some("Built APIs".to_string()),
            }])
        );
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let parser = HeuristicResumeParser::new();
        assert_eq!(parser.parse(""), Err(ExtractionError::NoExtractableContent));
        assert_eq!(parser.parse("   \n  "), Err(ExtractionError::NoExtractableContent));
    }

    #[test]
    fn test_nothing_recognizable_is_an_error() {
        let parser = HeuristicResumeParser::new();
        assert_eq!(
            parser.parse("lorem ipsum dolor sit amet"),
            Err(ExtractionError::NoExtractableContent)
        );
    }

    #[test]
    fn test_malformed_section_is_a_warning() {
        let text = "Jane Doe\njane@mail.com\nEXPERIENCE\nSKILLS\nRust, Go";
        let result = HeuristicResumeParser::new().parse(text).unwrap();

        assert_eq!(result.record.work_experience, None);
        assert_eq!(result.record.skills, Some(vec!["Rust".to_string()]));
        assert_eq!(
            result.warnings,
            vec![ExtractionError::MalformedSection(SectionKind::Experience).to_string()]
        );
    }

    #[test]
    fn test_header_window_limits_contact_search() {
        let text = "Summary line\nanother\nthird\njane@mail.com\nSKILLS\nRust";
        let record = HeuristicResumeParser::new()
            .with_header_window(3)
            .extract_from_text(text)
            .unwrap();

        assert_eq!(record.email, None);
        assert_eq!(record.skills, Some(vec!["Rust".to_string()]));
    }

    #[test]
    fn test_configured_languages() {
        let config = ExtractionConfig {
            extra_languages: vec!["Yoruba".to_string()],
            ..Default::default()
        };
        let record = HeuristicResumeParser::from_config(&config)
            .extract_from_text("LANGUAGES\nYoruba, English")
            .unwrap();

        let names: Vec<_> = record
            .language_skills
            .unwrap()
            .into_iter()
            .map(|l| l.language)
            .collect();
        assert_eq!(names, vec!["Yoruba", "English"]);
    }

    #[test]
    fn test_invalid_bytes() {
        let parser = HeuristicResumeParser::new();
        assert!(matches!(
            parser.extract_from_bytes(&[0xc3, 0x28]),
            Err(ExtractionError::InvalidInput(_))
        ));
    }
}
