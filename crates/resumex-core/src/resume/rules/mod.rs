//! Rule-based field and section extractors for resumes.

pub mod contact;
pub mod education;
pub mod experience;
pub mod languages;
pub mod matcher;
pub mod patterns;
pub mod sections;
pub mod skills;

pub use contact::{extract_email, extract_phone, ContactExtractor, ContactInfo, EmailExtractor, NameExtractor, PhoneExtractor};
pub use education::EducationParser;
pub use experience::ExperienceParser;
pub use languages::LanguageParser;
pub use matcher::{best_match, FieldMatcher};
pub use sections::{detect_header, Header, SectionKind, SectionSegmenter, Sections};
pub use skills::SkillsParser;

use patterns::BULLET;

/// Trait for single-value field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Trait for parsers that turn the lines of one section into entries.
pub trait SectionParser {
    /// The entry type this parser produces.
    type Entry;

    /// Parse the section's lines, in document order.
    fn parse(&self, lines: &[&str]) -> Vec<Self::Entry>;
}

/// A matched value together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Check if a line starts with a list marker.
pub(crate) fn is_bullet(line: &str) -> bool {
    BULLET.is_match(line)
}

/// Remove a leading list marker.
pub(crate) fn strip_bullet(line: &str) -> &str {
    match BULLET.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line.trim(),
    }
}

/// Trim separators and brackets left around a fragment cut out of a line.
pub(crate) fn trim_separators(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || "|,;:-–—()[]@".contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("• Built APIs"), "Built APIs");
        assert_eq!(strip_bullet("- Led team"), "Led team");
        assert_eq!(strip_bullet("Plain line"), "Plain line");
        assert!(is_bullet("* item"));
        assert!(!is_bullet("item"));
    }

    #[test]
    fn test_trim_separators() {
        assert_eq!(trim_separators(" | Acme Corp (  "), "Acme Corp");
        assert_eq!(trim_separators("--"), "");
    }
}
