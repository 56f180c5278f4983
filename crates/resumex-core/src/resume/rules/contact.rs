//! Email, phone and candidate name extraction from the document header.

use tracing::{debug, trace};

use super::patterns::{EMAIL, NAME_LINE, PHONE_PATTERNS, TITLE_STOPWORDS, YEAR_RANGE_ONLY};
use super::sections::is_header;
use super::{ExtractionMatch, FieldExtractor};

/// Contact details found in the header window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Email address extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmailExtractor;

impl FieldExtractor for EmailExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        EMAIL
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Phone number extractor.
///
/// Produces digits only, keeping a leading `+` when the number had one.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhoneExtractor;

impl PhoneExtractor {
    fn normalize(raw: &str) -> Option<String> {
        let raw = raw.trim();
        if YEAR_RANGE_ONLY.is_match(raw) {
            return None;
        }

        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if !(7..=15).contains(&digits.len()) {
            return None;
        }

        if raw.starts_with('+') {
            Some(format!("+{digits}"))
        } else {
            Some(digits)
        }
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        // Blank out emails so digits inside addresses never look like numbers.
        let masked = EMAIL.replace_all(text, |caps: &regex::Captures| " ".repeat(caps[0].len()));

        let mut results: Vec<Self::Output> = Vec::new();
        for pattern in PHONE_PATTERNS.iter() {
            for m in pattern.find_iter(&masked) {
                let Some(phone) = Self::normalize(m.as_str()) else {
                    continue;
                };
                if results.iter().any(|r| r.value == phone) {
                    continue;
                }
                results.push(
                    ExtractionMatch::new(phone, m.as_str().trim())
                        .with_position(m.start(), m.end()),
                );
            }
        }

        results
    }
}

/// Candidate name extractor working on a single line.
#[derive(Debug, Clone)]
pub struct NameExtractor {
    stopwords: Vec<String>,
}

impl NameExtractor {
    pub fn new() -> Self {
        Self {
            stopwords: TITLE_STOPWORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Add words that rule a line out as a name.
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        self
    }

    fn qualifies(&self, line: &str) -> bool {
        if line.contains('|') || line.chars().any(|c| c.is_ascii_digit()) || EMAIL.is_match(line) {
            return false;
        }
        if !NAME_LINE.is_match(line) || is_header(line) {
            return false;
        }
        !line
            .split_whitespace()
            .any(|word| self.stopwords.iter().any(|s| s == &word.to_lowercase()))
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    /// First and last name.
    type Output = (String, String);

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        text.lines()
            .map(str::trim)
            .filter(|line| self.qualifies(line))
            .filter_map(|line| {
                let mut words = line.split_whitespace();
                let first = words.next()?;
                let last = words.last()?;
                Some((first.to_string(), last.to_string()))
            })
            .collect()
    }
}

/// Extracts contact details from the first lines of a resume.
#[derive(Debug, Clone, Default)]
pub struct ContactExtractor {
    names: NameExtractor,
}

impl ContactExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add words that rule a line out as the candidate's name.
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names = self.names.with_extra_stopwords(words);
        self
    }

    /// Search the header window. Each field takes its first hit in line order.
    pub fn extract(&self, window: &[&str]) -> ContactInfo {
        let mut info = ContactInfo::default();

        for line in window {
            trace!("Contact line: {:?}", line);

            if info.email.is_none() {
                info.email = EmailExtractor.extract(line).map(|m| m.value);
            }
            if info.phone.is_none() {
                info.phone = PhoneExtractor.extract(line).map(|m| m.value);
            }
            if info.first_name.is_none() {
                if let Some((first, last)) = self.names.extract(line) {
                    info.first_name = Some(first);
                    info.last_name = Some(last);
                }
            }
        }

        debug!(
            "Contact: email={} phone={} name={}",
            info.email.is_some(),
            info.phone.is_some(),
            info.first_name.is_some()
        );
        info
    }
}

/// Extract the first email address from text.
pub fn extract_email(text: &str) -> Option<String> {
    EmailExtractor.extract(text).map(|m| m.value)
}

/// Extract the first phone number from text, normalized.
pub fn extract_phone(text: &str) -> Option<String> {
    PhoneExtractor.extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_email() {
        assert_eq!(
            extract_email("Contact: jane.doe@mail.com."),
            Some("jane.doe@mail.com".to_string())
        );
        assert_eq!(extract_email("no address here"), None);
    }

    #[test]
    fn test_phone_shapes() {
        let cases = [
            ("555-123-4567", "5551234567"),
            ("(555) 123 4567", "5551234567"),
            ("+1 555.123.4567", "+15551234567"),
            ("5551234567", "5551234567"),
            ("+44 20 7946 0958", "+442079460958"),
            ("Mobile: 555 123 4567", "5551234567"),
        ];

        for (text, expected) in cases {
            assert_eq!(extract_phone(text).as_deref(), Some(expected), "{text}");
        }
    }

    #[test]
    fn test_phone_ignores_years_and_emails() {
        assert_eq!(extract_phone("2018-2020"), None);
        assert_eq!(extract_phone("jane5551234567@mail.com"), None);
        assert_eq!(extract_phone("Class of 2020"), None);
    }

    #[test]
    fn test_name_rules() {
        let names = NameExtractor::new();

        assert_eq!(
            names.extract("Jane Doe"),
            Some(("Jane".to_string(), "Doe".to_string()))
        );
        assert_eq!(
            names.extract("Mary Anne Smith"),
            Some(("Mary".to_string(), "Smith".to_string()))
        );
        assert_eq!(names.extract("Software Engineer"), None);
        assert_eq!(names.extract("Senior Product Designer"), None);
        assert_eq!(names.extract("Jane Doe | London"), None);
        assert_eq!(names.extract("Work Experience"), None);
    }

    #[test]
    fn test_extra_stopwords() {
        let names = NameExtractor::new().with_extra_stopwords(["Recruiter"]);
        assert_eq!(names.extract("Talent Recruiter"), None);
    }

    #[test]
    fn test_contact_first_hit_wins() {
        let window = [
            "Senior Data Analyst",
            "Jane Doe",
            "jane@mail.com | 555-123-4567",
            "John Smith",
            "other@mail.com",
        ];
        let info = ContactExtractor::new().extract(&window);

        assert_eq!(
            info,
            ContactInfo {
                email: Some("jane@mail.com".to_string()),
                phone: Some("5551234567".to_string()),
                first_name: Some("Jane".to_string()),
                last_name: Some("Doe".to_string()),
            }
        );
    }

    #[test]
    fn test_contact_missing_fields() {
        let info = ContactExtractor::new().extract(&["just some text"]);
        assert_eq!(info, ContactInfo::default());
    }
}
