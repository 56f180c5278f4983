//! Common regex patterns and keyword tables for resume extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Month names and abbreviations, optionally followed by a dot.
const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";

/// Proficiency words recognized next to a language name.
const PROFICIENCY: &str = r"native|fluent|proficient|intermediate|basic|conversational|beginner|advanced|elementary|bilingual|mother tongue";

lazy_static! {
    // Contact details
    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    /// Phone shapes, tried in order.
    pub static ref PHONE_PATTERNS: Vec<Regex> = vec![
        // 555-123-4567, (555) 123 4567, +1 555.123.4567, 5551234567
        Regex::new(r"(?:\+\d{1,3}[-.\s]?)?(?:\(\d{3}\)|\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap(),
        // +44 20 7946 0958, +92 (300) 1234567
        Regex::new(r"\+\d{1,4}(?:[-.\s]?\(?\d{1,4}\)?){2,5}").unwrap(),
        // Any 7-15 digit run with single separators
        Regex::new(r"\b\d(?:[-.\s]?\d){6,14}\b").unwrap(),
    ];

    pub static ref YEAR_RANGE_ONLY: Regex = Regex::new(
        r"^(?:19|20)\d{2}\s*[-–]\s*(?:19|20)\d{2}$"
    ).unwrap();

    /// Two or three capitalized words and nothing else.
    pub static ref NAME_LINE: Regex = Regex::new(
        r"^[A-Z][a-zA-Z'\-]+(?:\s+[A-Z][a-zA-Z'\-]+){1,2}$"
    ).unwrap();

    // Dates
    pub static ref YEAR: Regex = Regex::new(
        r"\b(?:19|20)\d{2}\b"
    ).unwrap();

    /// 2018 - 2020, Jan 2019 – Present, 03/2021 to now
    pub static ref DATE_RANGE: Regex = Regex::new(&format!(
        r"(?i)(?:\b{month}\s*|\b\d{{1,2}}[/.]\s*)?\b(?:19|20)\d{{2}}\s*(?:-|–|—|\bto\b|\buntil\b)\s*(?:(?:\b{month}\s*|\b\d{{1,2}}[/.]\s*)?(?:19|20)\d{{2}}\b|\bpresent\b|\bcurrent\b|\bnow\b|\btoday\b|\bdate\b)",
        month = MONTH
    )).unwrap();

    /// 2020 | Acme Corp
    pub static ref YEAR_COMPANY: Regex = Regex::new(
        r"^((?:19|20)\d{2})\s*[|,]\s*(\S.*)$"
    ).unwrap();

    /// Acme Corp | 2020
    pub static ref COMPANY_YEAR: Regex = Regex::new(
        r"^(\S.*?)\s*[|,]\s*((?:19|20)\d{2})$"
    ).unwrap();

    // Experience
    pub static ref BULLET: Regex = Regex::new(
        r"^[•*+\-–—·▪◦●►]\s*"
    ).unwrap();

    pub static ref COMPANY_SUFFIX: Regex = Regex::new(
        r"(?i)\b(?:inc|llc|ltd|limited|corp|corporation|company|gmbh|plc|group|technologies|solutions|labs|pvt)\b|\bco\."
    ).unwrap();

    pub static ref TITLE_AT_COMPANY: Regex = Regex::new(
        r"^(.+?)\s+(?:at|@)\s+(.+)$"
    ).unwrap();

    // Education
    pub static ref DEGREE: Regex = Regex::new(
        r"(?i)(?:\b(?:bachelor|master|doctorate|mba|diploma|associate|certificate|certification|bsc|msc|btech|mtech|beng|meng|bba|phd)(?:['’]?s)?\b|\bph\.\s?d\b\.?|\b[bm]\.\s?(?:sc|tech|eng|a|s)\b\.?)"
    ).unwrap();

    pub static ref INSTITUTION: Regex = Regex::new(
        r"(?i)\b(?:university|college|institute|school|academy|polytechnic|conservatory)\b"
    ).unwrap();

    pub static ref DEGREE_INSTITUTION_SPLIT: Regex = Regex::new(
        r"(?i)^(.+?)\s+(?:at|from)\s+(.+)$"
    ).unwrap();

    // Languages
    pub static ref PROFICIENCY_WORD: Regex = Regex::new(&format!(
        r"(?i)\b(?:{})\b", PROFICIENCY
    )).unwrap();

    /// English (Fluent), English - Native, English: Basic
    pub static ref ADJACENT_PROFICIENCY: Regex = Regex::new(&format!(
        r"(?i)^\s*(?:\(\s*|[-–—:]\s*)({})\b", PROFICIENCY
    )).unwrap();

    /// Speaking: Fluent, Writing - Basic
    pub static ref SKILL_PROFICIENCY: Regex = Regex::new(&format!(
        r"(?i)\b(speaking|spoken|reading|read|writing|written)\b\s*[:\-–—]?\s*\(?\s*({})\b", PROFICIENCY
    )).unwrap();

    pub static ref ALL_SKILLS_MARKER: Regex = Regex::new(
        r"(?i)\b(?:all|overall|all skills|across the board)\b"
    ).unwrap();
}

/// Section header keyword table, in tie-break order.
///
/// `None` marks headers that only close the open section.
pub(crate) const HEADER_TABLE: &[(Option<super::sections::SectionKind>, &[&str], &[&str])] = {
    use super::sections::SectionKind::*;
    &[
        (
            Some(Experience),
            &[
                "work experience",
                "professional experience",
                "employment history",
                "work history",
                "experience",
            ],
            &[],
        ),
        (
            Some(Education),
            &["education", "academic history", "academic background", "qualifications"],
            &[],
        ),
        (Some(Skills), &["programming language", "technical language"], &[]),
        (Some(Skills), &["skill", "competencies", "expertise"], &["language"]),
        (Some(Languages), &["language"], &[]),
        (
            None,
            &[
                "references",
                "projects",
                "certifications",
                "summary",
                "objective",
                "interests",
                "hobbies",
                "awards",
                "achievements",
                "publications",
                "volunteer",
            ],
            &[],
        ),
    ]
};

/// Words that rule a line out as the candidate's name.
pub const TITLE_STOPWORDS: &[&str] = &[
    "designer",
    "developer",
    "manager",
    "engineer",
    "analyst",
    "profile",
    "specialist",
    "architect",
    "consultant",
    "lead",
    "director",
    "senior",
    "junior",
    "intern",
    "resume",
    "curriculum",
    "vitae",
    "summary",
    "contact",
    "objective",
];

/// Openers that mark a line as a responsibility.
pub const RESPONSIBILITY_VERBS: &[&str] = &[
    "achieved",
    "analyzed",
    "assisted",
    "automated",
    "built",
    "collaborated",
    "conducted",
    "coordinated",
    "created",
    "delivered",
    "designed",
    "developed",
    "drove",
    "established",
    "handled",
    "helped",
    "implemented",
    "improved",
    "increased",
    "launched",
    "led",
    "maintained",
    "managed",
    "mentored",
    "migrated",
    "optimized",
    "oversaw",
    "owned",
    "reduced",
    "responsible",
    "supported",
    "worked",
    "wrote",
];

/// Phrases that leak into the education section from a neighbouring column.
pub const EDUCATION_BLOCKLIST: &[&str] = &["design manager", "product manager", "project manager"];

/// Languages recognized without configuration.
pub const KNOWN_LANGUAGES: &[&str] = &[
    "English", "French", "Spanish", "German", "Chinese", "Mandarin", "Cantonese", "Arabic",
    "Hindi", "Urdu", "Bengali", "Punjabi", "Portuguese", "Russian", "Japanese", "Korean",
    "Italian", "Dutch", "Turkish", "Persian", "Farsi", "Swahili", "Polish", "Greek", "Hebrew",
    "Swedish", "Norwegian", "Danish", "Finnish", "Indonesian", "Malay", "Vietnamese", "Thai",
    "Tamil", "Telugu", "Marathi", "Gujarati", "Ukrainian", "Romanian", "Czech", "Hungarian",
    "Tagalog", "Filipino", "Pashto", "Sindhi",
];

/// Filler words dropped from skill lists.
pub const SKILL_STOPWORDS: &[&str] = &["and", "the", "with", "for", "etc", "other", "others"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_shapes() {
        for text in [
            "2018 - 2020",
            "2018–2020",
            "Jan 2019 - Present",
            "January 2019 to Current",
            "03/2021 - now",
            "Sept. 2015 – Dec. 2017",
        ] {
            assert!(DATE_RANGE.is_match(text), "expected a range in {text:?}");
        }

        assert!(!DATE_RANGE.is_match("2020 | Acme Corp"));
        assert!(!DATE_RANGE.is_match("Built 20 services"));
    }

    #[test]
    fn test_date_range_match_bounds() {
        let m = DATE_RANGE.find("Acme Corp | Jan 2019 - Present").unwrap();
        assert_eq!(m.as_str(), "Jan 2019 - Present");
    }

    #[test]
    fn test_degree_keywords() {
        for text in ["Bachelor of Science", "Master's in CS", "PhD Physics", "B.Sc. Maths", "MBA"] {
            assert!(DEGREE.is_match(text), "expected a degree in {text:?}");
        }
        assert!(!DEGREE.is_match("Massachusetts Institute of Technology"));
    }

    #[test]
    fn test_name_line() {
        assert!(NAME_LINE.is_match("Jane Doe"));
        assert!(NAME_LINE.is_match("Mary Anne O'Neil"));
        assert!(!NAME_LINE.is_match("jane doe"));
        assert!(!NAME_LINE.is_match("Jane"));
        assert!(!NAME_LINE.is_match("Jane Mary Anne Doe"));
    }
}
