//! Section header detection and document segmentation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::is_bullet;
use super::patterns::{DEGREE, HEADER_TABLE, INSTITUTION};

/// Headers longer than this many words are treated as content.
const MAX_HEADER_WORDS: usize = 4;

/// Resume sections with a dedicated parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionKind {
    Experience,
    Education,
    Skills,
    Languages,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Experience => "EXPERIENCE",
            SectionKind::Education => "EDUCATION",
            SectionKind::Skills => "SKILLS",
            SectionKind::Languages => "LANGUAGES",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header<'a> {
    /// Opens a section of the given kind.
    Section {
        kind: SectionKind,
        /// Text after `Header:` on the same line, if any.
        inline: Option<&'a str>,
    },
    /// A header we do not parse (references, projects...). It only ends
    /// the section before it.
    Other,
}

/// Lowercase, drop punctuation and collapse whitespace.
fn normalize_header(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Degree and school names ("Master of Education") carry header words.
fn could_be_header(text: &str) -> bool {
    let single_word = text.split_whitespace().count() == 1;
    !is_bullet(text)
        && !text.chars().any(|c| c.is_ascii_digit())
        && (single_word || !(DEGREE.is_match(text) || INSTITUTION.is_match(text)))
}

fn lookup(text: &str) -> Option<Option<SectionKind>> {
    if !could_be_header(text) {
        return None;
    }

    let normalized = normalize_header(text);
    if normalized.is_empty() || normalized.split(' ').count() > MAX_HEADER_WORDS {
        return None;
    }

    HEADER_TABLE
        .iter()
        .find(|(_, keywords, excludes)| {
            keywords.iter().any(|k| normalized.contains(k))
                && !excludes.iter().any(|e| normalized.contains(e))
        })
        .map(|(kind, _, _)| *kind)
}

/// Classify a line as a section header.
///
/// Returns `None` for ordinary content lines. A line such as
/// `Skills: Rust, Go` is a header whose inline content is `Rust, Go`.
pub fn detect_header(line: &str) -> Option<Header<'_>> {
    let line = line.trim();

    if let Some(found) = lookup(line) {
        return Some(match found {
            Some(kind) => Header::Section { kind, inline: None },
            None => Header::Other,
        });
    }

    let (label, rest) = line.split_once(':')?;
    let rest = rest.trim();
    match lookup(label)? {
        Some(kind) => Some(Header::Section {
            kind,
            inline: (!rest.is_empty()).then_some(rest),
        }),
        None => Some(Header::Other),
    }
}

/// Check if a line is any kind of section header.
pub fn is_header(line: &str) -> bool {
    detect_header(line).is_some()
}

/// Lines of a document grouped by section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections<'a> {
    spans: BTreeMap<SectionKind, Vec<&'a str>>,
    /// Kinds in the order their first header appeared.
    order: Vec<SectionKind>,
}

impl<'a> Sections<'a> {
    /// Lines of a section, if it has any.
    pub fn get(&self, kind: SectionKind) -> Option<&[&'a str]> {
        self.spans
            .get(&kind)
            .filter(|lines| !lines.is_empty())
            .map(Vec::as_slice)
    }

    /// Sections that have content, in the order they appear.
    pub fn found(&self) -> Vec<SectionKind> {
        self.order
            .iter()
            .copied()
            .filter(|kind| self.get(*kind).is_some())
            .collect()
    }

    /// Sections whose headers were present but never followed by content.
    pub fn malformed(&self) -> Vec<SectionKind> {
        self.order
            .iter()
            .copied()
            .filter(|kind| self.get(*kind).is_none())
            .collect()
    }

    fn open(&mut self, kind: SectionKind) -> &mut Vec<&'a str> {
        if !self.order.contains(&kind) {
            self.order.push(kind);
        }
        self.spans.entry(kind).or_default()
    }
}

/// Splits a document into sections by header lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct SectionSegmenter;

impl SectionSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Group lines under the header that precedes them.
    ///
    /// A section runs until the next header of any kind. A repeated header
    /// appends to the section opened by the first one.
    pub fn segment<'a>(&self, lines: &[&'a str]) -> Sections<'a> {
        let mut sections = Sections::default();
        let mut current: Option<SectionKind> = None;

        for line in lines {
            match detect_header(line) {
                Some(Header::Section { kind, inline }) => {
                    debug!("Found {} header: {:?}", kind, line);
                    let span = sections.open(kind);
                    if let Some(text) = inline {
                        span.push(text);
                    }
                    current = Some(kind);
                }
                Some(Header::Other) => {
                    trace!("Closing section at header: {:?}", line);
                    current = None;
                }
                None => {
                    if let Some(kind) = current {
                        sections.open(kind).push(line);
                    }
                }
            }
        }

        sections
    }
}
