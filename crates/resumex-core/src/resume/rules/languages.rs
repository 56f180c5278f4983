//! Spoken language and proficiency parsing.

use tracing::trace;

use crate::models::record::LanguageSkill;

use super::patterns::{
    ADJACENT_PROFICIENCY, ALL_SKILLS_MARKER, KNOWN_LANGUAGES, PROFICIENCY_WORD, SKILL_PROFICIENCY,
};
use super::SectionParser;

/// Byte ranges of whole-word, ASCII case-insensitive occurrences of `word`.
fn find_word(line: &str, word: &str) -> Vec<(usize, usize)> {
    let haystack = line.to_ascii_lowercase();
    let needle = word.to_ascii_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    haystack
        .match_indices(needle.as_str())
        .map(|(start, m)| (start, start + m.len()))
        .filter(|&(start, end)| {
            let before = haystack[..start].chars().next_back();
            let after = haystack[end..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .collect()
}

/// Fill proficiencies from the text following a language name.
fn apply_proficiency(entry: &mut LanguageSkill, tail: &str) {
    let levels: Vec<&str> = PROFICIENCY_WORD.find_iter(tail).map(|m| m.as_str()).collect();
    let lower = tail.to_lowercase();
    let names_every_skill = ["speak", "read", "writ"].iter().all(|w| lower.contains(w));

    // One level stated for everything.
    if let [level] = levels.as_slice() {
        if ALL_SKILLS_MARKER.is_match(tail) || names_every_skill {
            entry.speaking = Some(level.to_string());
            entry.reading = Some(level.to_string());
            entry.writing = Some(level.to_string());
            return;
        }
    }

    let mut per_skill = false;
    for caps in SKILL_PROFICIENCY.captures_iter(tail) {
        let level = caps[2].to_string();
        match caps[1].to_lowercase().as_str() {
            "speaking" | "spoken" => entry.speaking = Some(level),
            "reading" | "read" => entry.reading = Some(level),
            _ => entry.writing = Some(level),
        }
        per_skill = true;
    }
    if per_skill {
        return;
    }

    if let Some(caps) = ADJACENT_PROFICIENCY.captures(tail) {
        entry.speaking = Some(caps[1].to_string());
    }
}

/// Parser for the LANGUAGES section.
#[derive(Debug, Clone)]
pub struct LanguageParser {
    languages: Vec<String>,
}

impl LanguageParser {
    pub fn new() -> Self {
        Self {
            languages: KNOWN_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Recognize additional language names.
    pub fn with_extra_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for language in languages {
            let language = language.as_ref().trim();
            if !language.is_empty()
                && !self.languages.iter().any(|l| l.eq_ignore_ascii_case(language))
            {
                self.languages.push(language.to_string());
            }
        }
        self
    }

    /// Languages on a line, ordered by position.
    fn find_languages<'a>(&'a self, line: &str) -> Vec<(usize, usize, &'a str)> {
        let mut found: Vec<(usize, usize, &str)> = self
            .languages
            .iter()
            .flat_map(|name| {
                find_word(line, name)
                    .into_iter()
                    .map(move |(start, end)| (start, end, name.as_str()))
            })
            .collect();
        found.sort_by_key(|&(start, _, _)| start);
        found
    }
}

impl Default for LanguageParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionParser for LanguageParser {
    type Entry = LanguageSkill;

    fn parse(&self, lines: &[&str]) -> Vec<LanguageSkill> {
        let mut entries: Vec<LanguageSkill> = Vec::new();

        for line in lines {
            let found = self.find_languages(line);

            for (i, &(_, end, name)) in found.iter().enumerate() {
                if entries.iter().any(|e| e.language.eq_ignore_ascii_case(name)) {
                    continue;
                }

                let tail_end = found.get(i + 1).map(|(start, _, _)| *start).unwrap_or(line.len());
                let tail = line.get(end..tail_end).unwrap_or("");

                let mut entry = LanguageSkill::new(name);
                apply_proficiency(&mut entry, tail);
                trace!("Language: {:?}", entry);
                entries.push(entry);
            }
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lang(name: &str, speaking: Option<&str>, reading: Option<&str>, writing: Option<&str>) -> LanguageSkill {
        LanguageSkill {
            language: name.to_string(),
            speaking: speaking.map(str::to_string),
            reading: reading.map(str::to_string),
            writing: writing.map(str::to_string),
        }
    }

    fn parse(lines: &[&str]) -> Vec<LanguageSkill> {
        LanguageParser::new().parse(lines)
    }

    #[test]
    fn test_adjacent_proficiency_fills_speaking_only() {
        assert_eq!(
            parse(&["English (Fluent), French - Basic"]),
            vec![
                lang("English", Some("Fluent"), None, None),
                lang("French", Some("Basic"), None, None),
            ]
        );
    }

    #[test]
    fn test_global_statement_fills_all() {
        assert_eq!(
            parse(&["Spanish: Native (all)", "German - Intermediate in speaking, reading and writing"]),
            vec![
                lang("Spanish", Some("Native"), Some("Native"), Some("Native")),
                lang("German", Some("Intermediate"), Some("Intermediate"), Some("Intermediate")),
            ]
        );
    }

    #[test]
    fn test_per_skill_statements() {
        assert_eq!(
            parse(&["Arabic - Speaking: Fluent, Reading: Basic, Writing: Basic"]),
            vec![lang("Arabic", Some("Fluent"), Some("Basic"), Some("Basic"))]
        );
    }

    #[test]
    fn test_no_proficiency_and_dedup() {
        assert_eq!(
            parse(&["english, Hindi", "English"]),
            vec![lang("English", None, None, None), lang("Hindi", None, None, None)]
        );
    }

    #[test]
    fn test_whole_words_only() {
        assert!(parse(&["Thailand office", "Englishman"]).is_empty());
    }

    #[test]
    fn test_extra_languages() {
        let entries = LanguageParser::new()
            .with_extra_languages(["Yoruba"])
            .parse(&["Yoruba (Native)"]);

        assert_eq!(entries, vec![lang("Yoruba", Some("Native"), None, None)]);
    }
}
