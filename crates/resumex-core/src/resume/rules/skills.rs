//! Skill keyword parsing.

use tracing::trace;

use super::patterns::SKILL_STOPWORDS;
use super::{strip_bullet, SectionParser};

const DEFAULT_MAX_SKILLS: usize = 20;

/// Split a line on list delimiters.
///
/// A hyphen only separates tokens when it is not joining two alphanumerics,
/// so `Front-end` survives while `Node.js - SQL` splits.
fn split_tokens(line: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut tokens = Vec::new();
    let mut start = 0;

    for (i, &(offset, c)) in chars.iter().enumerate() {
        let is_delimiter = match c {
            ',' | ';' | '•' | '|' | '·' => true,
            '-' | '–' | '—' => {
                let prev = i.checked_sub(1).and_then(|p| chars.get(p)).map(|(_, c)| *c);
                let next = chars.get(i + 1).map(|(_, c)| *c);
                !(prev.is_some_and(char::is_alphanumeric) && next.is_some_and(char::is_alphanumeric))
            }
            _ => false,
        };

        if is_delimiter {
            tokens.push(&line[start..offset]);
            start = offset + c.len_utf8();
        }
    }
    tokens.push(&line[start..]);
    tokens
}

/// Parser for the SKILLS section.
#[derive(Debug, Clone)]
pub struct SkillsParser {
    max_skills: usize,
}

impl SkillsParser {
    pub fn new() -> Self {
        Self {
            max_skills: DEFAULT_MAX_SKILLS,
        }
    }

    /// Set the maximum number of skills kept.
    pub fn with_max_skills(mut self, max_skills: usize) -> Self {
        self.max_skills = max_skills;
        self
    }

    fn clean(token: &str) -> Option<&str> {
        let token = strip_bullet(token);
        // "Frameworks: React" keeps "React"
        let token = match token.split_once(':') {
            Some((_, rest)) if !rest.trim().is_empty() => rest.trim(),
            _ => token,
        };
        let token = token.trim_end_matches('.').trim();

        let length = token.chars().count();
        if length <= 2 || length >= 30 {
            return None;
        }
        if token.chars().all(|c| c.is_ascii_digit() || c == '.' || c.is_whitespace()) {
            return None;
        }
        if SKILL_STOPWORDS.contains(&token.to_lowercase().as_str()) {
            return None;
        }
        Some(token)
    }
}

impl Default for SkillsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionParser for SkillsParser {
    type Entry = String;

    fn parse(&self, lines: &[&str]) -> Vec<String> {
        let mut skills: Vec<String> = Vec::new();

        for line in lines {
            for token in split_tokens(line) {
                if skills.len() >= self.max_skills {
                    return skills;
                }
                let Some(skill) = Self::clean(token) else {
                    continue;
                };
                if skills.iter().any(|s| s == skill) {
                    continue;
                }
                trace!("Skill: {:?}", skill);
                skills.push(skill.to_string());
            }
        }

        skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(lines: &[&str]) -> Vec<String> {
        SkillsParser::new().parse(lines)
    }

    #[test]
    fn test_mixed_delimiters() {
        assert_eq!(
            parse(&["JavaScript, React; Node.js - SQL"]),
            vec!["JavaScript", "React", "Node.js", "SQL"]
        );
    }

    #[test]
    fn test_hyphenated_words_are_kept() {
        assert_eq!(
            parse(&["Front-end development | CI-CD"]),
            vec!["Front-end development", "CI-CD"]
        );
    }

    #[test]
    fn test_unspaced_hyphen_joins_tokens() {
        assert_eq!(parse(&["Node.js-SQL, Rust"]), vec!["Node.js-SQL", "Rust"]);
        assert_eq!(parse(&["Node.js -SQL"]), vec!["Node.js", "SQL"]);
    }

    #[test]
    fn test_filters_and_dedup() {
        assert_eq!(
            parse(&["• Go, Rust, 2020, and", "Rust • Kubernetes", "a very long description that is not a skill at all"]),
            vec!["Rust", "Kubernetes"]
        );
    }

    #[test]
    fn test_label_prefix() {
        assert_eq!(parse(&["Frameworks: React, Vue"]), vec!["React", "Vue"]);
    }

    #[test]
    fn test_max_skills() {
        let skills = SkillsParser::new()
            .with_max_skills(2)
            .parse(&["Rust, Python, Java"]);
        assert_eq!(skills, vec!["Rust", "Python"]);
    }
}
