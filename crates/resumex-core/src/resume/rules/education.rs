//! Education parsing.

use tracing::{debug, trace};

use crate::models::record::Education;

use super::patterns::{DATE_RANGE, DEGREE, DEGREE_INSTITUTION_SPLIT, EDUCATION_BLOCKLIST, INSTITUTION, YEAR};
use super::{strip_bullet, trim_separators, SectionParser};

/// Last year on the line, which is the graduation year for ranges.
fn last_year(text: &str) -> Option<String> {
    YEAR.find_iter(text).last().map(|m| m.as_str().to_string())
}

/// Cut years and date ranges off a fragment.
///
/// Keeps the text before the first date, or after the last one when
/// nothing precedes it, so the result is always a substring of the input.
fn strip_years(text: &str) -> Option<&str> {
    let dates: Vec<_> = DATE_RANGE
        .find_iter(text)
        .chain(YEAR.find_iter(text))
        .map(|m| (m.start(), m.end()))
        .collect();

    let kept = match (
        dates.iter().map(|(start, _)| *start).min(),
        dates.iter().map(|(_, end)| *end).max(),
    ) {
        (Some(first), Some(last)) => {
            let before = trim_separators(&text[..first]);
            if before.is_empty() { trim_separators(&text[last..]) } else { before }
        }
        _ => trim_separators(text),
    };

    (!kept.is_empty()).then_some(kept)
}

fn is_blocked(line: &str) -> bool {
    let lower = line.to_lowercase();
    EDUCATION_BLOCKLIST.iter().any(|phrase| lower.contains(phrase))
}

/// Break a degree line into degree, institution and year.
fn split_degree_line(line: &str) -> Education {
    let segments: Vec<&str> = line
        .split([',', '|', ';', '•', '\t'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let degree_index = segments.iter().position(|s| DEGREE.is_match(s)).unwrap_or(0);
    let degree_segment = segments.get(degree_index).copied().unwrap_or(line);

    let (degree, attached_institution) = match DEGREE_INSTITUTION_SPLIT.captures(degree_segment) {
        Some(caps) => (
            caps.get(1).map(|m| m.as_str()).unwrap_or(degree_segment),
            caps.get(2).and_then(|m| strip_years(m.as_str())),
        ),
        None => (degree_segment, None),
    };

    let others: Vec<&str> = segments
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != degree_index)
        .map(|(_, s)| *s)
        .collect();

    let institution = attached_institution
        .or_else(|| {
            others
                .iter()
                .find(|s| INSTITUTION.is_match(s))
                .and_then(|s| strip_years(s))
        })
        .or_else(|| {
            others
                .iter()
                .filter_map(|s| strip_years(s))
                .find(|s| !s.chars().any(|c| c.is_ascii_digit()))
        });

    Education {
        degree: strip_years(degree).map(str::to_string),
        institution: institution.map(str::to_string),
        year: last_year(line),
    }
}

/// Parser for the EDUCATION section.
#[derive(Debug, Default, Clone, Copy)]
pub struct EducationParser;

impl EducationParser {
    pub fn new() -> Self {
        Self
    }

    fn close(current: &mut Option<Education>, entries: &mut Vec<Education>) {
        if let Some(entry) = current.take() {
            if !entry.is_empty() {
                debug!(
                    "Education: {:?} / {:?} ({:?})",
                    entry.degree, entry.institution, entry.year
                );
                entries.push(entry);
            }
        }
    }
}

impl SectionParser for EducationParser {
    type Entry = Education;

    fn parse(&self, lines: &[&str]) -> Vec<Education> {
        let mut entries = Vec::new();
        let mut current: Option<Education> = None;

        for raw in lines {
            let line = strip_bullet(raw);
            if line.is_empty() {
                continue;
            }
            if is_blocked(line) {
                trace!("Skipping blocked education line: {:?}", line);
                continue;
            }

            if DEGREE.is_match(line) {
                let parsed = split_degree_line(line);
                trace!("Degree line {:?} -> {:?}", line, parsed);

                Self::close(&mut current, &mut entries);
                current = Some(parsed);
            } else if INSTITUTION.is_match(line) {
                let institution = strip_years(line).map(str::to_string);
                let year = last_year(line);
                trace!("Institution line {:?}", line);

                match current.as_mut() {
                    Some(open) if open.institution.is_none() => {
                        open.institution = institution;
                        if open.year.is_none() {
                            open.year = year;
                        }
                    }
                    _ => {
                        Self::close(&mut current, &mut entries);
                        current = Some(Education {
                            degree: None,
                            institution,
                            year,
                        });
                    }
                }
            } else if let Some(year) = last_year(line) {
                if let Some(open) = current.as_mut() {
                    if open.year.is_none() {
                        open.year = Some(year);
                    }
                }
            }
        }

        Self::close(&mut current, &mut entries);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(degree: Option<&str>, institution: Option<&str>, year: Option<&str>) -> Education {
        Education {
            degree: degree.map(str::to_string),
            institution: institution.map(str::to_string),
            year: year.map(str::to_string),
        }
    }

    fn parse(lines: &[&str]) -> Vec<Education> {
        EducationParser::new().parse(lines)
    }

    #[test]
    fn test_single_line_entry() {
        assert_eq!(
            parse(&["Bachelor of Science, MIT, 2020"]),
            vec![entry(Some("Bachelor of Science"), Some("MIT"), Some("2020"))]
        );
    }

    #[test]
    fn test_degree_at_institution() {
        assert_eq!(
            parse(&["MSc Computer Science from Stanford University | 2016 - 2018"]),
            vec![entry(Some("MSc Computer Science"), Some("Stanford University"), Some("2018"))]
        );
    }

    #[test]
    fn test_degree_line_always_starts_entry() {
        assert_eq!(
            parse(&["University of Toronto (2012 - 2016)", "Bachelor of Arts"]),
            vec![
                entry(None, Some("University of Toronto"), Some("2016")),
                entry(Some("Bachelor of Arts"), None, None),
            ]
        );
    }

    #[test]
    fn test_degree_then_institution_then_year() {
        assert_eq!(
            parse(&["Master of Business Administration", "Harvard Business School", "Graduated 2019"]),
            vec![entry(
                Some("Master of Business Administration"),
                Some("Harvard Business School"),
                Some("2019")
            )]
        );
    }

    #[test]
    fn test_multiple_entries() {
        let entries = parse(&[
            "PhD Physics, Caltech, 2015",
            "BSc Physics, University of Leeds, 2010",
        ]);

        assert_eq!(
            entries,
            vec![
                entry(Some("PhD Physics"), Some("Caltech"), Some("2015")),
                entry(Some("BSc Physics"), Some("University of Leeds"), Some("2010")),
            ]
        );
    }

    #[test]
    fn test_second_institution_starts_new_entry() {
        let entries = parse(&["Springfield College", "Shelbyville High School"]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].institution.as_deref(), Some("Shelbyville High School"));
    }

    #[test]
    fn test_blocked_lines_are_skipped() {
        assert!(parse(&["Senior Product Manager, Acme Institute"]).is_empty());
    }

    #[test]
    fn test_strip_years_keeps_substring() {
        assert_eq!(strip_years("Stanford University (2016 - 2020)"), Some("Stanford University"));
        assert_eq!(strip_years("2016 - 2020 Stanford University"), Some("Stanford University"));
        assert_eq!(strip_years("2020"), None);
    }
}
