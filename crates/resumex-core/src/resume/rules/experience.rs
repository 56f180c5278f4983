//! Work experience parsing.
//!
//! Lines are classified one at a time and fed to a small state machine that
//! keeps at most one open job. Signals are ranked: a date beats a company
//! keyword, which beats the shape of the line.

use tracing::{debug, trace};

use crate::models::record::{WorkExperience, UNKNOWN_COMPANY, UNKNOWN_TITLE};

use super::patterns::{
    COMPANY_SUFFIX, COMPANY_YEAR, DATE_RANGE, RESPONSIBILITY_VERBS, TITLE_AT_COMPANY, YEAR,
    YEAR_COMPANY,
};
use super::{is_bullet, strip_bullet, trim_separators, SectionParser};

const MAX_TITLE_WORDS: usize = 8;
const MAX_TITLE_CHARS: usize = 60;

/// What a single line contributes to the job list.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Signal<'a> {
    /// Carries dates, plus whatever company/title text surrounded them.
    Dated {
        dates: &'a str,
        company: Option<&'a str>,
        title: Option<&'a str>,
    },
    /// Names an employer.
    Company(&'a str),
    /// A duty or achievement.
    Responsibility(&'a str),
    /// Short capitalized text, most likely a title or company.
    Shape(&'a str),
    /// Anything else.
    Other(&'a str),
}

/// Split `Title at Company` into its parts.
fn split_title_company(text: &str) -> (Option<&str>, Option<&str>) {
    match TITLE_AT_COMPANY.captures(text) {
        Some(caps) => {
            let title = caps.get(1).map(|m| trim_separators(m.as_str()));
            let company = caps.get(2).map(|m| trim_separators(m.as_str()));
            (company.filter(|s| !s.is_empty()), title.filter(|s| !s.is_empty()))
        }
        None => (None, None),
    }
}

/// Assign the text around a date to company and title.
fn surrounding_fields<'a>(before: &'a str, after: &'a str) -> (Option<&'a str>, Option<&'a str>) {
    let before = trim_separators(before);
    let after = trim_separators(after);

    match (before.is_empty(), after.is_empty()) {
        (true, true) => (None, None),
        (false, false) => (Some(before), Some(after)),
        (false, true) | (true, false) => {
            let text = if before.is_empty() { after } else { before };
            match split_title_company(text) {
                (Some(company), title) => (Some(company), title),
                (None, _) => (Some(text), None),
            }
        }
    }
}

fn date_signal(line: &str) -> Option<Signal<'_>> {
    if let Some(caps) = YEAR_COMPANY.captures(line) {
        let dates = caps.get(1)?.as_str();
        let (company, title) = surrounding_fields("", caps.get(2)?.as_str());
        return Some(Signal::Dated { dates, company, title });
    }

    if let Some(caps) = COMPANY_YEAR.captures(line) {
        let dates = caps.get(2)?.as_str();
        let (company, title) = surrounding_fields(caps.get(1)?.as_str(), "");
        return Some(Signal::Dated { dates, company, title });
    }

    let m = DATE_RANGE.find(line)?;
    let (company, title) = surrounding_fields(&line[..m.start()], &line[m.end()..]);
    Some(Signal::Dated {
        dates: m.as_str().trim(),
        company,
        title,
    })
}

fn starts_with_verb(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .map(|word| {
            let word = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            RESPONSIBILITY_VERBS.contains(&word.as_str())
        })
        .unwrap_or(false)
}

fn is_short_capitalized(line: &str) -> bool {
    let starts_upper = line.chars().next().is_some_and(char::is_uppercase);
    starts_upper
        && line.chars().count() <= MAX_TITLE_CHARS
        && line.split_whitespace().count() <= MAX_TITLE_WORDS
        && !line.ends_with('.')
}

fn classify(line: &str) -> Signal<'_> {
    // Bullets never start a job, whatever dates they mention.
    if is_bullet(line) {
        return Signal::Responsibility(strip_bullet(line));
    }
    if let Some(signal) = date_signal(line) {
        return signal;
    }
    if COMPANY_SUFFIX.is_match(line) {
        return Signal::Company(line);
    }
    if starts_with_verb(line) {
        return Signal::Responsibility(line);
    }
    if is_short_capitalized(line) {
        return Signal::Shape(line);
    }
    Signal::Other(line)
}

/// Check if a line can be consumed as the title of a job that just started.
fn is_title_candidate(line: &str) -> bool {
    !is_bullet(line)
        && !YEAR.is_match(line)
        && !COMPANY_SUFFIX.is_match(line)
        && !starts_with_verb(line)
        && is_short_capitalized(line)
}

/// A job being assembled.
#[derive(Debug, Default)]
struct JobDraft {
    company: Option<String>,
    title: Option<String>,
    dates: Option<String>,
    responsibilities: Vec<String>,
}

impl JobDraft {
    fn has_content(&self) -> bool {
        self.company.is_some()
            || self.title.is_some()
            || self.dates.is_some()
            || !self.responsibilities.is_empty()
    }

    /// Company or title printed above the dates that follow.
    fn awaits_dates(&self) -> bool {
        self.dates.is_none() && self.responsibilities.is_empty()
    }

    fn fill(&mut self, company: Option<&str>, title: Option<&str>) {
        match (company, title) {
            (Some(company), Some(title)) => {
                if self.company.is_none() {
                    self.company = Some(company.to_string());
                } else if self.title.is_none() {
                    self.title = Some(company.to_string());
                }
                if self.title.is_none() {
                    self.title = Some(title.to_string());
                }
            }
            (Some(text), None) | (None, Some(text)) => {
                if self.company.is_none() {
                    self.company = Some(text.to_string());
                } else if self.title.is_none() {
                    self.title = Some(text.to_string());
                }
            }
            (None, None) => {}
        }
    }

    fn finish(self) -> WorkExperience {
        let responsibilities = self.responsibilities.join("\n");
        WorkExperience {
            company_name: self.company.unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            title: self.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            dates: self.dates,
            responsibilities: (!responsibilities.is_empty()).then_some(responsibilities),
        }
    }
}

/// Parser for the EXPERIENCE section.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExperienceParser;

impl ExperienceParser {
    pub fn new() -> Self {
        Self
    }

    fn close(current: &mut Option<JobDraft>, jobs: &mut Vec<WorkExperience>) {
        if let Some(job) = current.take() {
            if job.has_content() {
                let job = job.finish();
                debug!("Job: {} / {} ({:?})", job.company_name, job.title, job.dates);
                jobs.push(job);
            }
        }
    }

    fn push_responsibility(current: &mut Option<JobDraft>, text: &str) {
        if text.is_empty() {
            return;
        }
        current
            .get_or_insert_with(JobDraft::default)
            .responsibilities
            .push(text.to_string());
    }
}

impl SectionParser for ExperienceParser {
    type Entry = WorkExperience;

    fn parse(&self, lines: &[&str]) -> Vec<WorkExperience> {
        let mut jobs = Vec::new();
        let mut current: Option<JobDraft> = None;
        let mut index = 0;

        while index < lines.len() {
            let line = lines[index].trim();
            let signal = classify(line);
            trace!("Experience line {:?} -> {:?}", line, signal);

            let started = match signal {
                Signal::Dated { dates, company, title } => {
                    let mut job = match current.take() {
                        Some(open) if open.awaits_dates() => open,
                        other => {
                            current = other;
                            Self::close(&mut current, &mut jobs);
                            JobDraft::default()
                        }
                    };
                    job.dates = Some(dates.to_string());
                    job.fill(company, title);
                    current = Some(job);
                    true
                }
                Signal::Company(company) => match current.as_mut() {
                    Some(open) if open.company.is_none() && open.responsibilities.is_empty() => {
                        open.company = Some(company.to_string());
                        true
                    }
                    _ => {
                        Self::close(&mut current, &mut jobs);
                        current = Some(JobDraft {
                            company: Some(company.to_string()),
                            ..Default::default()
                        });
                        true
                    }
                },
                Signal::Responsibility(text) | Signal::Other(text) => {
                    Self::push_responsibility(&mut current, text);
                    false
                }
                Signal::Shape(text) => match current.as_mut() {
                    Some(open) => {
                        if open.title.is_none() {
                            open.title = Some(text.to_string());
                        } else if open.company.is_none() && open.responsibilities.is_empty() {
                            open.company = Some(text.to_string());
                        } else {
                            open.responsibilities.push(text.to_string());
                        }
                        false
                    }
                    None => {
                        current = Some(JobDraft {
                            company: Some(text.to_string()),
                            ..Default::default()
                        });
                        true
                    }
                },
            };

            // A job that just started takes the next plain line as its title.
            if started {
                if let Some(job) = current.as_mut() {
                    let next = lines.get(index + 1).map(|l| l.trim());
                    if let Some(next) = next.filter(|l| job.title.is_none() && is_title_candidate(l)) {
                        job.title = Some(next.to_string());
                        index += 1;
                    }
                }
            }

            index += 1;
        }

        Self::close(&mut current, &mut jobs);
        jobs
    }
}
