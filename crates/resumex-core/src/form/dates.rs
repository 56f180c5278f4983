//! Parsing of free-form employment dates into form dates.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Separators that always split a range: spaced hyphen, dashes, words.
    static ref RANGE_SEPARATOR: Regex = Regex::new(
        r"(?i)\s+(?:-|to|until|till)\s+|\s*[–—]\s*"
    ).unwrap();
}

const ONGOING: &[&str] = &["present", "current", "now", "today", "date", "till date", "ongoing"];

/// Start, end and whether the period is still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateSpan {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub ongoing: bool,
}

/// Check if a range end means "still there".
pub fn is_ongoing(value: &str) -> bool {
    let value = value.trim().trim_end_matches('.').to_lowercase();
    ONGOING.contains(&value.as_str())
}

/// Parse a single date: `MM/YYYY`, `YYYY-MM`, `Mon YYYY`, `Month YYYY`
/// or `YYYY`. Days default to the first of the month.
pub fn parse_date_string(value: &str) -> Option<NaiveDate> {
    let value = value.trim().trim_matches(|c: char| c == '.' || c == ',').trim();
    if value.is_empty() {
        return None;
    }

    if value.len() == 4 {
        if let Ok(year) = value.parse::<i32>() {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }

    for sep in ['/', '-', '.'] {
        let date = format!("01{sep}{value}");
        if let Ok(parsed) = NaiveDate::parse_from_str(&date, &format!("%d{sep}%m{sep}%Y")) {
            return Some(parsed);
        }
    }

    for sep in ['-', '/'] {
        let date = format!("{value}{sep}01");
        if let Ok(parsed) = NaiveDate::parse_from_str(&date, &format!("%Y{sep}%m{sep}%d")) {
            return Some(parsed);
        }
    }

    let words = value.replace(['.', ','], " ");
    let mut parts = words.split_whitespace();
    let (month, year) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    // "Sept" and "September" both reduce to "Sep"
    let month = month.get(..3)?;
    NaiveDate::parse_from_str(&format!("01 {month} {year}"), "%d %b %Y").ok()
}

/// Split `start - end` into its two sides.
pub fn split_date_range(dates: &str) -> (&str, Option<&str>) {
    if let Some(m) = RANGE_SEPARATOR.find(dates) {
        return (dates[..m.start()].trim(), Some(dates[m.end()..].trim()));
    }

    // "2018-2020" but not "2021-03"
    for (i, _) in dates.match_indices('-') {
        let (start, end) = (&dates[..i], &dates[i + 1..]);
        if parse_date_string(start).is_some()
            && (is_ongoing(end) || (end.trim().len() >= 4 && parse_date_string(end).is_some()))
        {
            return (start.trim(), Some(end.trim()));
        }
    }

    (dates.trim(), None)
}

/// Parse an employment period as printed on a resume.
pub fn parse_date_span(dates: &str) -> DateSpan {
    let (start, end) = split_date_range(dates);

    if is_ongoing(start) {
        return DateSpan {
            ongoing: true,
            ..Default::default()
        };
    }

    DateSpan {
        from: parse_date_string(start),
        to: end.and_then(parse_date_string),
        ongoing: end.is_some_and(is_ongoing),
    }
}

/// Format a date the way the form stores it.
pub fn form_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, 1)
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date_string("03/2021"), ymd(2021, 3));
        assert_eq!(parse_date_string("3/2021"), ymd(2021, 3));
        assert_eq!(parse_date_string("2021-03"), ymd(2021, 3));
        assert_eq!(parse_date_string("Mar 2021"), ymd(2021, 3));
        assert_eq!(parse_date_string("March 2021"), ymd(2021, 3));
        assert_eq!(parse_date_string("Sept. 2015"), ymd(2015, 9));
        assert_eq!(parse_date_string("2019"), ymd(2019, 1));
    }

    #[test]
    fn test_parse_date_rejects_noise() {
        assert_eq!(parse_date_string(""), None);
        assert_eq!(parse_date_string("Present"), None);
        assert_eq!(parse_date_string("13/2021"), None);
        assert_eq!(parse_date_string("summer of 2019"), None);
    }

    #[test]
    fn test_split_date_range() {
        assert_eq!(split_date_range("Jan 2019 - Present"), ("Jan 2019", Some("Present")));
        assert_eq!(split_date_range("2018–2020"), ("2018", Some("2020")));
        assert_eq!(split_date_range("2018-2020"), ("2018", Some("2020")));
        assert_eq!(split_date_range("03/2019 to 05/2021"), ("03/2019", Some("05/2021")));
        assert_eq!(split_date_range("2021-03"), ("2021-03", None));
        assert_eq!(split_date_range("2020"), ("2020", None));
    }

    #[test]
    fn test_parse_date_span() {
        assert_eq!(
            parse_date_span("Jan 2019 - Present"),
            DateSpan {
                from: ymd(2019, 1),
                to: None,
                ongoing: true,
            }
        );
        assert_eq!(
            parse_date_span("2016 - 2018"),
            DateSpan {
                from: ymd(2016, 1),
                to: ymd(2018, 1),
                ongoing: false,
            }
        );
        assert!(parse_date_span("Current").ongoing);
    }

    #[test]
    fn test_form_date() {
        assert_eq!(form_date(ymd(2020, 7)), "2020-07-01");
        assert_eq!(form_date(None), "");
    }
}
