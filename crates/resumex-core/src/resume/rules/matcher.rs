//! Map noisy extracted values onto closed option lists.

use tracing::trace;

/// Find the option that best matches an extracted value.
///
/// Comparison is case-insensitive on the trimmed value. An exact match wins;
/// otherwise the first option that contains the value, or is contained in
/// it, is returned.
///
/// ```
/// use resumex_core::resume::rules::best_match;
///
/// let levels = ["Basic", "Intermediate", "Fluent", "Native"];
/// assert_eq!(best_match("fluent", &levels), Some("Fluent"));
/// assert_eq!(best_match("Bachelor's", &["Bachelors", "Masters"]), None);
/// ```
pub fn best_match<'a, S: AsRef<str>>(value: &str, options: &'a [S]) -> Option<&'a str> {
    let value = value.trim().to_lowercase();
    if value.is_empty() {
        return None;
    }

    let lowered: Vec<(String, &str)> = options
        .iter()
        .map(|o| (o.as_ref().trim().to_lowercase(), o.as_ref()))
        .filter(|(lower, _)| !lower.is_empty())
        .collect();

    let found = lowered
        .iter()
        .find(|(lower, _)| *lower == value)
        .or_else(|| {
            lowered
                .iter()
                .find(|(lower, _)| lower.contains(&value) || value.contains(lower.as_str()))
        })
        .map(|(_, original)| *original);

    trace!("best_match({:?}) -> {:?}", value, found);
    found
}

/// A closed option list with matching helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMatcher {
    options: Vec<String>,
}

impl FieldMatcher {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// See [`best_match`].
    pub fn best_match(&self, value: &str) -> Option<&str> {
        best_match(value, &self.options)
    }

    /// Try each candidate in turn and return the first that matches.
    pub fn first_match<'v, I>(&self, candidates: I) -> Option<&str>
    where
        I: IntoIterator<Item = &'v str>,
    {
        candidates.into_iter().find_map(|c| self.best_match(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LEVELS: [&str; 4] = ["Basic", "Intermediate", "Fluent", "Native"];

    #[test]
    fn test_exact_case_insensitive() {
        assert_eq!(best_match("fluent", &LEVELS), Some("Fluent"));
        assert_eq!(best_match("  NATIVE ", &LEVELS), Some("Native"));
    }

    #[test]
    fn test_substring_either_way() {
        assert_eq!(best_match("Native speaker", &LEVELS), Some("Native"));
        assert_eq!(best_match("inter", &LEVELS), Some("Intermediate"));
    }

    #[test]
    fn test_exact_beats_earlier_substring() {
        let options = ["Masters Degree", "Masters"];
        assert_eq!(best_match("masters", &options), Some("Masters"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(best_match("expert", &LEVELS), None);
        assert_eq!(best_match("", &LEVELS), None);
        assert_eq!(best_match("   ", &LEVELS), None);
        assert_eq!(best_match::<&str>("fluent", &[]), None);
    }

    #[test]
    fn test_field_matcher_first_match() {
        let degrees = FieldMatcher::new(["Bachelors", "Masters", "PhD"]);

        assert_eq!(degrees.best_match("phd"), Some("PhD"));
        assert_eq!(degrees.first_match(["B.Sc.", "bachelor"]), Some("Bachelors"));
        assert_eq!(degrees.first_match(["diploma"]), None);
    }
}
