//! Input validation and line splitting.

use crate::error::ExtractionError;

/// Share of control characters above which input is rejected as binary.
const MAX_CONTROL_RATIO: f32 = 0.1;

/// A resume as a list of non-empty trimmed lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Document<'a> {
    /// Validate text and split it into lines.
    pub fn parse(text: &'a str) -> Result<Self, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::NoExtractableContent);
        }

        let total = text.chars().count();
        let control = text
            .chars()
            .filter(|c| c.is_control() && !c.is_whitespace())
            .count();
        if control as f32 / total as f32 > MAX_CONTROL_RATIO {
            return Err(ExtractionError::InvalidInput(format!(
                "{control} of {total} characters are control characters"
            )));
        }

        let lines = text
            .lines()
            .map(|line| line.trim_matches(|c: char| c.is_whitespace() || c.is_control()))
            .filter(|line| !line.is_empty())
            .collect();

        Ok(Self { lines })
    }

    /// Decode UTF-8 bytes and parse them.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, ExtractionError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ExtractionError::InvalidInput(format!("not valid UTF-8: {e}")))?;
        Self::parse(text)
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// The first `size` lines, where contact details live.
    pub fn header_window(&self, size: usize) -> &[&'a str] {
        &self.lines[..size.min(self.lines.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lines_are_trimmed_and_blank_lines_dropped() {
        let doc = Document::parse("  Jane Doe \r\n\n\t\nEXPERIENCE\n").unwrap();
        assert_eq!(doc.lines(), &["Jane Doe", "EXPERIENCE"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Document::parse(""), Err(ExtractionError::NoExtractableContent));
        assert_eq!(Document::parse(" \n\t "), Err(ExtractionError::NoExtractableContent));
    }

    #[test]
    fn test_binary_input() {
        let binary = "\u{0}\u{1}\u{2}\u{3}abc";
        assert!(matches!(Document::parse(binary), Err(ExtractionError::InvalidInput(_))));
        assert!(matches!(
            Document::from_bytes(&[0xff, 0xfe, 0x41]),
            Err(ExtractionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_header_window() {
        let doc = Document::parse("a\nb\nc").unwrap();
        assert_eq!(doc.header_window(2), &["a", "b"]);
        assert_eq!(doc.header_window(10).len(), 3);
    }
}
