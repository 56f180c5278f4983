//! Resume field extraction module.

mod document;
mod parser;
pub mod rules;

pub use document::Document;
pub use parser::{ExtractionResult, HeuristicResumeParser, ResumeParser};
pub use rules::{best_match, FieldMatcher, SectionKind};

use crate::error::ExtractionError;
use crate::models::record::ExtractedRecord;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for anything that turns resume text into a record.
pub trait ResumeExtractor {
    /// Extract a record from plain text.
    fn extract_from_text(&self, text: &str) -> Result<ExtractedRecord>;

    /// Extract a record from raw bytes, which must be UTF-8 text.
    fn extract_from_bytes(&self, bytes: &[u8]) -> Result<ExtractedRecord> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ExtractionError::InvalidInput(format!("not valid UTF-8: {e}")))?;
        self.extract_from_text(text)
    }
}
