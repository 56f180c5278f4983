//! PDF text extraction for resumes.

mod extractor;

pub use extractor::{PdfContent, PdfExtractor};

use serde::{Deserialize, Serialize};

use crate::error::PdfError;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfType {
    /// Enough embedded text to parse directly.
    Text,
    /// Page images with little or no text; needs OCR or a vision model.
    Scanned,
    /// No text and no images.
    Empty,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}
