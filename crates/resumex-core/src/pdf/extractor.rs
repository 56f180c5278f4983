//! PDF loading and text extraction using lopdf and pdf-extract.

use lopdf::{Dictionary, Document, Object};
use tracing::{debug, trace};

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// PDF text extractor.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Text and classification of a whole PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfContent {
    /// Type of PDF content.
    pub pdf_type: PdfType,
    /// Extracted text, possibly empty for scanned documents.
    pub text: String,
    /// Number of pages.
    pub page_count: u32,
    /// Number of embedded images.
    pub image_count: usize,
}

/// Count characters that carry content.
fn meaningful_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

fn is_image(dict: &Dictionary) -> bool {
    dict.get(b"Subtype")
        .and_then(|s| s.as_name())
        .map(|name| name == b"Image")
        .unwrap_or(false)
}

/// Single `DCTDecode` filter, given as a name or a one-element array.
fn is_dct(dict: &Dictionary) -> bool {
    match dict.get(b"Filter") {
        Ok(Object::Name(name)) => name == b"DCTDecode",
        Ok(Object::Array(filters)) => {
            filters.len() == 1
                && filters[0]
                    .as_name()
                    .map(|name| name == b"DCTDecode")
                    .unwrap_or(false)
        }
        _ => false,
    }
}

/// Text layer of a document, given the outcome of text extraction.
///
/// A failed extraction only means "no text" when there are page images
/// left to read; otherwise the failure is the caller's to see.
fn text_layer(extracted: Result<String>, image_count: usize) -> Result<String> {
    match extracted {
        Ok(text) => Ok(text),
        Err(e) if image_count > 0 => {
            debug!("No text layer, {} images: {}", image_count, e);
            Ok(String::new())
        }
        Err(e) => Err(e),
    }
}

fn classify(text_chars: usize, image_count: usize, min_text_length: usize) -> PdfType {
    if text_chars >= min_text_length {
        PdfType::Text
    } else if image_count > 0 {
        PdfType::Scanned
    } else if text_chars > 0 {
        PdfType::Text
    } else {
        PdfType::Empty
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Extract text and classify the loaded document in one pass.
    pub fn extract_all(&self, min_text_length: usize) -> Result<PdfContent> {
        let page_count = self.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let image_count = self.image_count();
        let text = text_layer(self.extract_text(), image_count)?;
        let pdf_type = classify(meaningful_chars(&text), image_count, min_text_length);

        debug!(
            "PDF analysis: {} pages, {} chars text, {} images -> {:?}",
            page_count,
            text.len(),
            image_count,
            pdf_type
        );

        Ok(PdfContent {
            pdf_type,
            text,
            page_count,
            image_count,
        })
    }

    /// Number of image XObjects in the document.
    fn image_count(&self) -> usize {
        let Some(doc) = self.document.as_ref() else {
            return 0;
        };

        doc.objects
            .values()
            .filter(|object| match object {
                Object::Stream(stream) => is_image(&stream.dict),
                _ => false,
            })
            .inspect(|_| trace!("Found image object"))
            .count()
    }

    /// Raw bytes of the JPEG images embedded in the document.
    ///
    /// Scanned resumes usually hold one DCT-encoded image per page; the
    /// stream content is a complete JPEG file.
    pub fn jpeg_images(&self) -> Vec<Vec<u8>> {
        let Some(doc) = self.document.as_ref() else {
            return Vec::new();
        };

        doc.objects
            .values()
            .filter_map(|object| match object {
                Object::Stream(stream) if is_image(&stream.dict) && is_dct(&stream.dict) => {
                    Some(stream.content.clone())
                }
                _ => None,
            })
            .collect()
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Many resume exports are encrypted with an empty user password.
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {e}")))?;
            self.raw_data = decrypted;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("no document loaded".to_string()));
        }
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
