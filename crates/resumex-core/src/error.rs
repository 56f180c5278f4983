//! Error types for the resumex-core library.

use thiserror::Error;

use crate::resume::SectionKind;

/// Main error type for the resumex library.
#[derive(Error, Debug)]
pub enum ResumexError {
    /// Resume extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Failure of an external text or record producer (OCR, LLM).
    #[error("collaborator failure: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to resume field extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The input was empty or nothing at all could be extracted from it.
    #[error("could not extract any data, please fill the form manually")]
    NoExtractableContent,

    /// The input is not text (bad encoding, binary content).
    #[error("input is not extractable text: {0}")]
    InvalidInput(String),

    /// A section header was found but no lines followed it.
    ///
    /// Never returned as an error by the parser; it is reported through
    /// the extraction warnings and the section is left out.
    #[error("section {0} has a header but no content")]
    MalformedSection(SectionKind),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised at the OCR/LLM collaborator boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a failure status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The service answered without any content.
    #[error("collaborator returned an empty response")]
    EmptyResponse,

    /// The response does not follow the record contract.
    #[error("non-conforming output: {0}")]
    NonConforming(String),

    /// The collaborator cannot handle this kind of input.
    #[error("unsupported input: {0}")]
    Unsupported(String),
}

/// Result type for the resumex library.
pub type Result<T> = std::result::Result<T, ResumexError>;
