//! Core library for resume field extraction.
//!
//! This crate provides:
//! - Heuristic extraction of contact details, work history, education,
//!   skills and spoken languages from plain resume text
//! - PDF text extraction and text/scanned classification
//! - The request/response contract of the LLM extractor
//! - Merging of extracted records into the candidate form

pub mod error;
pub mod form;
pub mod llm;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod resume;

pub use error::{CollaboratorError, ExtractionError, PdfError, ResumexError, Result};
pub use form::FormPrefill;
pub use llm::LlmInput;
pub use models::config::ResumexConfig;
pub use models::form::CandidateForm;
pub use models::record::{Education, ExtractedRecord, LanguageSkill, WorkExperience};
#[cfg(feature = "pdf")]
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor, PdfType};
pub use resume::{
    best_match, ExtractionResult, HeuristicResumeParser, ResumeExtractor, ResumeParser,
    SectionKind,
};
