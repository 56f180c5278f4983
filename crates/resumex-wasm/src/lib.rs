//! WASM bindings for resume field extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use wasm_bindgen::prelude::*;

use resumex_core::llm;
use resumex_core::models::config::{ExtractionConfig, FormConfig};
use resumex_core::resume::FieldMatcher;
use resumex_core::{
    CandidateForm, ExtractedRecord, FormPrefill, HeuristicResumeParser, ResumeParser, SectionKind,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract resume data from text.
///
/// Takes resume text (from OCR or PDF extraction) and returns the
/// extracted record. Throws when nothing could be extracted.
#[wasm_bindgen]
pub fn extract_resume_from_text(text: &str) -> Result<JsValue, JsValue> {
    let result = HeuristicResumeParser::new().parse(text).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&result.record).map_err(js_error)
}

/// Extract resume data from text as a JSON string.
#[wasm_bindgen]
pub fn extract_resume_json(text: &str) -> Result<String, JsValue> {
    let result = HeuristicResumeParser::new().parse(text).map_err(js_error)?;
    serde_json::to_string(&result.record).map_err(js_error)
}

/// Map a free-text value onto one of `options`.
#[wasm_bindgen]
pub fn best_match(value: &str, options: Vec<String>) -> Option<String> {
    resumex_core::best_match(value, &options).map(str::to_string)
}

/// Merge an extracted record into a candidate form.
///
/// `form` may be `undefined` to start from an empty form. Absent record
/// fields leave the form's values alone.
#[wasm_bindgen]
pub fn prefill_form(form: JsValue, record: JsValue) -> Result<JsValue, JsValue> {
    let mut form: CandidateForm = if form.is_undefined() || form.is_null() {
        CandidateForm::default()
    } else {
        serde_wasm_bindgen::from_value(form).map_err(js_error)?
    };
    let record: ExtractedRecord = serde_wasm_bindgen::from_value(record).map_err(js_error)?;

    FormPrefill::default().apply(&mut form, &record.normalize());
    serde_wasm_bindgen::to_value(&form).map_err(js_error)
}

/// Validate the JSON content returned by the LLM extractor.
///
/// Throws for non-conforming output and for records without any field.
#[wasm_bindgen]
pub fn parse_llm_content(content: &str) -> Result<JsValue, JsValue> {
    let record = llm::parse_record(content).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&record).map_err(js_error)
}

/// The instruction prompt sent to the LLM extractor.
#[wasm_bindgen]
pub fn llm_system_prompt() -> String {
    llm::SYSTEM_PROMPT.to_string()
}

/// Resume extractor class for browser use.
#[wasm_bindgen]
pub struct ResumeExtractor {
    config: ExtractionConfig,
    form: FormConfig,
}

#[wasm_bindgen]
impl ResumeExtractor {
    /// Create a new resume extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
            form: FormConfig::default(),
        }
    }

    /// Number of leading lines searched for contact details.
    #[wasm_bindgen]
    pub fn set_header_window(&mut self, lines: usize) {
        self.config.header_window = lines;
    }

    /// Maximum number of skills kept.
    #[wasm_bindgen]
    pub fn set_max_skills(&mut self, max_skills: usize) {
        self.config.max_skills = max_skills;
    }

    /// Recognize an additional language name.
    #[wasm_bindgen]
    pub fn add_language(&mut self, language: &str) {
        self.config.extra_languages.push(language.to_string());
    }

    /// Add a word that rules a line out as the candidate's name.
    #[wasm_bindgen]
    pub fn add_title_stopword(&mut self, word: &str) {
        self.config.extra_title_stopwords.push(word.to_string());
    }

    /// Replace the degree options used by `prefill`.
    #[wasm_bindgen]
    pub fn set_degree_options(&mut self, options: Vec<String>) {
        self.form.degree_options = options;
    }

    /// Replace the proficiency options used by `prefill`.
    #[wasm_bindgen]
    pub fn set_proficiency_options(&mut self, options: Vec<String>) {
        self.form.proficiency_options = options;
    }

    fn parser(&self) -> HeuristicResumeParser {
        HeuristicResumeParser::from_config(&self.config)
    }

    /// Extract a record from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser().parse(text).map_err(js_error)?;
        serde_wasm_bindgen::to_value(&result.record).map_err(js_error)
    }

    /// Get extraction result with metadata.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser().parse(text).map_err(js_error)?;

        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ExtractResult {
            record: ExtractedRecord,
            warnings: Vec<String>,
            sections: Vec<SectionKind>,
            processing_time_ms: u64,
        }

        let output = ExtractResult {
            record: result.record,
            warnings: result.warnings,
            sections: result.sections,
            processing_time_ms: result.processing_time_ms,
        };

        serde_wasm_bindgen::to_value(&output).map_err(js_error)
    }

    /// Extract from text and prefill an empty form in one step.
    #[wasm_bindgen]
    pub fn prefill(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser().parse(text).map_err(js_error)?;
        let form = FormPrefill::new(&self.form).prefill(&result.record);
        serde_wasm_bindgen::to_value(&form).map_err(js_error)
    }

    /// Map a degree string onto the configured degree options.
    #[wasm_bindgen]
    pub fn match_degree(&self, degree: &str) -> Option<String> {
        FormPrefill::new(&self.form).match_degree(degree).map(str::to_string)
    }

    /// Map a proficiency string onto the configured proficiency options.
    #[wasm_bindgen]
    pub fn match_proficiency(&self, level: &str) -> Option<String> {
        FieldMatcher::new(self.form.proficiency_options.iter().cloned())
            .best_match(level)
            .map(str::to_string)
    }
}

impl Default for ResumeExtractor {
    fn default() -> Self {
        Self::new()
    }
}
