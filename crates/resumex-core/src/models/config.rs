//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{ResumexError, Result};

/// Main configuration for resumex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumexConfig {
    /// Heuristic extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// LLM collaborator configuration.
    pub llm: LlmConfig,

    /// Candidate form option lists.
    pub form: FormConfig,
}

/// Heuristic extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of leading lines searched for contact details.
    pub header_window: usize,

    /// Maximum number of skills kept.
    pub max_skills: usize,

    /// Languages recognized in addition to the built-in list.
    pub extra_languages: Vec<String>,

    /// Words that disqualify a line from being the candidate's name,
    /// in addition to the built-in job-title list.
    pub extra_title_stopwords: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            header_window: 7,
            max_skills: 20,
            extra_languages: Vec::new(),
            extra_title_stopwords: Vec::new(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Below this many characters of embedded text a PDF is treated as scanned.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 100 }
    }
}

/// LLM collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API.
    pub api_base: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Model used for text input.
    pub text_model: String,

    /// Model used for image input.
    pub vision_model: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Attempts on rate limiting or server errors.
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            text_model: "gpt-3.5-turbo-0125".to_string(),
            vision_model: "gpt-4o".to_string(),
            timeout_secs: 120,
            max_retries: 3,
        }
    }
}

/// Option lists of the candidate form's select fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub degree_options: Vec<String>,
    pub proficiency_options: Vec<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            degree_options: ["Bachelors", "Masters", "PhD", "Diploma", "Certificate"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            proficiency_options: [
                "Basic",
                "Intermediate",
                "Fluent",
                "Native",
                "Conversational",
                "Beginner",
                "Proficient",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl ResumexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ResumexError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ResumexError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ResumexConfig =
            serde_json::from_str(r#"{"extraction": {"max_skills": 15}}"#).unwrap();

        assert_eq!(config.extraction.max_skills, 15);
        assert_eq!(config.extraction.header_window, 7);
        assert_eq!(config.pdf.min_text_length, 100);
        assert_eq!(config.llm.vision_model, "gpt-4o");
        assert_eq!(config.form.degree_options.len(), 5);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let path = std::env::temp_dir().join(format!("resumex-config-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();

        let result = ResumexConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ResumexError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ResumexConfig::from_file(std::path::Path::new("/nonexistent/resumex.json"));
        assert!(matches!(result, Err(ResumexError::Io(_))));
    }
}
