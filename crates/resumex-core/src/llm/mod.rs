//! Request and response contract of the LLM record extractor.
//!
//! This module only builds chat-completion requests and validates the
//! replies; sending them is up to the caller.

pub mod prompt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CollaboratorError, ExtractionError, ResumexError};
use crate::models::config::LlmConfig;
use crate::models::record::ExtractedRecord;

pub use prompt::{IMAGE_INSTRUCTION, SYSTEM_PROMPT};

/// What the model gets to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmInput {
    /// Extracted resume text.
    Text(String),
    /// A page image, base64 encoded.
    Image { mime_type: String, data: String },
}

impl LlmInput {
    /// Encode raw image bytes.
    pub fn image(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::Image {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

/// OpenAI-compatible chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub response_format: ResponseFormat,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// The parts of a chat completion response we read.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|c| !c.trim().is_empty())
    }
}

/// Build the request for an input, picking the model by input kind.
pub fn build_request(config: &LlmConfig, input: &LlmInput) -> ChatRequest {
    let (model, content) = match input {
        LlmInput::Text(text) => (&config.text_model, MessageContent::Text(text.clone())),
        LlmInput::Image { mime_type, data } => (
            &config.vision_model,
            MessageContent::Parts(vec![
                ContentPart::Text {
                    text: IMAGE_INSTRUCTION.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:{mime_type};base64,{data}"),
                    },
                },
            ]),
        ),
    };

    ChatRequest {
        model: model.clone(),
        response_format: ResponseFormat {
            kind: "json_object".to_string(),
        },
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: MessageContent::Text(SYSTEM_PROMPT.to_string()),
            },
            ChatMessage {
                role: "user".to_string(),
                content,
            },
        ],
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(stripped)
        }
        None => text,
    }
}

/// Validate the model's JSON content and turn it into a record.
pub fn parse_record(content: &str) -> Result<ExtractedRecord, ResumexError> {
    let json = strip_json_fences(content);
    if json.is_empty() {
        return Err(CollaboratorError::EmptyResponse.into());
    }

    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| CollaboratorError::NonConforming(format!("invalid JSON: {e}")))?;
    if !value.is_object() {
        return Err(CollaboratorError::NonConforming("expected a JSON object".to_string()).into());
    }

    let record: ExtractedRecord = serde_json::from_value(value)
        .map_err(|e| CollaboratorError::NonConforming(e.to_string()))?;
    let record = record.normalize();

    if record.is_empty() {
        return Err(ExtractionError::NoExtractableContent.into());
    }

    debug!("LLM record with {} fields", record.field_count());
    Ok(record)
}

/// Read a raw chat completion response body.
pub fn parse_response(body: &str) -> Result<ExtractedRecord, ResumexError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CollaboratorError::NonConforming(format!("unexpected response body: {e}")))?;
    let content = response.text().ok_or(CollaboratorError::EmptyResponse)?;
    parse_record(content)
}
