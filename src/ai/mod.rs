use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod gemini;
pub mod prompts;

pub use config::{DEFAULT_MODEL, DEFAULT_WORD_COUNT, MAX_WORD_COUNT, MIN_WORD_COUNT};
pub use gemini::{GeminiProvider, GenerateContentResponse, ResponseText};


/// One blog generation request, alive for a single request/response cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogRequest {
    #[serde(skip_serializing, default)] // Don't serialize API key
    pub api_key: String,
    pub topic: String,
    pub word_count: u32,
}

impl BlogRequest {
    /// Boundary validation. The generator itself assumes a validated request.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.api_key.trim().is_empty() {
            return Err(InputError::MissingApiKey);
        }

        if self.topic.trim().is_empty() {
            return Err(InputError::EmptyTopic);
        }

        if !(MIN_WORD_COUNT..=MAX_WORD_COUNT).contains(&self.word_count) {
            return Err(InputError::WordCountOutOfRange(self.word_count));
        }

        Ok(())
    }
}

/// Problems caught before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Please enter your Google API Key.")]
    MissingApiKey,

    #[error("Please enter a recipe topic.")]
    EmptyTopic,

    #[error("Word count must be between {min} and {max}, got {0}", min = MIN_WORD_COUNT, max = MAX_WORD_COUNT)]
    WordCountOutOfRange(u32),

    #[error("Word count must be a whole number, got '{0}'")]
    InvalidWordCount(String),

    #[error("Invalid model name format: '{0}'")]
    InvalidModel(String),

    #[error("Failed to read input: {0}")]
    Io(String),
}

/// Transport-level failures from the generative API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP status. Renders as `"{status} {message}"`, the shape upstream client
    /// libraries use, so the rendered text can still be matched by substring.
    #[error("{status} {message}")]
    Api {
        status: u16,
        /// Canonical status name from the error body, e.g. `PERMISSION_DENIED`
        status_text: Option<String>,
        /// First `details[].reason`, e.g. `API_KEY_INVALID`
        reason: Option<String>,
        message: String,
    },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Send one prompt to `model` and return the raw response.
    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GenerateContentResponse, ApiError>;

    fn name(&self) -> &'static str;
}
