//! Recipe blog generation
//!
//! Builds the prompt, makes exactly one call to the generative API and turns
//! whatever comes back into a [`BlogOutput`]. Failures never escape as `Err`;
//! they become a [`GenerationError`] whose `Display` is the message shown to
//! the user.

use crate::ai::{
    prompts, AIProvider, ApiError, BlogRequest, GenerateContentResponse, ResponseText,
};
use crate::log_context;
use crate::utils::logger::log_async_operation;
use std::fmt;

/// How an issue should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("Error: The provided Google API Key is invalid. Please check and try again.")]
    InvalidApiKey,

    #[error("Error: API key valid, but might lack permissions for the Gemini API. Please check your Google Cloud Project settings.")]
    PermissionDenied,

    #[error("Error: Model '{model}' not found or inaccessible with your API key/region. Try alternatives like 'gemini-1.0-pro' or check available models in Google AI Studio. Original error: {details}")]
    ModelNotFound { model: String, details: String },

    #[error("{}", blocked_message(.reason, .partial))]
    Blocked {
        reason: String,
        partial: Option<String>,
    },

    #[error("Error: Could not parse the response content. Details: {0}")]
    Unparseable(String),

    #[error("Error: An unexpected error occurred during generation. Details: {0}")]
    Unexpected(String),

    #[error("Error: Received empty content from the API.")]
    EmptyResponse,
}

fn blocked_message(reason: &str, partial: &Option<String>) -> String {
    match partial {
        Some(text) => format!(
            "Warning: Content generation issue (Reason: {}). Partial content (if any): {}",
            reason, text
        ),
        None => format!(
            "Error: Content generation failed or was blocked (Reason: {}). No content available.",
            reason
        ),
    }
}

impl GenerationError {
    pub fn severity(&self) -> Severity {
        match self {
            GenerationError::Blocked {
                partial: Some(_), ..
            } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// Result of one generation run. Always renders to a single string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogOutput {
    /// Generated Markdown, exactly as the API returned it
    Post(String),
    Issue(GenerationError),
}

impl BlogOutput {
    /// `None` for a post
    pub fn severity(&self) -> Option<Severity> {
        match self {
            BlogOutput::Post(_) => None,
            BlogOutput::Issue(e) => Some(e.severity()),
        }
    }

}

impl fmt::Display for BlogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlogOutput::Post(text) => f.write_str(text),
            BlogOutput::Issue(e) => write!(f, "{}", e),
        }
    }
}

impl From<Result<String, GenerationError>> for BlogOutput {
    fn from(result: Result<String, GenerationError>) -> Self {
        match result {
            Ok(text) => BlogOutput::Post(text),
            Err(e) => BlogOutput::Issue(e),
        }
    }
}

/// Classify a transport failure into the user-facing taxonomy.
///
/// Categories are tried in a fixed order: invalid key, then permission, then
/// missing model. Each one accepts either the typed fields of an API error or
/// the legacy substring in its rendered text. Anything unrecognised is left to
/// the generic failure.
pub fn classify_api_error(error: &ApiError, model: &str) -> GenerationError {
    if let ApiError::InvalidResponse(details) = error {
        return GenerationError::Unparseable(details.clone());
    }

    let details = error.to_string();
    let (status, status_text, reason) = match error {
        ApiError::Api {
            status,
            status_text,
            reason,
            ..
        } => (Some(*status), status_text.as_deref(), reason.as_deref()),
        _ => (None, None, None),
    };

    if reason == Some("API_KEY_INVALID") || details.contains("API key not valid") {
        return GenerationError::InvalidApiKey;
    }

    if status == Some(403)
        || status_text == Some("PERMISSION_DENIED")
        || details.to_lowercase().contains("permission")
    {
        return GenerationError::PermissionDenied;
    }

    let not_found =
        status == Some(404) || status_text == Some("NOT_FOUND") || details.contains("404");
    if not_found && details.contains("models/") {
        return GenerationError::ModelNotFound {
            model: model.to_string(),
            details,
        };
    }

    GenerationError::Unexpected(details)
}

/// Interpret a successful HTTP response.
pub fn interpret_response(response: &GenerateContentResponse) -> Result<String, GenerationError> {
    match response.text() {
        ResponseText::Text(text) if text.is_empty() => Err(GenerationError::EmptyResponse),
        ResponseText::Text(text) => Ok(text),
        ResponseText::Blocked { reason, partial } => {
            log::warn!("Content generation potentially blocked. Reason: {}", reason);
            Err(GenerationError::Blocked { reason, partial })
        }
    }
}

pub struct BlogGenerator {
    provider: Box<dyn AIProvider>,
    model: String,
}

impl BlogGenerator {
    pub fn new(provider: Box<dyn AIProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Generate one post. Expects a request already validated at the boundary.
    pub async fn generate(&self, topic: &str, word_count: u32) -> BlogOutput {
        let context = log_context! {
            "provider" => self.provider.name(),
            "model" => self.model,
            "word_count" => word_count,
        };

        let result = log_async_operation(
            "generate_recipe_blog",
            context,
            self.try_generate(topic, word_count),
            |r: &Result<String, GenerationError>| r.as_ref().err().map(|e| e.to_string()),
        )
        .await;

        BlogOutput::from(result)
    }

    async fn try_generate(&self, topic: &str, word_count: u32) -> Result<String, GenerationError> {
        log::info!("Using model: {}", self.model);

        let prompt = prompts::build_blog_prompt(topic, word_count);
        log::debug!("Prompt length: {} chars", prompt.len());

        let response = self
            .provider
            .generate_content(&self.model, &prompt)
            .await
            .map_err(|e| {
                log::error!("An error occurred during API call or processing: {}", e);
                classify_api_error(&e, &self.model)
            })?;

        interpret_response(&response)
    }
}

/// Generate a recipe blog post: `(api_key, topic, word_count)` in, one output out.
///
/// `make_provider` turns the request's credential into a provider; its failure
/// is reported like any other failure. Expects a request already validated at
/// the boundary.
pub async fn generate_recipe_blog<F>(request: &BlogRequest, model: &str, make_provider: F) -> BlogOutput
where
    F: FnOnce(&BlogRequest) -> Result<Box<dyn AIProvider>, ApiError>,
{
    let provider = match make_provider(request) {
        Ok(provider) => provider,
        Err(e) => {
            log::error!("An error occurred during API call or processing: {}", e);
            return BlogOutput::Issue(classify_api_error(&e, model));
        }
    };

    BlogGenerator::new(provider, model)
        .generate(&request.topic, request.word_count)
        .await
}
