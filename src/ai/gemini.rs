use super::config::*;
use super::{AIProvider, ApiError};
use crate::utils::logger::{log_event, LogEvent, NetworkDetails, NetworkStatus};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;

// Finish reasons that mean the candidate was withheld rather than completed
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

pub struct GeminiProvider {
    api_key: String,
    client: Client,
    base_url: String,
}

impl GeminiProvider {
    /// `base_url` is the models root, e.g. `https://generativelanguage.googleapis.com/v1beta/models`.
    /// No timeout is set; the reqwest default applies.
    pub fn new(api_key: String, base_url: Option<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key,
            client,
            base_url,
        })
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.base_url, model)
    }

    async fn make_single_request(
        &self,
        url: &str,
        request: &GeminiRequest,
    ) -> Result<GenerateContentResponse, ApiError> {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(parse_api_error(status.as_u16(), &error_text));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GenerateContentResponse, ApiError> {
        let url = self.endpoint(model);
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let started = Instant::now();
        let result = self.make_single_request(&url, &request).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        // Log the models root only; the key travels in a header, never in the URL
        let details = NetworkDetails {
            endpoint: format!("{}/{}", self.base_url, model),
            method: "POST".to_string(),
            status_code: match &result {
                Ok(_) => Some(200),
                Err(ApiError::Api { status, .. }) => Some(*status),
                Err(_) => None,
            },
        };
        let status = match &result {
            Ok(_) => NetworkStatus::Success,
            Err(e) => NetworkStatus::Failed {
                error: e.to_string(),
            },
        };
        log_event(LogEvent::Network {
            operation: "generateContent".to_string(),
            status,
            duration_ms,
            details: Some(details),
        });

        result
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

/// Turn a non-success response into a typed error. Falls back to the raw body when it is not
/// the usual `{"error": {...}}` envelope.
pub fn parse_api_error(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let error = envelope.error;
            let message = if error.message.is_empty() {
                error.status.clone().unwrap_or_else(|| "Unknown error".to_string())
            } else {
                error.message
            };
            ApiError::Api {
                status: error.code.unwrap_or(status),
                status_text: error.status,
                reason: error.details.into_iter().find_map(|d| d.reason),
                message,
            }
        }
        Err(_) => {
            let message = if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.trim().to_string()
            };
            ApiError::Api {
                status,
                status_text: None,
                reason: None,
                message,
            }
        }
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A content part. Non-text parts (inline data, function calls) deserialize with `text: None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// What a response yielded: the generated text, or a block with whatever fragment came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseText {
    Text(String),
    Blocked {
        reason: String,
        partial: Option<String>,
    },
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, `None` when there are none.
    pub fn parts_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let texts: Vec<&str> = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    /// Block reason from the prompt feedback, or a blocking finish reason on the first candidate.
    pub fn block_reason(&self) -> Option<&str> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Some(reason);
        }

        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .filter(|r| BLOCKING_FINISH_REASONS.contains(r))
    }

    pub fn text(&self) -> ResponseText {
        let parts_text = self.parts_text();

        if let Some(reason) = self.block_reason() {
            return ResponseText::Blocked {
                reason: reason.to_string(),
                partial: parts_text.filter(|t| !t.is_empty()),
            };
        }

        match parts_text {
            Some(text) => ResponseText::Text(text),
            None => {
                // No text and no explicit block: report any non-STOP finish reason
                let reason = self
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.as_deref())
                    .filter(|r| *r != "STOP")
                    .unwrap_or(UNKNOWN_BLOCK_REASON);
                ResponseText::Blocked {
                    reason: reason.to_string(),
                    partial: None,
                }
            }
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}
