//! End-to-end form flow: inputs, boundary validation, generation and rendering
//!
//! The generator must not be invoked at all when the key or topic is missing.

use super::test_providers::{MockProvider, ScriptedProvider};
use crate::ai::{AIProvider, ApiError, InputError};
use crate::cli::Cli;
use crate::commands::generate::{run_generate, Outcome, Settings};
use crate::generator::Severity;
use std::io::Cursor;

fn cli(api_key: Option<&str>, topic: Option<&str>) -> Cli {
    Cli {
        api_key: api_key.map(str::to_string),
        topic: topic.map(str::to_string),
        word_count: Some(600),
        model: "gemini-1.5-pro-latest".to_string(),
        base_url: None,
        no_input: true,
        verbose: 0,
    }
}

/// Provider factory whose provider fails the test if it is ever asked to generate
fn never_called(_settings: &Settings) -> Result<Box<dyn AIProvider>, ApiError> {
    let mut mock = MockProvider::new();
    mock.expect_name().return_const("mock");
    mock.expect_generate_content().never();
    Ok(Box::new(mock))
}

struct Run {
    outcome: Outcome,
    stdout: String,
    stderr: String,
}

async fn run<F>(cli: &Cli, stdin: &str, make_provider: F) -> Run
where
    F: FnOnce(&Settings) -> Result<Box<dyn AIProvider>, ApiError>,
{
    let mut input = Cursor::new(stdin.to_string());
    let mut out = Vec::new();
    let mut err = Vec::new();

    let outcome = run_generate(cli, &mut input, &mut out, &mut err, make_provider)
        .await
        .unwrap();

    Run {
        outcome,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

#[tokio::test]
async fn test_missing_api_key_skips_generation() {
    let mut factory_called = false;
    let result = run(&cli(None, Some("Vegan Chocolate Cake")), "", |s| {
        factory_called = true;
        never_called(s)
    })
    .await;

    assert!(!factory_called);
    assert_eq!(result.outcome, Outcome::Rejected(InputError::MissingApiKey));
    assert_eq!(result.outcome.exit_code(), 1);
    assert!(result.stderr.contains("Please enter your Google API Key."));
    assert!(result.stdout.is_empty());
}

#[tokio::test]
async fn test_empty_topic_skips_generation() {
    let result = run(&cli(Some("key-123"), Some("")), "", never_called).await;

    assert_eq!(result.outcome, Outcome::Rejected(InputError::EmptyTopic));
    assert!(result.stderr.contains("Please enter a recipe topic."));
    assert!(result.stdout.is_empty());
}

#[tokio::test]
async fn test_whitespace_topic_skips_generation() {
    let result = run(&cli(Some("key-123"), Some("   ")), "", never_called).await;
    assert_eq!(result.outcome, Outcome::Rejected(InputError::EmptyTopic));
}

#[tokio::test]
async fn test_key_is_checked_before_topic() {
    let result = run(&cli(None, None), "", never_called).await;
    assert_eq!(result.outcome, Outcome::Rejected(InputError::MissingApiKey));
}

#[tokio::test]
async fn test_invalid_model_skips_generation() {
    let mut args = cli(Some("key-123"), Some("Pho"));
    args.model = "models/../../v1/files".to_string();

    let result = run(&args, "", never_called).await;
    assert!(matches!(
        result.outcome,
        Outcome::Rejected(InputError::InvalidModel(_))
    ));
}

#[tokio::test]
async fn test_successful_run_prints_post_to_stdout() {
    let post = "# Quick Weeknight Pasta\n\n## Ingredients\n* 200g spaghetti";
    let result = run(&cli(Some("key-123"), Some("Quick Weeknight Pasta")), "", |_| {
        Ok(Box::new(ScriptedProvider::with_text(post)))
    })
    .await;

    assert_eq!(result.outcome, Outcome::Rendered(None));
    assert_eq!(result.outcome.exit_code(), 0);
    assert_eq!(result.stdout, format!("{}\n", post));
    assert!(result
        .stderr
        .contains("Generating a delicious blog post on 'Quick Weeknight Pasta'"));
    assert!(result.stderr.contains("Powered by Google Generative AI"));
}

#[tokio::test]
async fn test_interactive_answers_feed_the_request() {
    let mut args = cli(None, None);
    args.no_input = false;
    args.word_count = None;

    let provider = ScriptedProvider::with_text("post");
    let calls = provider.calls.clone();

    let result = run(&args, "typed-key\nShakshuka\n450\n", move |settings| {
        assert_eq!(settings.request.api_key, "typed-key");
        assert_eq!(settings.request.word_count, 450);
        Ok(Box::new(provider))
    })
    .await;

    assert_eq!(result.outcome, Outcome::Rendered(None));
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].1.contains("**Topic:** Shakshuka"));
    assert!(calls[0].1.contains("450 words"));
}

#[tokio::test]
async fn test_blocked_partial_is_a_warning() {
    let result = run(&cli(Some("key-123"), Some("Fugu")), "", |_| {
        Ok(Box::new(ScriptedProvider::responding(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Slice thinly"}]},
                "finishReason": "SAFETY"
            }]
        }))))
    })
    .await;

    assert_eq!(result.outcome, Outcome::Rendered(Some(Severity::Warning)));
    assert_eq!(result.outcome.exit_code(), 0);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.contains("Partial content (if any): Slice thinly"));
}

#[tokio::test]
async fn test_api_failure_is_rendered_not_raised() {
    let result = run(&cli(Some("bad-key"), Some("Pho")), "", |_| {
        Ok(Box::new(ScriptedProvider::failing(|| {
            ApiError::NetworkError("400 API key not valid. Please pass a valid API key.".to_string())
        })))
    })
    .await;

    assert_eq!(result.outcome, Outcome::Rendered(Some(Severity::Error)));
    assert!(result
        .stderr
        .contains("Error: The provided Google API Key is invalid. Please check and try again."));
}

#[tokio::test]
async fn test_provider_construction_failure_is_rendered() {
    let result = run(&cli(Some("key-123"), Some("Pho")), "", |_| {
        Err(ApiError::NetworkError("Failed to create HTTP client: tls".to_string()))
    })
    .await;

    assert_eq!(result.outcome, Outcome::Rendered(Some(Severity::Error)));
    assert!(result
        .stderr
        .contains("Error: An unexpected error occurred during generation."));
}
