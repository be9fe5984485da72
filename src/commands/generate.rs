use crate::ai::config::DEFAULT_WORD_COUNT;
use crate::ai::{AIProvider, ApiError, BlogRequest, GeminiProvider, InputError};
use crate::cli::Cli;
use crate::generator::{generate_recipe_blog, BlogOutput, Severity};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{self, BufRead, Write};

const TITLE: &str = "🍲 Flavour Fusion: AI-Driven Recipe Blogging 🧑‍🍳";
const TAGLINE: &str = "Generate unique recipe blog posts using Google's Generative AI. Just provide a topic and desired word count!";
const FOOTER: &str = "Powered by Google Generative AI";

const API_KEY_LABEL: &str = "Enter your Google API Key: ";
const TOPIC_LABEL: &str = "Enter the Recipe Topic (e.g., 'Vegan Chocolate Cake', 'Quick Weeknight Pasta', 'Spicy Thai Green Curry'): ";

// Model ids end up in the request path
static MODEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.-]+$").expect("model id pattern is valid")
});

pub fn validate_model_name(model: &str) -> Result<(), InputError> {
    if !MODEL_REGEX.is_match(model) {
        return Err(InputError::InvalidModel(model.to_string()));
    }
    Ok(())
}

/// Everything one run needs, gathered from flags, environment and the interactive form.
#[derive(Debug, Clone)]
pub struct Settings {
    pub request: BlogRequest,
    pub model: String,
    pub base_url: Option<String>,
}

impl Settings {
    /// The credential is checked before the topic, then the word count and model id.
    pub fn validate(&self) -> Result<(), InputError> {
        self.request.validate()?;
        validate_model_name(&self.model)
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The generator ran; `None` means a post was printed
    Rendered(Option<Severity>),
    /// Input was rejected before any request was made
    Rejected(InputError),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Rendered(None) | Outcome::Rendered(Some(Severity::Warning)) => 0,
            Outcome::Rendered(Some(Severity::Error)) | Outcome::Rejected(_) => 1,
        }
    }
}

fn ask<R: BufRead, W: Write>(input: &mut R, prompt: &mut W, label: &str) -> Result<String, InputError> {
    write!(prompt, "{}", label).map_err(|e| InputError::Io(e.to_string()))?;
    prompt.flush().map_err(|e| InputError::Io(e.to_string()))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| InputError::Io(e.to_string()))?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Fill in whatever the command line left out. Prompts go to `prompt`, answers come from `input`.
/// With `--no-input` nothing is asked: a missing key or topic stays empty and fails validation.
pub fn collect_settings<R: BufRead, W: Write>(
    cli: &Cli,
    input: &mut R,
    prompt: &mut W,
) -> Result<Settings, InputError> {
    let interactive = !cli.no_input;

    let api_key = match &cli.api_key {
        Some(key) => key.clone(),
        None if interactive => ask(input, prompt, API_KEY_LABEL)?,
        None => String::new(),
    };

    let topic = match &cli.topic {
        Some(topic) => topic.clone(),
        None if interactive => ask(input, prompt, TOPIC_LABEL)?,
        None => String::new(),
    };

    let word_count = match cli.word_count {
        Some(count) => count,
        None if interactive => {
            let label = format!("Desired Word Count (approximate) [{}]: ", DEFAULT_WORD_COUNT);
            let answer = ask(input, prompt, &label)?;
            let answer = answer.trim();
            if answer.is_empty() {
                DEFAULT_WORD_COUNT
            } else {
                answer
                    .parse()
                    .map_err(|_| InputError::InvalidWordCount(answer.to_string()))?
            }
        }
        None => DEFAULT_WORD_COUNT,
    };

    Ok(Settings {
        request: BlogRequest {
            api_key,
            topic,
            word_count,
        },
        model: cli.model.clone(),
        base_url: cli.base_url.clone(),
    })
}

/// Build the real Gemini provider for a validated run.
pub fn gemini_provider(settings: &Settings) -> Result<Box<dyn AIProvider>, ApiError> {
    let provider = GeminiProvider::new(settings.request.api_key.clone(), settings.base_url.clone())?;
    Ok(Box::new(provider))
}

/// Print one generation result. The post alone goes to `out`, so it can be redirected to a file;
/// headings, warnings and errors go to `err`.
pub fn render<W: Write, E: Write>(output: &BlogOutput, out: &mut W, err: &mut E) -> io::Result<()> {
    writeln!(err, "Generated Recipe Blog Post:")?;
    match output {
        BlogOutput::Post(text) => {
            writeln!(out, "{}", text)?;
            out.flush()?;
        }
        BlogOutput::Issue(issue) => {
            // The message carries its own "Warning:"/"Error:" prefix
            writeln!(err, "{}", issue)?;
        }
    }
    Ok(())
}

/// The full form flow: banner, inputs, boundary validation, one generation, rendering.
/// `make_provider` is only called once the inputs are valid.
pub async fn run_generate<R, W, E, F>(
    cli: &Cli,
    input: &mut R,
    out: &mut W,
    err: &mut E,
    make_provider: F,
) -> io::Result<Outcome>
where
    R: BufRead,
    W: Write,
    E: Write,
    F: FnOnce(&Settings) -> Result<Box<dyn AIProvider>, ApiError>,
{
    writeln!(err, "{}", TITLE)?;
    writeln!(err, "{}\n", TAGLINE)?;

    let settings = match collect_settings(cli, input, err).and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Input rejected: {}", e);
            writeln!(err, "Warning: {}", e)?;
            return Ok(Outcome::Rejected(e));
        }
    };

    writeln!(
        err,
        "🧑‍🍳 Generating a delicious blog post on '{}'... This might take a moment...",
        settings.request.topic
    )?;

    let output =
        generate_recipe_blog(&settings.request, &settings.model, |_| make_provider(&settings)).await;

    render(&output, out, err)?;
    writeln!(err, "---\n{}", FOOTER)?;

    Ok(Outcome::Rendered(output.severity()))
}
