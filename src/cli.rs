use crate::ai::config::{API_KEY_ENV_VAR, DEFAULT_MODEL, MAX_WORD_COUNT, MIN_WORD_COUNT};
use clap::{ArgAction, Parser};

/// Flavour Fusion: AI-driven recipe blogging.
///
/// Generates a recipe blog post with Google's Generative AI from a topic and a target word
/// count. Values not given as flags are asked for interactively unless `--no-input` is set.
#[derive(Parser, Debug, Clone)]
#[command(name = "flavour-fusion", version, about, long_about = None)]
pub struct Cli {
    /// Google API key (get one from Google AI Studio)
    #[arg(long, env = API_KEY_ENV_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Recipe topic, e.g. "Vegan Chocolate Cake"
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Desired word count (approximate)
    #[arg(
        short = 'w',
        long = "words",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_WORD_COUNT)..=i64::from(MAX_WORD_COUNT))
    )]
    pub word_count: Option<u32>,

    /// Gemini model id
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Root URL of the models API, without the `/{model}:generateContent` suffix
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Never prompt; missing values are reported instead
    #[arg(long)]
    pub no_input: bool,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
