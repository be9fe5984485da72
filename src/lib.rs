use clap::Parser;
use std::io;

pub mod ai;
pub mod cli;
pub mod commands;
pub mod generator;
pub mod utils;

#[cfg(test)]
mod tests;

use cli::Cli;
use commands::generate::{gemini_provider, run_generate};

/// Failures that stop the tool before or around a run. Generation problems are not among
/// them; those are rendered as output.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to start async runtime: {0}")]
    Runtime(io::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Parse arguments, set up logging and run one generation. Returns the process exit code.
pub fn run() -> Result<i32, AppError> {
    // A .env file may provide GOOGLE_API_KEY; it must be loaded before clap reads the environment
    let dotenv_path = dotenv::dotenv().ok();

    let cli = Cli::parse();
    utils::logger::init_logging(cli.verbose);

    if let Some(path) = dotenv_path {
        log::debug!("Loaded environment from {}", path.display());
    }
    log::debug!(
        "Starting flavour-fusion v{} (model: {}, no_input: {})",
        env!("CARGO_PKG_VERSION"),
        cli.model,
        cli.no_input
    );

    // One request at a time; a single-threaded runtime is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();

    let outcome = runtime.block_on(run_generate(
        &cli,
        &mut input,
        &mut out,
        &mut err,
        gemini_provider,
    ))?;

    log::debug!("Run finished: {:?}", outcome);
    Ok(outcome.exit_code())
}
