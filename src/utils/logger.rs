use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

/// Structured logging utilities for Flavour Fusion
///
/// Every generation run logs the same few shapes so a single request can be
/// followed from the form to the API and back:
/// - **Operations** (`generate_recipe_blog`): start, completion time, failure
/// - **Network calls** (`generateContent`): outcome, duration, endpoint
///
/// The API key never appears in any event. Endpoints are logged without it
/// because the key travels in a header.

/// Structured log event types
#[derive(Debug, Clone, Serialize)]
pub enum LogEvent {
    Operation {
        name: String,
        phase: OperationPhase,
        #[serde(skip_serializing_if = "Option::is_none")]
        context: Option<LogContext>,
    },
    Network {
        operation: String,
        status: NetworkStatus,
        duration_ms: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<NetworkDetails>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub enum OperationPhase {
    Start,
    Complete { duration_ms: u64 },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct LogContext {
    #[serde(flatten)]
    pub fields: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub enum NetworkStatus {
    Success,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkDetails {
    pub endpoint: String,
    pub method: String,
    pub status_code: Option<u16>,
}

/// Render one structured event through the `log` facade
pub fn log_event(event: LogEvent) {
    match event {
        LogEvent::Operation { name, phase, context } => {
            let ctx_str = context.map(|c| format!(" | {:?}", c.fields)).unwrap_or_default();
            match phase {
                OperationPhase::Start => {
                    log::info!("🚀 {} STARTING{}", name, ctx_str);
                }
                OperationPhase::Complete { duration_ms } => {
                    log::info!("✅ {} COMPLETE in {}ms{}", name, duration_ms, ctx_str);
                }
                OperationPhase::Failed { error } => {
                    log::error!("❌ {} FAILED: {}{}", name, error, ctx_str);
                }
            }
        }
        LogEvent::Network { operation, status, duration_ms, details } => {
            let detail_str = details
                .map(|d| {
                    let code = d.status_code.map(|c| format!(" -> {}", c)).unwrap_or_default();
                    format!(" | {} {}{}", d.method, d.endpoint, code)
                })
                .unwrap_or_default();
            match status {
                NetworkStatus::Success => {
                    log::info!("🌐 {} SUCCESS in {}ms{}", operation, duration_ms, detail_str);
                }
                NetworkStatus::Failed { error } => {
                    log::error!("❌ {} FAILED after {}ms: {}{}", operation, duration_ms, error, detail_str);
                }
            }
        }
    }
}

/// Log an async operation's start, then its completion or failure with timing.
/// `describe` decides whether the result counts as a failure and how to word it.
pub async fn log_async_operation<Fut, R>(
    name: &str,
    context: HashMap<String, String>,
    fut: Fut,
    describe: impl FnOnce(&R) -> Option<String>,
) -> R
where
    Fut: std::future::Future<Output = R>,
{
    let context = if context.is_empty() {
        None
    } else {
        Some(LogContext { fields: context })
    };

    log_event(LogEvent::Operation {
        name: name.to_string(),
        phase: OperationPhase::Start,
        context: context.clone(),
    });

    let start = Instant::now();
    let result = fut.await;
    let duration_ms = start.elapsed().as_millis() as u64;

    let phase = match describe(&result) {
        Some(error) => OperationPhase::Failed { error },
        None => OperationPhase::Complete { duration_ms },
    };
    log_event(LogEvent::Operation {
        name: name.to_string(),
        phase,
        context,
    });

    result
}

/// Map `-v` repetitions to a filter for this crate; dependencies stay at `warn`.
pub fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    format!("warn,flavour_fusion_lib={level},flavour_fusion={level}")
}

/// Initialise `env_logger` once. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let env = env_logger::Env::default().default_filter_or(default_filter(verbosity));
    let result = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .format_target(false)
        .try_init();

    if let Err(e) = result {
        // Already initialised, e.g. a second run() in the same process
        log::debug!("Logger already initialised: {}", e);
    }
}

/// Macro for quick context creation. Skips the allocation when debug logs are filtered out.
#[macro_export]
macro_rules! log_context {
    ($($key:expr => $value:expr),* $(,)?) => {
        {
            if log::log_enabled!(log::Level::Debug) {
                let mut context = std::collections::HashMap::new();
                $(
                    context.insert($key.to_string(), $value.to_string());
                )*
                context
            } else {
                std::collections::HashMap::new()
            }
        }
    };
}
