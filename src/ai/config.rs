/// Configuration constants for the Gemini-backed blog generator

/// Model used when none is given on the command line
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

/// Root of the generative language REST API, without the `/{model}:generateContent` suffix
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variable the credential may be read from (also honoured in `.env`)
pub const API_KEY_ENV_VAR: &str = "GOOGLE_API_KEY";

/// Header carrying the credential on every request
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Smallest word count a post may ask for
pub const MIN_WORD_COUNT: u32 = 150;

/// Largest word count a post may ask for
pub const MAX_WORD_COUNT: u32 = 3000;

/// Word count used when the user accepts the default
pub const DEFAULT_WORD_COUNT: u32 = 600;

/// Block reason reported when the API withholds content without saying why
pub const UNKNOWN_BLOCK_REASON: &str = "Unknown";
