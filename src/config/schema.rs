/// Configuration schema and defaults for bfhl.
///
/// Defines the TOML-serializable configuration structure with the sections
/// `[api]`, `[web]`, `[form]` and `[logging]`.
///
/// Every field has a sensible built-in default. Users only need to set the
/// values they want to override.
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_URL;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level bfhl configuration.
///
/// Maps directly to the `~/.bfhl/config.toml` and `.bfhl.toml` file schemas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BfhlConfig {
    pub api: ApiConfig,
    pub web: WebConfig,
    pub form: FormConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// Remote endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Full URL the form posts to.
    pub url: String,
    /// Request timeout (milliseconds).
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            timeout_ms: 30_000,
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Embedded browser form server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address for `bfhl web`.
    pub addr: String,
    /// Open the page in the default browser on start.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9747".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [form]
// ---------------------------------------------------------------------------

/// Form behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// How long the error banner stays up (milliseconds).
    pub error_timeout_ms: u64,
    /// Filters selected when a form is first created. Unknown names are
    /// ignored.
    pub default_filters: Vec<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            error_timeout_ms: 6000,
            default_filters: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Submission log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append one record per submit to `~/.bfhl/submit-log.jsonl`.
    pub enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl BfhlConfig {
    /// Annotated default config written by `bfhl config init`.
    pub fn default_toml() -> String {
        format!(
            r#"# bfhl configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (BFHL_*)
#   2. Project config (.bfhl.toml in current directory)
#   3. User global config (~/.bfhl/config.toml)
#   4. Built-in defaults

[api]
url = "{DEFAULT_API_URL}"
timeout_ms = 30000

[web]
addr = "127.0.0.1:9747"
open_browser = true

[form]
error_timeout_ms = 6000               # Error banner auto-dismiss
default_filters = []                  # e.g. ["numbers", "alphabets"]

[logging]
enabled = true                        # ~/.bfhl/submit-log.jsonl
"#
        )
    }
}
