/// Configuration system for bfhl.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: hardcoded in [`schema::BfhlConfig::default()`]
/// 2. **User global config**: `~/.bfhl/config.toml`
/// 3. **Project local config**: `.bfhl.toml` in the current working directory
/// 4. **Environment variables**: `BFHL_*` overrides (highest precedence)
///
/// # Usage
///
/// ```rust,ignore
/// use bfhl::config;
///
/// let cfg = config::load();
/// let client = bfhl::api::BfhlClient::from_config(&cfg.api);
/// ```
pub mod schema;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub use schema::BfhlConfig;

use crate::form::FormController;
use crate::form::field::{Field, FilterSelection};

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved bfhl configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars. File layers merge key by key, so a project file only overrides the
/// keys it sets.
pub fn load() -> BfhlConfig {
    let layers: Vec<String> = [global_config_path(), project_config_path()]
        .into_iter()
        .flatten()
        .filter_map(|path| fs::read_to_string(path).ok())
        .collect();

    let mut config = merge_layers(layers.iter().map(String::as_str));
    apply_env_overrides(&mut config);
    config
}

/// Merge TOML layers (lowest precedence first) over the built-in defaults.
///
/// A layer that is malformed, or that does not fit the schema on its own,
/// is skipped.
fn merge_layers<'a>(layers: impl IntoIterator<Item = &'a str>) -> BfhlConfig {
    let mut merged = toml::Value::Table(toml::map::Map::new());

    for text in layers {
        let Ok(layer) = toml::from_str::<toml::Value>(text) else {
            continue;
        };
        if layer.clone().try_into::<BfhlConfig>().is_err() {
            continue;
        }
        merge_toml(&mut merged, layer);
    }

    merged.try_into().unwrap_or_default()
}

/// Recursively overlay `overlay` onto `base`. Tables merge, anything else
/// replaces.
fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Build a form controller from the `[form]` section.
pub fn build_form(config: &BfhlConfig) -> FormController {
    let filters: FilterSelection = config
        .form
        .default_filters
        .iter()
        .filter_map(|name| name.parse::<Field>().ok())
        .collect();

    FormController::new()
        .with_banner_ttl(Duration::from_millis(config.form.error_timeout_ms))
        .with_filters(filters)
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.bfhl/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bfhl").join("config.toml"))
}

/// Path to the project local config: `.bfhl.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".bfhl.toml"))
}

pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `BFHL_API_URL`: endpoint URL
/// - `BFHL_API_TIMEOUT_MS`: request timeout
/// - `BFHL_WEB_ADDR`: listen address for `bfhl web`
/// - `BFHL_ERROR_TIMEOUT_MS`: error banner lifetime
/// - `BFHL_LOG`: submission log on/off (`1`/`true`/`yes`/`on`)
fn apply_env_overrides(config: &mut BfhlConfig) {
    if let Ok(val) = std::env::var("BFHL_API_URL")
        && !val.is_empty()
    {
        config.api.url = val;
    }
    if let Ok(val) = std::env::var("BFHL_API_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.api.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("BFHL_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
    if let Ok(val) = std::env::var("BFHL_ERROR_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.form.error_timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("BFHL_LOG") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.bfhl/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.bfhl/ directory")?;
    }

    fs::write(&path, BfhlConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single dotted config key (e.g. `api.timeout_ms`) in the global
/// config file, creating it from defaults if needed.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&BfhlConfig::default())
            .context("failed to serialize default config")?
    };

    let updated = update_toml_text(&content, key, value)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, updated).context("failed to write config file")?;

    Ok(())
}

/// Apply one dotted-key update to TOML text and return the new text.
///
/// The result must still deserialize as a [`BfhlConfig`].
fn update_toml_text(content: &str, key: &str, value: &str) -> Result<String> {
    let mut root: toml::Value =
        toml::from_str(content).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    toml::from_str::<BfhlConfig>(&output)
        .with_context(|| format!("'{value}' is not a valid value for '{key}'"))?;
    Ok(output)
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((leaf, sections)) = parts.split_last() else {
        anyhow::bail!("empty config key");
    };

    let mut current = root;
    for &part in sections {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current.as_table_mut().with_context(|| {
        format!(
            "expected table at '{}'",
            key.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
        )
    })?;

    let new_value = match table.get(*leaf) {
        None => anyhow::bail!("unknown config key '{key}'"),
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Array(_)) => {
            let items: Vec<toml::Value> = raw_value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| toml::Value::String(s.to_string()))
                .collect();
            toml::Value::Array(items)
        }
        Some(_) => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
