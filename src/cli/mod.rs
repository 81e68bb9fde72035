//! CLI command implementations for bfhl.
//!
//! Provides subcommand handlers for:
//! - `bfhl submit`: submit JSON to the endpoint and print the filtered response
//! - `bfhl fields`: list the fields that can be selected for display
//! - `bfhl web`: serve the browser form
//! - `bfhl history`: summarize the submission log
//! - `bfhl health`: check config files, endpoint and log
//! - `bfhl config show|init|set|reset`: configuration management

use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analytics::logger::{self, Surface};
use crate::analytics::reporter::{self, History};
use crate::api::BfhlClient;
use crate::config;
use crate::form::field::{Field, FilterSelection};
use crate::web::{self, WebApp};

/// Output format for commands that can emit machine-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

// ---------------------------------------------------------------------------
// bfhl submit
// ---------------------------------------------------------------------------

/// Where the raw JSON text comes from.
#[derive(Debug)]
pub enum InputSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl InputSource {
    fn read(self) -> Result<String> {
        match self {
            Self::Inline(text) => Ok(text),
            Self::File(path) => std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display())),
            Self::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read input from stdin")?;
                Ok(buf)
            }
        }
    }
}

/// Submit raw JSON and print the selected fields of the response.
///
/// Explicit `--filter` flags (or `--all`) replace the configured default
/// filters.
pub fn run_submit(
    source: InputSource,
    filters: &[String],
    all: bool,
    format: OutputFormat,
) -> Result<()> {
    let cfg = config::load();
    let mut form = config::build_form(&cfg);

    if all {
        form.set_filters(FilterSelection::all());
    } else if !filters.is_empty() {
        form.set_filters(FilterSelection::parse(filters)?);
    }

    form.set_input(source.read()?);

    let client = BfhlClient::from_config(&cfg.api);
    let start = Instant::now();
    let result = form.submit(&client);

    if cfg.logging.enabled {
        logger::log_submission(
            Surface::Cli,
            result.as_ref().map(|_| ()),
            form.last_item_count(),
            start.elapsed(),
        );
    }

    result.with_context(|| format!("submission to {} failed", client.url()))?;

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "response": form.response(),
                "filters": form.filters(),
                "rendered": form.rendered(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            if form.filters().is_empty() {
                eprintln!(
                    "{}",
                    "No fields selected. Use --filter NAME (see `bfhl fields`) or --all.".yellow()
                );
            }
            print!("{}", form.rendered());
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// bfhl fields
// ---------------------------------------------------------------------------

/// List the selectable fields.
pub fn run_fields() -> Result<()> {
    println!("{}", "Selectable fields".bold().cyan());
    println!("{}", "=".repeat(40));
    for field in Field::ALL {
        println!("  {:<20} {}", field.name(), field.label().dimmed());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// bfhl web
// ---------------------------------------------------------------------------

/// Serve the browser form until interrupted.
pub fn run_web(addr: Option<String>, no_open: bool) -> Result<()> {
    let cfg = config::load();
    let addr = addr.unwrap_or_else(|| cfg.web.addr.clone());
    let form = config::build_form(&cfg);
    let client = BfhlClient::from_config(&cfg.api);

    println!("  {} {}", "Endpoint:".bold(), client.url());
    let mut app = WebApp::new(form, client, cfg.logging.enabled);
    web::serve(&mut app, &addr, cfg.web.open_browser && !no_open)
}

// ---------------------------------------------------------------------------
// bfhl history
// ---------------------------------------------------------------------------

/// Summarize the submission log.
pub fn run_history(limit: usize, format: OutputFormat) -> Result<()> {
    let history = reporter::compute_history(limit);

    if history.total == 0 {
        println!(
            "{}",
            "No submissions logged yet. Run `bfhl submit` or `bfhl web` first.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_history_json(&history)?,
        OutputFormat::Text => print_history_table(&history),
    }
    Ok(())
}

fn print_history_table(history: &History) {
    println!("{}", "BFHL Submission History".bold().cyan());
    println!("{}", "=".repeat(60));
    println!("  {} {}", "Total submissions:".bold(), history.total);
    println!(
        "  {} {} ({:.1}%)",
        "Successful:       ".bold(),
        history.successes,
        history.success_pct()
    );
    println!(
        "  {} {} invalid input, {} API",
        "Failed:           ".bold(),
        history.invalid_input,
        history.api_errors
    );
    println!("  {} {} ms", "Avg latency:      ".bold(), history.avg_latency_ms);
    println!();

    println!("{}", "Recent".bold().cyan());
    println!(
        "  {:<26} {:<5} {:<8} {:<14} {:>6} {:>8}",
        "Time", "From", "Outcome", "Error", "Items", "Latency"
    );
    println!("  {}", "-".repeat(72));
    for entry in &history.recent {
        let outcome = if entry.is_success() {
            entry.outcome.green()
        } else {
            entry.outcome.red()
        };
        let error = match (&entry.error_kind, entry.status) {
            (Some(kind), Some(status)) => format!("{kind} ({status})"),
            (Some(kind), None) => kind.clone(),
            _ => "-".to_string(),
        };
        let items = entry
            .item_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<26} {:<5} {:<8} {:<14} {:>6} {:>6} ms",
            truncate(&entry.timestamp, 25),
            entry.surface,
            outcome,
            error,
            items,
            entry.latency_ms
        );
    }
}

fn print_history_json(history: &History) -> Result<()> {
    let value = serde_json::json!({
        "total": history.total,
        "successes": history.successes,
        "invalid_input": history.invalid_input,
        "api_errors": history.api_errors,
        "avg_latency_ms": history.avg_latency_ms,
        "recent": history.recent,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// bfhl health
// ---------------------------------------------------------------------------

/// Check config files, the configured endpoint and the submission log.
pub fn run_health() -> Result<()> {
    println!("{}", "BFHL Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();

    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.bfhl/config.toml found"
        } else {
            "not found (run `bfhl config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".bfhl.toml found"
        } else {
            "none (optional)"
        },
    );

    let url_ok = cfg.api.url.starts_with("http://") || cfg.api.url.starts_with("https://");
    print_health_item(
        "Endpoint",
        url_ok,
        &format!("{} (timeout {} ms)", cfg.api.url, cfg.api.timeout_ms),
    );
    print_health_item("Web address", true, &cfg.web.addr);

    let log_path = logger::submit_log_path();
    let log_exists = log_path.as_ref().is_some_and(|p| p.exists());
    let log_detail = match (cfg.logging.enabled, &log_path) {
        (false, _) => "disabled".to_string(),
        (true, Some(path)) if log_exists => path.display().to_string(),
        (true, _) => "enabled, no submissions yet".to_string(),
    };
    print_health_item("Submission log", cfg.logging.enabled, &log_detail);

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<25} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// bfhl config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective BFHL Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.bfhl/config.toml", global_exists);
    print_source(".bfhl.toml", project_exists);
    println!("  {} {}", "·".dimmed(), "BFHL_* environment variables".dimmed());
    Ok(())
}

fn print_source(label: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), label.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{label} (not found)").dimmed());
    }
}

/// Write the default config file.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses() {
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("text")), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Text);
    }

    #[test]
    fn truncate_respects_limit() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("2026-10-18T09:15:42.123456+00:00", 10), "2026-10-1…");
    }

    #[test]
    fn inline_source_reads_verbatim() {
        let text = InputSource::Inline(r#"{"data": []}"#.to_string()).read().unwrap();
        assert_eq!(text, r#"{"data": []}"#);
    }

    #[test]
    fn missing_file_source_is_error() {
        let err = InputSource::File(PathBuf::from("/definitely/not/here.json"))
            .read()
            .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
