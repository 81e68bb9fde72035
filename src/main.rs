use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use bfhl::cli::{self, InputSource};

#[derive(Debug, Parser)]
#[command(name = "bfhl")]
#[command(about = "Submit JSON to the BFHL endpoint and view a filtered response")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Submit raw JSON (e.g. {"data": ["A","1"]}) and print the selected fields
    Submit {
        /// Raw JSON text. Read from --file or stdin when omitted
        input: Option<String>,
        /// Read the raw JSON from a file
        #[arg(long, conflicts_with = "input")]
        file: Option<PathBuf>,
        /// Field to display (repeatable): is_success, user_id, email,
        /// roll_number, numbers, alphabets, highest_alphabet
        #[arg(long = "filter", short = 'f', value_name = "NAME")]
        filters: Vec<String>,
        /// Display every field
        #[arg(long, conflicts_with = "filters")]
        all: bool,
        /// Output format: text (default), json
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// List the fields that can be displayed
    Fields,
    /// Serve the browser form
    Web {
        /// Listen address (default from config: 127.0.0.1:9747)
        #[arg(long)]
        addr: Option<String>,
        /// Do not open a browser window
        #[arg(long)]
        no_open: bool,
    },
    /// Show the submission log
    History {
        /// Number of recent submissions to list
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Output format: text (default), json
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Check configuration, endpoint and log status
    Health,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default config to ~/.bfhl/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `api.timeout_ms 5000`
    Set { key: String, value: String },
    /// Restore the default config file
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Submit {
            input,
            file,
            filters,
            all,
            format,
        } => {
            let source = match (input, file) {
                (Some(text), _) => InputSource::Inline(text),
                (None, Some(path)) => InputSource::File(path),
                (None, None) => InputSource::Stdin,
            };
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_submit(source, &filters, all, fmt)
        }
        Commands::Fields => cli::run_fields(),
        Commands::Web { addr, no_open } => cli::run_web(addr, no_open),
        Commands::History { limit, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_history(limit, fmt)
        }
        Commands::Health => cli::run_health(),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
