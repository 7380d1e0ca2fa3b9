//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod check;
mod config_cmd;
mod parse;
mod rows;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use intake::config::{Config, ExtractionMode};

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Resume field extraction and candidate tracking")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Field extraction mode as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Pattern heuristics only
    Regex,
    /// Named-entity recognition for the name
    Ner,
    /// Local LLM for identity fields
    Llm,
}

impl From<ModeArg> for ExtractionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Regex => ExtractionMode::Regex,
            ModeArg::Ner => ExtractionMode::Ner,
            ModeArg::Llm => ExtractionMode::Llm,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse resumes and print the extracted fields (nothing is stored)
    Parse {
        /// Resume files or directories of resumes
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Extraction mode (overrides config)
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
        /// Print records as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Parse resumes, check for re-applicants, and append them to the record store
    Run {
        /// Resume files or directories of resumes
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Extraction mode (overrides config)
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
        /// Store every candidate without checking for duplicates
        #[arg(long)]
        no_duplicate_check: bool,
        /// Skip emails already stored within this many days (time-window policy)
        #[arg(long)]
        window_days: Option<i64>,
    },

    /// Inspect and update stored candidate rows
    Rows {
        #[command(subcommand)]
        command: RowsCommands,
    },

    /// Check that extraction tools, OCR, and the LLM are available
    Check,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum RowsCommands {
    /// List stored candidates
    List {
        /// Only rows with this status
        #[arg(short, long)]
        status: Option<String>,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a row's review status
    SetStatus {
        /// Row serial number
        serial: u64,
        /// New status (New, Re-Applicant, Reviewed, Shortlisted, Rejected)
        status: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Parse { files, mode, json } => {
            parse::cmd_parse(config, &files, mode.map(Into::into), json).await
        }
        Commands::Run {
            files,
            mode,
            no_duplicate_check,
            window_days,
        } => {
            let options = run::RunOptions {
                mode: mode.map(Into::into),
                duplicate_check: !no_duplicate_check,
                window_days,
            };
            run::cmd_run(config, &files, options).await
        }
        Commands::Rows { command } => match command {
            RowsCommands::List { status, json } => {
                rows::cmd_rows_list(&config, status.as_deref(), json)
            }
            RowsCommands::SetStatus { serial, status } => {
                rows::cmd_rows_set_status(&config, serial, &status)
            }
        },
        Commands::Check => check::cmd_check(&config).await,
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_cmd::cmd_config_show(&config),
        },
    }
}
