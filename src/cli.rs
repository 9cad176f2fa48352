//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::CommitType;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// review-tools - git change analysis and review tools for LLM agents
///
/// Lists pending diffs, derives conventional commit messages, and saves
/// review documents. Every command prints JSON on stdout.
///
/// Examples:
///   review-tools changes ./my-project
///   review-tools commit-message ./my-project --type fix
///   review-tools write-review reviews/pr-12.md --content-file notes.md
///   review-tools call generate_commit_message '{"directory": "."}'
///   review-tools init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    ///
    /// If not specified, looks for .reviewtools.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Paths to leave out of change listings (comma-separated, exact match)
    ///
    /// Example: --exclude "dist,package-lock.json"
    #[arg(long, value_name = "PATHS", value_delimiter = ',', global = true)]
    pub exclude: Option<Vec<String>>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List changed files with their unified diffs
    Changes {
        /// Root of the git working copy
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Print one combined diff for the whole tree instead of per-file JSON
        #[arg(long)]
        combined: bool,
    },

    /// Derive a conventional commit message from pending changes
    CommitMessage {
        /// Root of the git working copy
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Use this commit type instead of detecting one
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        commit_type: Option<CommitType>,
    },

    /// Save review text as a Markdown document
    WriteReview {
        /// Output document path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Review text (reads stdin when neither --content nor --content-file is given)
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,

        /// Read review text from a file
        #[arg(long, value_name = "PATH")]
        content_file: Option<PathBuf>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Leave out the generation timestamp
        #[arg(long)]
        no_timestamp: bool,
    },

    /// Print the tool definitions as JSON
    Tools,

    /// Execute one tool call as the agent runtime would
    Call {
        /// Tool name
        name: String,

        /// Tool arguments as a JSON object
        #[arg(default_value = "{}")]
        arguments: String,
    },

    /// Generate a default .reviewtools.toml configuration file
    InitConfig,
}

/// Exit code for a clap parse outcome.
fn parse_error_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

impl Args {
    /// Parse command-line arguments.
    ///
    /// Help and version output exit 0; any parse error exits 1.
    pub fn parse_args() -> Self {
        match Self::try_parse() {
            Ok(args) => args,
            Err(e) => match parse_error_exit_code(e.kind()) {
                0 => e.exit(),
                code => {
                    let _ = e.print();
                    std::process::exit(code);
                }
            },
        }
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        match &self.command {
            Command::Changes { dir, .. } | Command::CommitMessage { dir, .. } => {
                if dir.as_os_str().is_empty() {
                    return Err("Repository directory must not be empty".to_string());
                }
            }
            Command::WriteReview { file, .. } => {
                if file.as_os_str().is_empty() {
                    return Err("Review file path must not be empty".to_string());
                }
            }
            Command::Call { arguments, .. } => {
                let value: serde_json::Value = serde_json::from_str(arguments)
                    .map_err(|e| format!("Tool arguments are not valid JSON: {}", e))?;
                if !value.is_object() {
                    return Err("Tool arguments must be a JSON object".to_string());
                }
            }
            Command::Tools | Command::InitConfig => {}
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
