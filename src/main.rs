//! review-tools - change analysis and review tools for LLM code-review agents
//!
//! Exposes three tools to an agent runtime: per-file git diffs, a
//! conventional commit message derived from pending changes, and review
//! documents written to disk.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (repository access, bad arguments, failed tool call or write)

mod agent;
mod cli;
mod commit;
mod config;
mod error;
mod models;
mod report;
mod vcs;

use agent::{ToolCall, ToolExecutor};
use anyhow::{Context, Result};
use cli::{Args, Command};
use config::Config;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if let Command::InitConfig = args.command {
        return handle_init_config();
    }

    init_logging(&args);
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .reviewtools.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE))?;

    println!("Created {} with default settings.", config::CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings. Logs go to stderr.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the selected command. Returns the exit code.
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    match args.command {
        Command::Changes { dir, combined } => {
            if combined {
                let text = vcs::GitReader::open(&dir)?.diff_all()?;
                print!("{}", text);
            } else {
                let changes = vcs::list_changes(&dir, &config.changes.excludes)?;
                print_json(&changes)?;
            }
            Ok(0)
        }
        Command::CommitMessage { dir, commit_type } => {
            let outcome = commit::generate_commit_message(&dir, commit_type)?;
            print_json(&outcome)?;
            Ok(0)
        }
        Command::WriteReview {
            file,
            content,
            content_file,
            title,
            no_timestamp,
        } => {
            let content = read_review_content(content, content_file.as_deref())?;
            let options = config
                .review
                .options(title.as_deref(), no_timestamp.then_some(false));

            let result = report::write_review(&file, &content, &options);
            print_json(&result)?;
            Ok(if result.success { 0 } else { 1 })
        }
        Command::Tools => {
            print_json(&agent::get_tool_definitions())?;
            Ok(0)
        }
        Command::Call { name, arguments } => {
            let arguments = serde_json::from_str(&arguments).context("Invalid tool arguments")?;
            let executor = ToolExecutor::new(config.changes.excludes, config.review);

            info!("Calling tool {}", name);
            let result = executor.execute(&ToolCall::new(&name, arguments)).await;
            print_json(&result)?;
            Ok(if result.success { 0 } else { 1 })
        }
        Command::InitConfig => Ok(0),
    }
}

/// Review text from --content, --content-file, or stdin.
fn read_review_content(content: Option<String>, content_file: Option<&Path>) -> Result<String> {
    if let Some(content) = content {
        return Ok(content);
    }

    if let Some(path) = content_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read review content: {}", path.display()));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read review content from stdin")?;
    Ok(buffer)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", output);
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
