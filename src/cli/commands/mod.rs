//! CLI command implementations

mod build;
mod info;
mod sample;
mod space;
mod trials;
mod validate;


use std::path::Path;

use serde::Serialize;

use crate::cli::LogLevel;
use crate::config::{load_config, Cli, Command, OutputFormat, TuneConfig};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    // Configure output based on verbose/quiet flags
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Space(args) => space::run_space(args, log_level),
        Command::Build(args) => build::run_build(args, log_level),
        Command::Sample(args) => sample::run_sample(args, log_level),
        Command::Trials(args) => trials::run_trials(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Info(args) => info::run_info(args, log_level),
    }
}

/// Load `path` if given, otherwise fall back to the default config
fn config_or_default(path: Option<&Path>) -> Result<TuneConfig, String> {
    match path {
        Some(path) => load_config(path).map_err(|e| format!("Config error: {e}")),
        None => Ok(TuneConfig::default()),
    }
}

/// Render `value` as JSON or YAML; `None` for text output
fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>, String> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(Some)
            .map_err(|e| format!("JSON serialization error: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(Some)
            .map_err(|e| format!("YAML serialization error: {e}")),
    }
}
