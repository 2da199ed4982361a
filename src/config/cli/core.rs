//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::hpo::ParameterValue;

/// Afinar: hyperparameter search over MLP and CNN image classifiers
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "afinar")]
#[command(version)]
#[command(about = "Declare a hyperparameter space, build classifier topologies and inspect search trials")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the declared search space
    Space(SpaceArgs),

    /// Build one model from an assignment
    Build(BuildArgs),

    /// Sample assignments and the models they build
    Sample(SampleArgs),

    /// Show recorded trials, best first
    Trials(TrialsArgs),

    /// Validate a configuration file
    Validate(ValidateArgs),

    /// Display information about a configuration
    Info(InfoArgs),
}

/// Arguments for the space command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SpaceArgs {
    /// Optional YAML configuration (model shape)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the build command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct BuildArgs {
    /// Assignment file (YAML or JSON mapping of name to value)
    #[arg(value_name = "ASSIGNMENT")]
    pub assignment: Option<PathBuf>,

    /// Set one hyperparameter, e.g. `--set model_type=cnn`
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, ParameterValue)>,

    /// Optional YAML configuration (model shape)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the layer-by-layer summary
    #[arg(long)]
    pub summary: bool,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the sample command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SampleArgs {
    /// Number of assignments to draw
    #[arg(short = 'n', long, default_value = "5")]
    pub count: usize,

    /// Random seed (overrides the config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional YAML configuration (model shape, seed)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the trials command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrialsArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show only the best N trials
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Parse `name=value`; booleans and integers are recognized, anything else is a choice
pub fn parse_key_value(s: &str) -> Result<(String, ParameterValue), String> {
    let (name, value) = s.split_once('=').ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{s}'"));
    }
    let value = value.trim();
    let value = match value {
        "true" => ParameterValue::Bool(true),
        "false" => ParameterValue::Bool(false),
        _ => value.parse::<i64>().map_or_else(|_| ParameterValue::from(value), ParameterValue::Int),
    };
    Ok((name.to_string(), value))
}
