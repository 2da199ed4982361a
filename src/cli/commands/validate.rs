//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, TuneConfig, ValidateArgs};
use crate::model::HyperModel;

/// Format project configuration as a string
pub fn format_project_info(config: &TuneConfig) -> String {
    format!(
        "  Project: {}\n  Records: {}",
        config.project.name,
        config.project_dir().display()
    )
}

/// Format model configuration as a string
pub fn format_model_info(config: &TuneConfig) -> String {
    let [h, w, c] = config.model.input_shape;
    format!("  Input shape: {h}x{w}x{c}\n  Classes: {}", config.model.num_classes)
}

/// Format search configuration as a string
pub fn format_search_info(config: &TuneConfig) -> String {
    let mut lines = vec![
        format!("  Strategy: {}", config.strategy),
        format!("  Max trials: {}", config.max_trials),
        format!("  Epochs per trial: {}", config.epochs),
        format!("  Objective: {}", config.objective),
    ];
    if let Some(seed) = config.seed {
        lines.push(format!("  Seed: {seed}"));
    }
    if config.overwrite {
        lines.push("  Overwrite: previous trials are discarded".to_string());
    }
    lines.join("\n")
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Normal, &format!("Validating config: {}", args.config.display()));

    let config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    let space = config.model.search_space().map_err(|e| format!("Search space error: {e}"))?;

    log(level, LogLevel::Normal, "✓ Configuration is valid");

    if args.detailed {
        println!();
        println!("Project:");
        println!("{}", format_project_info(&config));
        println!("Model:");
        println!("{}", format_model_info(&config));
        println!("Search:");
        println!("{}", format_search_info(&config));
        println!("  Grid size: {}", space.cardinality());
    }

    Ok(())
}
