//! Info command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, InfoArgs};

use super::render;

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    if let Some(out) = render(&config, args.format)? {
        println!("{out}");
        return Ok(());
    }

    log(level, LogLevel::Normal, "Configuration Info:");
    println!();
    println!("Project: {}", config.project_dir().display());
    let [h, w, c] = config.model.input_shape;
    println!("Model: image classifier {h}x{w}x{c} -> {} classes", config.model.num_classes);
    println!("Strategy: {}", config.strategy);
    println!("Max trials: {}", config.max_trials);
    println!("Epochs: {}", config.epochs);
    println!("Objective: {}", config.objective);
    if let Some(seed) = config.seed {
        println!("Seed: {seed}");
    }
    Ok(())
}
