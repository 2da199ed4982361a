//! Build command implementation

use std::fs;
use std::path::Path;

use serde::Serialize;

use super::{config_or_default, render};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::BuildArgs;
use crate::hpo::{Assignment, ParameterValue};
use crate::model::{build_assignment, HyperModel, ModelSpec, ModelSummary};

/// Structured output of one build
#[derive(Debug, Serialize)]
pub struct BuildReport {
    pub model: ModelSpec,
    pub active: Assignment,
    pub unused: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ModelSummary>,
}

/// Read an assignment file; YAML and JSON mappings are both accepted
pub fn read_assignment(path: &Path) -> Result<Assignment, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    if text.trim().is_empty() {
        return Ok(Assignment::new());
    }
    serde_yaml::from_str(&text).map_err(|e| format!("Failed to parse assignment {}: {e}", path.display()))
}

/// Merge the file assignment with `--set` overrides; later values win
pub fn collect_assignment(file: Option<&Path>, sets: &[(String, ParameterValue)]) -> Result<Assignment, String> {
    let base = match file {
        Some(path) => read_assignment(path)?,
        None => Assignment::new(),
    };
    Ok(sets.iter().fold(base, |acc, (name, value)| acc.with(name.as_str(), value.clone())))
}

pub fn run_build(args: BuildArgs, level: LogLevel) -> Result<(), String> {
    let config = config_or_default(args.config.as_deref())?;
    let assignment = collect_assignment(args.assignment.as_deref(), &args.set)?;
    let space = config.model.search_space().map_err(|e| format!("Search space error: {e}"))?;

    let built = build_assignment(&config.model, &space, &assignment).map_err(|e| format!("Build error: {e}"))?;
    let summary = if args.summary {
        Some(built.spec.summary().map_err(|e| format!("Summary error: {e}"))?)
    } else {
        None
    };

    let report = BuildReport { model: built.spec, active: built.active, unused: built.unused, summary };
    if let Some(out) = render(&report, args.format)? {
        println!("{out}");
        return Ok(());
    }

    log(level, LogLevel::Normal, &format!("Model: {}", report.model));
    log(level, LogLevel::Verbose, &format!("Active: {}", report.active));
    if !report.unused.is_empty() {
        log(level, LogLevel::Normal, &format!("Unused: {}", report.unused.join(", ")));
    }
    if let Some(summary) = &report.summary {
        println!();
        println!("{summary}");
    }
    Ok(())
}
