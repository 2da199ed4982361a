//! Space command implementation

use super::{config_or_default, render};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::SpaceArgs;
use crate::hpo::HyperparameterSpace;
use crate::model::HyperModel;

/// Format the space as an aligned table
pub fn format_space(space: &HyperparameterSpace) -> String {
    let width = space.names().into_iter().map(str::len).max().unwrap_or(4).max(4);
    let mut lines = vec![format!("  {:<width$}  {:<12}  Domain", "Name", "Kind")];
    for param in space.iter() {
        lines.push(format!("  {:<width$}  {:<12}  {}", param.name, param.domain.kind(), param.domain));
    }
    lines.join("\n")
}

pub fn run_space(args: SpaceArgs, level: LogLevel) -> Result<(), String> {
    let config = config_or_default(args.config.as_deref())?;
    let space = config.model.search_space().map_err(|e| format!("Search space error: {e}"))?;

    if let Some(out) = render(&space, args.format)? {
        println!("{out}");
        return Ok(());
    }

    log(level, LogLevel::Normal, "Search Space:");
    println!("{}", format_space(&space));
    println!();
    println!("Parameters: {}", space.len());
    println!("Grid size: {}", space.cardinality());
    Ok(())
}
