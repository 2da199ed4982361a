//! Trials command implementation

use super::render;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, TrialsArgs};
use crate::tracking::{JsonDirRecorder, TrialRecord, TrialRecorder};
use crate::tuner::Objective;

/// Load recorded trials, best first
pub fn ranked_trials(recorder: &JsonDirRecorder, objective: &Objective) -> crate::Result<Vec<TrialRecord>> {
    let mut records = recorder.load_trials()?;
    records.sort_by(|a, b| objective.rank(a, b));
    Ok(records)
}

/// Format one leaderboard row
pub fn format_trial_row(rank: usize, record: &TrialRecord) -> String {
    let score = record.score.map_or_else(|| "-".to_string(), |s| format!("{s:.4}"));
    format!("  {rank:>4}  {:>5}  {:<9}  {score:>8}  {}", record.trial_id, record.status, record.assignment)
}

pub fn run_trials(args: TrialsArgs, level: LogLevel) -> Result<(), String> {
    let config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    let recorder = JsonDirRecorder::new(config.project_dir());
    let mut records = ranked_trials(&recorder, &config.objective).map_err(|e| format!("Tracking error: {e}"))?;
    let total = records.len();
    if let Some(top) = args.top {
        records.truncate(top);
    }

    if let Some(out) = render(&records, args.format)? {
        println!("{out}");
        return Ok(());
    }

    if total == 0 {
        log(level, LogLevel::Normal, &format!("No trials recorded in {}", recorder.dir().display()));
        return Ok(());
    }

    log(
        level,
        LogLevel::Normal,
        &format!("Trials in {} ({total} recorded, objective {}):", recorder.dir().display(), config.objective),
    );
    println!("  {:>4}  {:>5}  {:<9}  {:>8}  Assignment", "Rank", "Trial", "Status", "Score");
    for (i, record) in records.iter().enumerate() {
        println!("{}", format_trial_row(i + 1, record));
        if let Some(model) = &record.model {
            log(level, LogLevel::Verbose, &format!("{:>31}{model}", ""));
        }
        if let Some(error) = &record.error {
            log(level, LogLevel::Verbose, &format!("{:>31}error: {error}", ""));
        }
    }
    Ok(())
}
