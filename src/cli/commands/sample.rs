//! Sample command implementation

use serde::Serialize;

use super::{config_or_default, render};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::SampleArgs;
use crate::hpo::{Assignment, RandomSearch, TuneSearcher};
use crate::model::{build_assignment, HyperModel, ModelSpec};

/// One drawn assignment and the model it builds
#[derive(Debug, Serialize)]
pub struct SampleReport {
    pub id: usize,
    /// Hyperparameters the model read
    pub active: Assignment,
    pub model: ModelSpec,
    pub params: usize,
}

/// Draw `count` assignments and build each one
pub fn draw_samples<H: HyperModel>(model: &H, count: usize, seed: Option<u64>) -> crate::Result<Vec<SampleReport>> {
    let space = model.search_space()?;
    let mut searcher = RandomSearch::new(space.clone(), seed);
    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
        let trial = searcher.suggest()?;
        let built = build_assignment(model, &space, &trial.assignment)?;
        let params = built.spec.summary()?.total_params;
        samples.push(SampleReport { id: trial.id, active: built.active, model: built.spec, params });
    }
    Ok(samples)
}

pub fn run_sample(args: SampleArgs, level: LogLevel) -> Result<(), String> {
    let config = config_or_default(args.config.as_deref())?;
    let seed = args.seed.or(config.seed);
    let samples = draw_samples(&config.model, args.count, seed).map_err(|e| format!("Sample error: {e}"))?;

    if let Some(out) = render(&samples, args.format)? {
        println!("{out}");
        return Ok(());
    }

    log(level, LogLevel::Normal, &format!("Sampled {} assignments:", samples.len()));
    for sample in &samples {
        println!("  #{:<3} {:>10} params  {}", sample.id, sample.params, sample.model);
        log(level, LogLevel::Verbose, &format!("       {}", sample.active));
    }
    Ok(())
}
