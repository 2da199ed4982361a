//! Hyperparameter search loop
//!
//! [`Tuner`] drives a [`TuneSearcher`] over a [`HyperModel`]'s space, hands
//! each built [`ModelSpec`] to an external [`TrialRunner`] and persists every
//! finished trial through a [`TrialRecorder`].
//!
//! # Architecture
//!
//! ```text
//! Tuner
//!   ├── TuneSearcher (Random / Grid)
//!   ├── HyperModel   (assignment → ModelSpec)
//!   ├── TrialRunner  (external trainer, reports metrics)
//!   └── TrialRecorder (JSON directory / in-memory)
//! ```
//!
//! Trials are de-duplicated on their *active* assignment: two samples that
//! differ only in parameters the chosen branch never reads build the same
//! model and run once.

mod objective;


use std::collections::{BTreeMap, HashSet};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::{log, LogLevel};
use crate::config::{validate_config, TuneConfig};
use crate::error::{Error, Result};
use crate::hpo::{Assignment, HPOError, HyperparameterSpace, Trial, TrialStatus, TuneSearcher};
use crate::model::{build_assignment, BuiltModel, HyperModel, ModelSpec};
use crate::tracking::{TrialRecord, TrialRecorder};

pub use objective::{Direction, Objective};

/// Metrics an external trainer reports for one trial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub metrics: BTreeMap<String, f64>,
    /// Epochs actually trained
    pub epochs: usize,
}

impl TrialOutcome {
    pub fn new(epochs: usize) -> Self {
        Self { metrics: BTreeMap::new(), epochs }
    }

    /// Add a metric
    #[must_use]
    pub fn metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }
}

/// External trainer: fits one model and reports its metrics.
///
/// An `Err` marks the trial as failed; the search continues.
pub trait TrialRunner {
    fn run_trial(&mut self, trial: &Trial, model: &ModelSpec, epochs: usize) -> Result<TrialOutcome>;
}

impl<F> TrialRunner for F
where
    F: FnMut(&Trial, &ModelSpec, usize) -> Result<TrialOutcome>,
{
    fn run_trial(&mut self, trial: &Trial, model: &ModelSpec, epochs: usize) -> Result<TrialOutcome> {
        self(trial, model, epochs)
    }
}

/// Summary of a finished search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuneResult {
    pub objective: Objective,
    pub max_trials: usize,
    /// All trials, best first
    pub trials: Vec<TrialRecord>,
    pub best_trial_id: Option<usize>,
    pub completed: usize,
    pub failed: usize,
    pub total_time_ms: u64,
    pub finished_at: DateTime<Utc>,
}

impl TuneResult {
    /// Best completed trial
    pub fn best_trial(&self) -> Option<&TrialRecord> {
        let id = self.best_trial_id?;
        self.trials.iter().find(|r| r.trial_id == id)
    }
}

/// Search loop over one hyper-model.
pub struct Tuner<H, S, R> {
    hypermodel: H,
    space: HyperparameterSpace,
    searcher: S,
    recorder: R,
    config: TuneConfig,
    leaderboard: Vec<TrialRecord>,
    tried: HashSet<Assignment>,
    next_trial_id: usize,
    log_level: LogLevel,
}

impl<H: HyperModel, S: TuneSearcher, R: TrialRecorder> Tuner<H, S, R> {
    /// Create a tuner; fails on an invalid config or a malformed space
    pub fn new(hypermodel: H, searcher: S, recorder: R, config: TuneConfig) -> Result<Self> {
        validate_config(&config).map_err(|e| Error::ConfigError(format!("Invalid config: {e}")))?;
        let space = hypermodel.search_space()?;
        Ok(Self {
            hypermodel,
            space,
            searcher,
            recorder,
            config,
            leaderboard: Vec::new(),
            tried: HashSet::new(),
            next_trial_id: 0,
            log_level: LogLevel::Quiet,
        })
    }

    /// Set progress output level
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn space(&self) -> &HyperparameterSpace {
        &self.space
    }

    pub fn config(&self) -> &TuneConfig {
        &self.config
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn searcher(&self) -> &S {
        &self.searcher
    }

    /// Run the search until `max_trials` trials exist or the searcher runs dry.
    ///
    /// Calling it again continues from the recorder; trials the searcher
    /// already holds are not recorded twice.
    pub fn search<T: TrialRunner + ?Sized>(&mut self, runner: &mut T) -> Result<TuneResult> {
        let start = Instant::now();
        self.prepare()?;

        let mut consecutive_failures = 0;
        while self.leaderboard.len() < self.config.max_trials {
            let Some((trial, built)) = self.next_trial()? else {
                break;
            };
            let status = self.run_trial(runner, trial, built)?;
            if status == TrialStatus::Failed {
                consecutive_failures += 1;
                if consecutive_failures > self.config.max_consecutive_failed_trials {
                    return Err(Error::TooManyFailedTrials(consecutive_failures));
                }
            } else {
                consecutive_failures = 0;
            }
        }

        let result = self.result(start.elapsed());
        self.recorder.save_summary(&result)?;
        self.log_result(&result);
        Ok(result)
    }

    /// All trials so far, best first
    pub fn leaderboard(&self) -> &[TrialRecord] {
        &self.leaderboard
    }

    /// Best completed trial
    pub fn best_trial(&self) -> Option<&TrialRecord> {
        self.leaderboard.first().filter(|r| r.status == TrialStatus::Completed)
    }

    /// Rebuild the best completed model
    pub fn best_model(&self) -> Result<ModelSpec> {
        self.best_models(1)?.pop().ok_or_else(|| HPOError::NoTrials.into())
    }

    /// Rebuild the top `n` completed models from their recorded assignments
    pub fn best_models(&self, n: usize) -> Result<Vec<ModelSpec>> {
        self.leaderboard
            .iter()
            .filter(|r| r.status == TrialStatus::Completed)
            .take(n)
            .map(|r| Ok(build_assignment(&self.hypermodel, &self.space, &r.assignment)?.spec))
            .collect()
    }

    fn prepare(&mut self) -> Result<()> {
        self.leaderboard.clear();
        self.tried.clear();
        self.next_trial_id = 0;

        if self.config.overwrite {
            self.recorder.clear()?;
            return Ok(());
        }

        let records = self.recorder.load_trials()?;
        if records.is_empty() {
            return Ok(());
        }
        let known: HashSet<usize> = self.searcher.trials().iter().map(|t| t.id).collect();
        if known.is_empty() {
            self.searcher.reseed(records.len() as u64);
        }
        for record in records {
            self.tried.insert(record.assignment.clone());
            self.next_trial_id = self.next_trial_id.max(record.trial_id + 1);
            if !known.contains(&record.trial_id) {
                self.searcher.record(record.clone().into_trial());
            }
            self.leaderboard.push(record);
        }
        self.sort_leaderboard();
        log(
            self.log_level,
            LogLevel::Normal,
            &format!("Resuming search with {} recorded trials", self.leaderboard.len()),
        );
        Ok(())
    }

    fn next_trial(&mut self) -> Result<Option<(Trial, BuiltModel)>> {
        let mut duplicates = 0;
        loop {
            let mut trial = match self.searcher.suggest() {
                Ok(trial) => trial,
                Err(HPOError::Exhausted) => {
                    log(self.log_level, LogLevel::Normal, "Search space exhausted");
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            };

            let built = build_assignment(&self.hypermodel, &self.space, &trial.assignment)?;
            if self.tried.insert(built.active.clone()) {
                trial.id = self.next_trial_id;
                self.next_trial_id += 1;
                trial.assignment = built.active.clone();
                return Ok(Some((trial, built)));
            }

            duplicates += 1;
            log(self.log_level, LogLevel::Verbose, &format!("  Skipping duplicate assignment {}", built.active));
            if !self.searcher.exhaustive() && duplicates > self.config.max_retries_per_suggestion {
                log(
                    self.log_level,
                    LogLevel::Normal,
                    &format!("No unseen assignment after {duplicates} suggestions; stopping"),
                );
                return Ok(None);
            }
        }
    }

    fn run_trial<T: TrialRunner + ?Sized>(
        &mut self,
        runner: &mut T,
        mut trial: Trial,
        built: BuiltModel,
    ) -> Result<TrialStatus> {
        let started = Utc::now();
        log(self.log_level, LogLevel::Verbose, &format!("  Trial {} model: {}", trial.id, built.spec));

        trial.start();
        match runner.run_trial(&trial, &built.spec, self.config.epochs) {
            Ok(outcome) => {
                let score = self.config.objective.score(&outcome.metrics)?;
                let metrics = self.finite_metrics(trial.id, outcome.metrics);
                if score.is_finite() {
                    trial.complete(score, metrics, outcome.epochs);
                } else {
                    trial.metrics = metrics;
                    trial.epochs = outcome.epochs;
                    trial.fail(format!("objective {} is not finite: {score}", self.config.objective.name));
                }
            }
            Err(e) => trial.fail(e.to_string()),
        }

        let record = TrialRecord::from_trial(&trial, Some(&built.spec)).started(started);
        self.recorder.record(&record)?;
        self.log_trial(&record);

        let status = trial.status;
        self.searcher.record(trial);
        self.leaderboard.push(record);
        self.sort_leaderboard();
        Ok(status)
    }

    /// JSON has no NaN or infinity, so such metrics are dropped before recording
    fn finite_metrics(&self, trial_id: usize, mut metrics: BTreeMap<String, f64>) -> BTreeMap<String, f64> {
        metrics.retain(|name, value| {
            let keep = value.is_finite();
            if !keep {
                log(
                    self.log_level,
                    LogLevel::Verbose,
                    &format!("  Trial {trial_id} dropped non-finite metric {name}={value}"),
                );
            }
            keep
        });
        metrics
    }

    fn sort_leaderboard(&mut self) {
        let objective = &self.config.objective;
        self.leaderboard.sort_by(|a, b| objective.rank(a, b));
    }

    fn result(&self, elapsed: Duration) -> TuneResult {
        let count = |status: TrialStatus| self.leaderboard.iter().filter(|r| r.status == status).count();
        TuneResult {
            objective: self.config.objective.clone(),
            max_trials: self.config.max_trials,
            trials: self.leaderboard.clone(),
            best_trial_id: self.best_trial().map(|r| r.trial_id),
            completed: count(TrialStatus::Completed),
            failed: count(TrialStatus::Failed),
            total_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            finished_at: Utc::now(),
        }
    }

    fn log_trial(&self, record: &TrialRecord) {
        let progress = format!("[{}/{}]", self.leaderboard.len() + 1, self.config.max_trials);
        let line = match (record.status, record.score) {
            (TrialStatus::Completed, Some(score)) => format!(
                "Trial {} {progress} {}={score:.4} {}",
                record.trial_id, self.config.objective.name, record.assignment
            ),
            _ => format!(
                "Trial {} {progress} failed: {}",
                record.trial_id,
                record.error.as_deref().unwrap_or("unknown error")
            ),
        };
        log(self.log_level, LogLevel::Normal, &line);
    }

    fn log_result(&self, result: &TuneResult) {
        log(
            self.log_level,
            LogLevel::Normal,
            &format!(
                "Search finished: {} completed, {} failed in {:.1}s",
                result.completed,
                result.failed,
                result.total_time_ms as f64 / 1000.0
            ),
        );
        if let Some(best) = result.best_trial() {
            log(
                self.log_level,
                LogLevel::Normal,
                &format!(
                    "Best trial {}: {}={:.4} {}",
                    best.trial_id,
                    result.objective.name,
                    best.score.unwrap_or(f64::NAN),
                    best.assignment
                ),
            );
        }
    }
}
