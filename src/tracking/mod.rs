//! Trial Tracking Module
//!
//! Persists one record per finished trial so a search can be inspected,
//! compared, or resumed later. Backed by pluggable storage via the
//! [`TrialRecorder`](storage::TrialRecorder) trait.
//!
//! # Architecture
//!
//! - **`TrialRecord`**: assignment, status, metrics and built model of one trial
//! - **`TrialRecorder`**: pluggable persistence (JSON directory, in-memory)
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use afinar::hpo::{Assignment, Trial};
//! use afinar::tracking::storage::{InMemoryRecorder, TrialRecorder};
//! use afinar::tracking::TrialRecord;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let mut recorder = InMemoryRecorder::new();
//!
//! let mut trial = Trial::new(0, Assignment::new().with("dropout", true));
//! trial.complete(0.97, BTreeMap::new(), 2);
//! recorder.record(&TrialRecord::from_trial(&trial, None))?;
//!
//! let trials = recorder.load_trials()?;
//! assert_eq!(trials.len(), 1);
//! assert_eq!(trials[0].score, Some(0.97));
//! # Ok(())
//! # }
//! ```

pub mod storage;


use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hpo::{Assignment, Trial, TrialStatus};
use crate::model::ModelSpec;

pub use storage::{InMemoryRecorder, JsonDirRecorder, TrialRecorder};

/// Persisted form of one trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial_id: usize,
    /// Hyperparameters the model actually read
    pub assignment: Assignment,
    pub status: TrialStatus,
    pub score: Option<f64>,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    pub epochs: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelSpec>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl TrialRecord {
    /// Snapshot a trial; `finished_at` is set for completed and failed trials
    pub fn from_trial(trial: &Trial, model: Option<&ModelSpec>) -> Self {
        let now = Utc::now();
        let finished = matches!(trial.status, TrialStatus::Completed | TrialStatus::Failed);
        Self {
            trial_id: trial.id,
            assignment: trial.assignment.clone(),
            status: trial.status,
            score: trial.score,
            metrics: trial.metrics.clone(),
            epochs: trial.epochs,
            error: trial.error.clone(),
            model: model.cloned(),
            started_at: now,
            finished_at: finished.then_some(now),
        }
    }

    /// Override the start timestamp
    #[must_use]
    pub fn started(mut self, at: DateTime<Utc>) -> Self {
        self.started_at = at;
        self
    }

    /// Convert back into a `Trial`
    pub fn into_trial(self) -> Trial {
        Trial {
            id: self.trial_id,
            assignment: self.assignment,
            score: self.score,
            metrics: self.metrics,
            epochs: self.epochs,
            status: self.status,
            error: self.error,
        }
    }

    /// Wall-clock duration in milliseconds, if finished
    pub fn duration_ms(&self) -> Option<i64> {
        self.finished_at.map(|end| (end - self.started_at).num_milliseconds())
    }
}

/// Errors from trial tracking operations
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Trial not found: {0}")]
    TrialNotFound(usize),
}

/// Result alias for tracking operations
pub type Result<T> = std::result::Result<T, TrackingError>;
