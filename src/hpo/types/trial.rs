//! Trial types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::assignment::Assignment;

/// A single trial (assignment + outcome)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    /// Trial ID
    pub id: usize,
    /// Hyperparameter values
    pub assignment: Assignment,
    /// Objective score, once completed
    pub score: Option<f64>,
    /// All metrics reported by the trainer
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    /// Number of epochs the trainer ran
    pub epochs: usize,
    /// Trial status
    pub status: TrialStatus,
    /// Failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Trial {
    /// Create a new trial
    pub fn new(id: usize, assignment: Assignment) -> Self {
        Self {
            id,
            assignment,
            score: None,
            metrics: BTreeMap::new(),
            epochs: 0,
            status: TrialStatus::Pending,
            error: None,
        }
    }

    /// Mark trial as running
    pub fn start(&mut self) {
        self.status = TrialStatus::Running;
    }

    /// Mark trial as complete with score
    pub fn complete(&mut self, score: f64, metrics: BTreeMap<String, f64>, epochs: usize) {
        self.score = Some(score);
        self.metrics = metrics;
        self.epochs = epochs;
        self.status = TrialStatus::Completed;
    }

    /// Mark trial as failed
    pub fn fail(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.status = TrialStatus::Failed;
    }

    /// Whether the trial finished with a score
    pub fn is_completed(&self) -> bool {
        self.status == TrialStatus::Completed && self.score.is_some()
    }
}

/// Trial status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl std::fmt::Display for TrialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrialStatus::Pending => write!(f, "pending"),
            TrialStatus::Running => write!(f, "running"),
            TrialStatus::Completed => write!(f, "completed"),
            TrialStatus::Failed => write!(f, "failed"),
        }
    }
}
