//! Error types with actionable diagnostics.
//!
//! Each subsystem has its own error enum; [`Error`] wraps them so library
//! entry points can use `?` across module boundaries.

use thiserror::Error;

use crate::hpo::HPOError;
use crate::model::ModelError;
use crate::tracking::TrackingError;

/// Result type alias for afinar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while declaring, building or searching.
#[derive(Error, Debug)]
pub enum Error {
    /// Search space or assignment violation.
    #[error("Hyperparameter error: {0}")]
    Hpo(#[from] HPOError),

    /// Model topology cannot be realized.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Trial persistence failed.
    #[error("Tracking error: {0}")]
    Tracking(#[from] TrackingError),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The external trainer reported a failure.
    #[error("Trial {id} failed: {message}")]
    TrialFailed { id: usize, message: String },

    /// Too many consecutive trials failed.
    #[error("{0} consecutive trials failed\n  → Check the trainer; the search was aborted")]
    TooManyFailedTrials(usize),

    /// The trainer did not report the objective metric.
    #[error("Objective metric '{0}' missing from trial results\n  → Report it from the trial runner or change `objective.name`")]
    MissingObjective(String),
}

impl Error {
    /// Check if this error comes from bad user input rather than a runtime failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Hpo(_) | Self::ConfigError(_) | Self::MissingObjective(_)
        )
    }
}
