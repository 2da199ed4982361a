//! Validation error types
//!
//! Defines all validation error variants for tuning configurations.

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid max_trials: {0} (must be > 0)")]
    InvalidMaxTrials(usize),

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid number of classes: {0} (must be >= 2)")]
    InvalidNumClasses(usize),

    #[error("Invalid input shape: {0:?} (every dimension must be > 0)")]
    InvalidInputShape([usize; 3]),

    #[error("Input {height}x{width} is too small for {depth} convolution blocks")]
    InputTooSmall { height: usize, width: usize, depth: i64 },

    #[error("Objective name cannot be empty")]
    EmptyObjective,

    #[error("Project name cannot be empty")]
    EmptyProjectName,

    #[error("Project name must be a single path component: {0}")]
    InvalidProjectName(String),
}
