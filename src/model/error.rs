//! Model topology errors

use thiserror::Error;

/// Errors raised while assembling or summarizing a [`ModelSpec`](super::ModelSpec)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Stage {stage} cannot accept input shape {shape:?}")]
    InvalidShape { stage: String, shape: Vec<usize> },

    #[error("Parameter count of {0} does not fit in usize")]
    ParamOverflow(String),

    #[error("Model has no hidden stages")]
    EmptyModel,

    #[error("Output stage must be a dense layer, got {0}")]
    InvalidOutput(String),
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
