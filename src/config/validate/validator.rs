//! Configuration validation logic
//!
//! Validates tuning configurations for correctness before a search starts.

use super::error::ValidationError;
use crate::config::schema::TuneConfig;
use crate::model::{KERNEL_SIZE, MAX_DEPTH, POOL_SIZE};

/// Validate a tuning configuration
///
/// Checks:
/// - Budgets are positive
/// - The deepest CNN fits the input shape
/// - Names are non-empty
pub fn validate_config(config: &TuneConfig) -> Result<(), ValidationError> {
    if config.max_trials == 0 {
        return Err(ValidationError::InvalidMaxTrials(config.max_trials));
    }

    if config.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(config.epochs));
    }

    let shape = config.model.input_shape;
    if shape.contains(&0) {
        return Err(ValidationError::InvalidInputShape(shape));
    }

    if config.model.num_classes < 2 {
        return Err(ValidationError::InvalidNumClasses(config.model.num_classes));
    }

    let [height, width, _] = shape;
    if reduced_side(height) == 0 || reduced_side(width) == 0 {
        return Err(ValidationError::InputTooSmall { height, width, depth: MAX_DEPTH });
    }

    if config.objective.name.trim().is_empty() {
        return Err(ValidationError::EmptyObjective);
    }

    let name = config.project.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyProjectName);
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ValidationError::InvalidProjectName(config.project.name.clone()));
    }

    Ok(())
}

/// Side length left after the deepest stack of valid conv + pool blocks
fn reduced_side(mut side: usize) -> usize {
    for _ in 0..MAX_DEPTH {
        if side < KERNEL_SIZE {
            return 0;
        }
        side = (side - KERNEL_SIZE + 1) / POOL_SIZE;
    }
    side
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_side() {
        // 28 -> 26 -> 13 -> 11 -> 5 -> 3 -> 1
        assert_eq!(reduced_side(28), 1);
        assert_eq!(reduced_side(22), 1);
        assert_eq!(reduced_side(21), 0);
        assert_eq!(reduced_side(20), 0);
        assert_eq!(reduced_side(2), 0);
    }
}
