//! HPO error types

use thiserror::Error;

/// HPO errors
///
/// All variants are local precondition violations. None of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HPOError {
    #[error("Invalid domain for {name}: {reason}")]
    InvalidDomain { name: String, reason: String },

    #[error("Parameter {0} redeclared with a different kind or domain")]
    NameConflict(String),

    #[error("Value {value} is outside the declared domain of {name}")]
    OutOfDomainValue { name: String, value: String },

    #[error("Parameter not declared in search space: {0}")]
    UndeclaredParameter(String),

    #[error("Assignment has no value for {0}")]
    MissingValue(String),

    #[error("Empty search space")]
    EmptySpace,

    #[error("Search space exhausted")]
    Exhausted,

    #[error("No trials completed")]
    NoTrials,
}

impl HPOError {
    pub(crate) fn invalid_domain(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDomain { name: name.to_string(), reason: reason.into() }
    }

    pub(crate) fn out_of_domain(name: &str, value: impl std::fmt::Display) -> Self {
        Self::OutOfDomainValue { name: name.to_string(), value: value.to_string() }
    }
}

/// Result type for HPO operations
pub type Result<T> = std::result::Result<T, HPOError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hpo_error_display() {
        let err = HPOError::invalid_domain("units_0", "step must be > 0");
        assert!(format!("{err}").contains("Invalid domain"));
        assert!(format!("{err}").contains("units_0"));
        assert!(format!("{err}").contains("step must be > 0"));

        let err = HPOError::NameConflict("dropout".to_string());
        assert!(format!("{err}").contains("dropout"));
        assert!(format!("{err}").contains("redeclared"));

        let err = HPOError::out_of_domain("filters_0", 33);
        assert!(format!("{err}").contains("33"));
        assert!(format!("{err}").contains("filters_0"));

        let err = HPOError::UndeclaredParameter("lr".to_string());
        assert!(format!("{err}").contains("not declared"));

        let err = HPOError::MissingValue("cnn_layers".to_string());
        assert!(format!("{err}").contains("cnn_layers"));

        assert!(format!("{}", HPOError::EmptySpace).contains("Empty search space"));
        assert!(format!("{}", HPOError::Exhausted).contains("exhausted"));
        assert!(format!("{}", HPOError::NoTrials).contains("No trials completed"));
    }
}
