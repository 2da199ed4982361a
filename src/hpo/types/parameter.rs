//! Parameter value and domain types

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::hpo::error::{HPOError, Result};

/// Parameter value (sampled from a domain or supplied by an assignment file)
///
/// Serialized untagged, so `dropout: true`, `cnn_layers: 2` and
/// `model_type: cnn` all parse to the expected variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Int(i64),
    Categorical(String),
}

impl ParameterValue {
    /// Get as int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParameterValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::Categorical(s) => Some(s),
            _ => None,
        }
    }

    /// Kind of domain this value can belong to
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Bool(_) => ParameterKind::Boolean,
            ParameterValue::Int(_) => ParameterKind::IntRange,
            ParameterValue::Categorical(_) => ParameterKind::Categorical,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(v) => write!(f, "{v}"),
            ParameterValue::Int(v) => write!(f, "{v}"),
            ParameterValue::Categorical(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(v: bool) -> Self {
        ParameterValue::Bool(v)
    }
}

impl From<i64> for ParameterValue {
    fn from(v: i64) -> Self {
        ParameterValue::Int(v)
    }
}

impl From<i32> for ParameterValue {
    fn from(v: i32) -> Self {
        ParameterValue::Int(i64::from(v))
    }
}

impl From<&str> for ParameterValue {
    fn from(v: &str) -> Self {
        ParameterValue::Categorical(v.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(v: String) -> Self {
        ParameterValue::Categorical(v)
    }
}

/// Kind of a hyperparameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Categorical,
    IntRange,
    Boolean,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterKind::Categorical => write!(f, "categorical"),
            ParameterKind::IntRange => write!(f, "int_range"),
            ParameterKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// Parameter domain (search space)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterDomain {
    /// Categorical choices
    Categorical { choices: Vec<String> },
    /// Integer range `[min, max]` on a `step` lattice anchored at `min`
    IntRange { min: i64, max: i64, step: i64 },
    /// `true` or `false`
    Boolean,
}

impl ParameterDomain {
    /// Categorical domain from string slices
    pub fn categorical<S: AsRef<str>>(choices: &[S]) -> Self {
        ParameterDomain::Categorical {
            choices: choices.iter().map(|c| c.as_ref().to_string()).collect(),
        }
    }

    /// Kind of this domain
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterDomain::Categorical { .. } => ParameterKind::Categorical,
            ParameterDomain::IntRange { .. } => ParameterKind::IntRange,
            ParameterDomain::Boolean => ParameterKind::Boolean,
        }
    }

    /// Check the domain is well formed
    ///
    /// Categorical choices must be non-empty and distinct; integer ranges need
    /// `min <= max` and `step > 0`.
    pub fn validate(&self, name: &str) -> Result<()> {
        match self {
            ParameterDomain::Categorical { choices } => {
                if choices.is_empty() {
                    return Err(HPOError::invalid_domain(name, "no choices"));
                }
                let mut seen = HashSet::with_capacity(choices.len());
                for choice in choices {
                    if !seen.insert(choice.as_str()) {
                        return Err(HPOError::invalid_domain(
                            name,
                            format!("duplicate choice '{choice}'"),
                        ));
                    }
                }
                Ok(())
            }
            ParameterDomain::IntRange { min, max, step } => {
                if max < min {
                    return Err(HPOError::invalid_domain(name, format!("max {max} < min {min}")));
                }
                if *step <= 0 {
                    return Err(HPOError::invalid_domain(
                        name,
                        format!("step must be > 0 (got {step})"),
                    ));
                }
                Ok(())
            }
            ParameterDomain::Boolean => Ok(()),
        }
    }

    /// Number of distinct values (0 for a malformed domain)
    pub fn cardinality(&self) -> usize {
        match self {
            ParameterDomain::Categorical { choices } => choices.len(),
            ParameterDomain::IntRange { min, max, step } => {
                if *step <= 0 || max < min {
                    return 0;
                }
                let span = i128::from(*max) - i128::from(*min);
                usize::try_from(span / i128::from(*step) + 1).unwrap_or(usize::MAX)
            }
            ParameterDomain::Boolean => 2,
        }
    }

    /// The `index`-th value in enumeration order
    pub fn value_at(&self, index: usize) -> Option<ParameterValue> {
        if index >= self.cardinality() {
            return None;
        }
        match self {
            ParameterDomain::Categorical { choices } => {
                choices.get(index).cloned().map(ParameterValue::Categorical)
            }
            ParameterDomain::IntRange { min, step, .. } => {
                let value = i128::from(*min) + index as i128 * i128::from(*step);
                i64::try_from(value).ok().map(ParameterValue::Int)
            }
            ParameterDomain::Boolean => Some(ParameterValue::Bool(index == 1)),
        }
    }

    /// All values in enumeration order
    pub fn values(&self) -> Vec<ParameterValue> {
        (0..self.cardinality()).filter_map(|i| self.value_at(i)).collect()
    }

    /// First value: first choice, `min`, or `false`
    pub fn default_value(&self) -> Option<ParameterValue> {
        self.value_at(0)
    }

    /// Sample a value uniformly from this domain
    ///
    /// Returns `None` for a malformed (empty) domain.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<ParameterValue> {
        let n = self.cardinality();
        if n == 0 {
            return None;
        }
        self.value_at(rng.random_range(0..n))
    }

    /// Check if a value is valid for this domain
    pub fn is_valid(&self, value: &ParameterValue) -> bool {
        match (self, value) {
            (ParameterDomain::Categorical { choices }, ParameterValue::Categorical(s)) => {
                choices.contains(s)
            }
            (ParameterDomain::IntRange { min, max, step }, ParameterValue::Int(v)) => {
                *step > 0
                    && v >= min
                    && v <= max
                    && (i128::from(*v) - i128::from(*min)) % i128::from(*step) == 0
            }
            (ParameterDomain::Boolean, ParameterValue::Bool(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ParameterDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterDomain::Categorical { choices } => write!(f, "{{{}}}", choices.join(", ")),
            ParameterDomain::IntRange { min, max, step } => {
                write!(f, "[{min}, {max}] step {step}")
            }
            ParameterDomain::Boolean => write!(f, "{{false, true}}"),
        }
    }
}
