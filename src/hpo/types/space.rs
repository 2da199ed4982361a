//! Hyperparameter search space

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::hpo::error::{HPOError, Result};

use super::assignment::Assignment;
use super::parameter::{ParameterDomain, ParameterValue};

/// One declared hyperparameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperparameterSpec {
    /// Unique name within the space
    pub name: String,
    /// Declared domain
    #[serde(flatten)]
    pub domain: ParameterDomain,
}

/// Hyperparameter search space
///
/// Parameters keep their declaration order, which fixes the order of
/// sampling and grid enumeration. Every domain is validated on the way in,
/// including when a space is deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HyperparameterSpec>", into = "Vec<HyperparameterSpec>")]
pub struct HyperparameterSpace {
    params: Vec<HyperparameterSpec>,
}

impl HyperparameterSpace {
    /// Create an empty search space
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter
    ///
    /// Redeclaring a name with the identical domain is a no-op. A different
    /// kind or domain fails with [`HPOError::NameConflict`].
    pub fn declare(&mut self, name: &str, domain: ParameterDomain) -> Result<()> {
        domain.validate(name)?;
        match self.get(name) {
            Some(existing) if *existing == domain => Ok(()),
            Some(_) => Err(HPOError::NameConflict(name.to_string())),
            None => {
                self.params.push(HyperparameterSpec { name: name.to_string(), domain });
                Ok(())
            }
        }
    }

    /// Declare a categorical parameter
    pub fn choice<S: AsRef<str>>(&mut self, name: &str, options: &[S]) -> Result<()> {
        self.declare(name, ParameterDomain::categorical(options))
    }

    /// Declare an integer parameter on `[min, max]` with the given step
    pub fn int_range(&mut self, name: &str, min: i64, max: i64, step: i64) -> Result<()> {
        self.declare(name, ParameterDomain::IntRange { min, max, step })
    }

    /// Declare a boolean parameter
    pub fn boolean(&mut self, name: &str) -> Result<()> {
        self.declare(name, ParameterDomain::Boolean)
    }

    /// Get a parameter domain
    pub fn get(&self, name: &str) -> Option<&ParameterDomain> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.domain)
    }

    /// Check if a name is declared
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Check if space is empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Iterate over parameters in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &HyperparameterSpec> {
        self.params.iter()
    }

    /// Declared names in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }

    /// Number of distinct full configurations (saturating)
    pub fn cardinality(&self) -> usize {
        self.params.iter().fold(1usize, |acc, p| acc.saturating_mul(p.domain.cardinality()))
    }

    /// Sample every declared parameter uniformly
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Result<Assignment> {
        let mut assignment = Assignment::new();
        for spec in &self.params {
            let value = spec
                .domain
                .sample(rng)
                .ok_or_else(|| HPOError::invalid_domain(&spec.name, "empty domain"))?;
            assignment = assignment.with(&spec.name, value);
        }
        Ok(assignment)
    }

    /// Assignment holding each parameter's first value
    pub fn defaults(&self) -> Result<Assignment> {
        let mut assignment = Assignment::new();
        for spec in &self.params {
            let value = spec
                .domain
                .default_value()
                .ok_or_else(|| HPOError::invalid_domain(&spec.name, "empty domain"))?;
            assignment = assignment.with(&spec.name, value);
        }
        Ok(assignment)
    }

    /// Validate an assignment against the schema
    ///
    /// Every supplied name must be declared and hold an in-domain value.
    /// Declared names may be absent: conditional parameters are only present
    /// when their branch is active.
    pub fn validate(&self, assignment: &Assignment) -> Result<()> {
        for (name, value) in assignment.iter() {
            let domain =
                self.get(name).ok_or_else(|| HPOError::UndeclaredParameter(name.clone()))?;
            check_value(name, domain, value)?;
        }
        Ok(())
    }
}

pub(crate) fn check_value(name: &str, domain: &ParameterDomain, value: &ParameterValue) -> Result<()> {
    if domain.is_valid(value) {
        Ok(())
    } else {
        Err(HPOError::out_of_domain(name, value))
    }
}

impl TryFrom<Vec<HyperparameterSpec>> for HyperparameterSpace {
    type Error = HPOError;

    fn try_from(specs: Vec<HyperparameterSpec>) -> Result<Self> {
        let mut space = HyperparameterSpace::new();
        for spec in specs {
            if space.contains(&spec.name) {
                return Err(HPOError::NameConflict(spec.name));
            }
            space.declare(&spec.name, spec.domain)?;
        }
        Ok(space)
    }
}

impl From<HyperparameterSpace> for Vec<HyperparameterSpec> {
    fn from(space: HyperparameterSpace) -> Self {
        space.params
    }
}
