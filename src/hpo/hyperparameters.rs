//! Typed accessor view over one assignment
//!
//! A model factory reads its hyperparameters through [`HyperParameters`].
//! Every read names the domain the factory expects, so a factory that drifts
//! from the declared space fails loudly instead of silently reading a value
//! from a different domain.

use super::error::{HPOError, Result};
use super::types::{
    check_value, Assignment, HyperparameterSpace, ParameterDomain, ParameterValue,
};

/// Read-only view of an [`Assignment`] checked against a [`HyperparameterSpace`]
#[derive(Debug)]
pub struct HyperParameters<'a> {
    space: &'a HyperparameterSpace,
    assignment: &'a Assignment,
    consumed: Vec<String>,
}

impl<'a> HyperParameters<'a> {
    /// Create a view for one trial
    pub fn new(space: &'a HyperparameterSpace, assignment: &'a Assignment) -> Self {
        Self { space, assignment, consumed: Vec::new() }
    }

    /// Read a categorical parameter
    pub fn choice<S: AsRef<str>>(&mut self, name: &str, options: &[S]) -> Result<&'a str> {
        let value = self.read(name, ParameterDomain::categorical(options))?;
        value.as_str().ok_or_else(|| HPOError::out_of_domain(name, value))
    }

    /// Read an integer parameter on `[min, max]` with the given step
    pub fn int_range(&mut self, name: &str, min: i64, max: i64, step: i64) -> Result<i64> {
        let value = self.read(name, ParameterDomain::IntRange { min, max, step })?;
        value.as_int().ok_or_else(|| HPOError::out_of_domain(name, value))
    }

    /// Read a boolean parameter
    pub fn boolean(&mut self, name: &str) -> Result<bool> {
        let value = self.read(name, ParameterDomain::Boolean)?;
        value.as_bool().ok_or_else(|| HPOError::out_of_domain(name, value))
    }

    fn read(&mut self, name: &str, requested: ParameterDomain) -> Result<&'a ParameterValue> {
        requested.validate(name)?;
        let declared =
            self.space.get(name).ok_or_else(|| HPOError::UndeclaredParameter(name.to_string()))?;
        if *declared != requested {
            return Err(HPOError::NameConflict(name.to_string()));
        }
        let value =
            self.assignment.get(name).ok_or_else(|| HPOError::MissingValue(name.to_string()))?;
        check_value(name, declared, value)?;
        if !self.consumed.iter().any(|c| c == name) {
            self.consumed.push(name.to_string());
        }
        Ok(value)
    }

    /// Names read so far, in first-read order
    pub fn consumed(&self) -> &[String] {
        &self.consumed
    }

    /// The assignment restricted to the names actually read
    pub fn active_assignment(&self) -> Assignment {
        self.assignment.restrict(&self.consumed)
    }

    /// Names the assignment supplies but the factory never read
    pub fn unused(&self) -> Vec<&'a str> {
        self.assignment
            .iter()
            .map(|(name, _)| name.as_str())
            .filter(|name| !self.consumed.iter().any(|c| c == name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> HyperparameterSpace {
        let mut space = HyperparameterSpace::new();
        space.choice("model_type", &["mlp", "cnn"]).unwrap();
        space.int_range("units_0", 32, 128, 32).unwrap();
        space.boolean("dropout").unwrap();
        space
    }

    #[test]
    fn test_reads_typed_values() {
        let space = space();
        let assignment =
            Assignment::new().with("model_type", "cnn").with("units_0", 64).with("dropout", true);
        let mut hp = HyperParameters::new(&space, &assignment);

        assert_eq!(hp.choice("model_type", &["mlp", "cnn"]).unwrap(), "cnn");
        assert_eq!(hp.int_range("units_0", 32, 128, 32).unwrap(), 64);
        assert!(hp.boolean("dropout").unwrap());
        assert_eq!(hp.consumed(), ["model_type", "units_0", "dropout"]);
    }

    #[test]
    fn test_undeclared_name() {
        let space = space();
        let assignment = Assignment::new().with("lr", 3);
        let mut hp = HyperParameters::new(&space, &assignment);
        assert_eq!(
            hp.int_range("lr", 1, 5, 1),
            Err(HPOError::UndeclaredParameter("lr".to_string()))
        );
    }

    #[test]
    fn test_conflicting_domain() {
        let space = space();
        let assignment = Assignment::new().with("units_0", 64);
        let mut hp = HyperParameters::new(&space, &assignment);
        assert_eq!(
            hp.int_range("units_0", 32, 256, 32),
            Err(HPOError::NameConflict("units_0".to_string()))
        );
        assert_eq!(hp.boolean("units_0"), Err(HPOError::NameConflict("units_0".to_string())));
    }

    #[test]
    fn test_invalid_requested_domain() {
        let space = space();
        let assignment = Assignment::new();
        let mut hp = HyperParameters::new(&space, &assignment);
        let empty: [&str; 0] = [];
        assert!(matches!(hp.choice("model_type", &empty), Err(HPOError::InvalidDomain { .. })));
        assert!(matches!(
            hp.int_range("units_0", 32, 128, 0),
            Err(HPOError::InvalidDomain { .. })
        ));
    }

    #[test]
    fn test_missing_value() {
        let space = space();
        let assignment = Assignment::new();
        let mut hp = HyperParameters::new(&space, &assignment);
        assert_eq!(hp.boolean("dropout"), Err(HPOError::MissingValue("dropout".to_string())));
    }

    #[test]
    fn test_out_of_domain_not_clamped() {
        let space = space();
        for bad in [Assignment::new().with("units_0", 48), Assignment::new().with("units_0", 160)] {
            let mut hp = HyperParameters::new(&space, &bad);
            assert!(matches!(
                hp.int_range("units_0", 32, 128, 32),
                Err(HPOError::OutOfDomainValue { .. })
            ));
        }

        let wrong_kind = Assignment::new().with("dropout", "yes");
        let mut hp = HyperParameters::new(&space, &wrong_kind);
        assert!(matches!(hp.boolean("dropout"), Err(HPOError::OutOfDomainValue { .. })));
    }

    #[test]
    fn test_active_and_unused() {
        let space = space();
        let assignment =
            Assignment::new().with("model_type", "mlp").with("units_0", 32).with("dropout", false);
        let mut hp = HyperParameters::new(&space, &assignment);
        hp.choice("model_type", &["mlp", "cnn"]).unwrap();
        hp.boolean("dropout").unwrap();
        hp.boolean("dropout").unwrap();

        assert_eq!(hp.consumed().len(), 2);
        assert_eq!(hp.unused(), vec!["units_0"]);
        let active = hp.active_assignment();
        assert_eq!(active.len(), 2);
        assert!(!active.contains("units_0"));
    }
}
