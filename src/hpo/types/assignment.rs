//! Concrete hyperparameter values for one trial

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::parameter::ParameterValue;

/// Name -> value mapping for one trial
///
/// There is no in-place mutation: [`Assignment::with`] consumes and returns
/// a new value, so an assignment handed to a model factory cannot change
/// underneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    values: BTreeMap<String, ParameterValue>,
}

impl Assignment {
    /// Create an empty assignment
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `name` set to `value`
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<ParameterValue>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    /// Get a value
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }

    /// Check if a name has a value
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParameterValue)> {
        self.values.iter()
    }

    /// Keep only the listed names
    #[must_use]
    pub fn restrict<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let values = names
            .iter()
            .filter_map(|n| {
                let n = n.as_ref();
                self.values.get(n).map(|v| (n.to_string(), v.clone()))
            })
            .collect();
        Self { values }
    }
}

impl<K: Into<String>, V: Into<ParameterValue>> FromIterator<(K, V)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}
