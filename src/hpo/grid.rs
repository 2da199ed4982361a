//! Grid search for hyperparameter optimization

use super::error::{HPOError, Result};
use super::searcher::TuneSearcher;
use super::types::{Assignment, HyperparameterSpace, ParameterDomain, Trial};

/// Exhaustive grid over every declared domain
///
/// Configurations are enumerated lazily in declaration order, with the last
/// declared parameter varying fastest.
#[derive(Debug, Clone)]
pub struct GridSearch {
    space: HyperparameterSpace,
    /// `(name, domain, cardinality)` per declared parameter
    axes: Vec<(String, ParameterDomain, usize)>,
    next_idx: usize,
    trials: Vec<Trial>,
}

impl GridSearch {
    /// Create new grid search
    pub fn new(space: HyperparameterSpace) -> Self {
        let axes = space.iter().map(|p| (p.name.clone(), p.domain.clone(), p.domain.cardinality())).collect();
        Self { space, axes, next_idx: 0, trials: Vec::new() }
    }

    /// Search space being enumerated
    pub fn space(&self) -> &HyperparameterSpace {
        &self.space
    }

    /// Total number of grid points
    pub fn len(&self) -> usize {
        self.space.cardinality()
    }

    /// Check if the grid has no points
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `index`-th configuration
    pub fn configuration(&self, index: usize) -> Option<Assignment> {
        if index >= self.len() {
            return None;
        }
        let mut rest = index;
        let mut values = Vec::with_capacity(self.axes.len());
        for (name, domain, size) in self.axes.iter().rev() {
            if *size == 0 {
                return None;
            }
            values.push((name.as_str(), domain.value_at(rest % size)?));
            rest /= size;
        }
        Some(values.into_iter().collect())
    }

    /// Generate all grid configurations
    ///
    /// Materializes `len()` assignments; prefer [`configuration`](Self::configuration)
    /// for large grids.
    pub fn configurations(&self) -> Vec<Assignment> {
        (0..self.len()).filter_map(|i| self.configuration(i)).collect()
    }
}

impl TuneSearcher for GridSearch {
    fn suggest(&mut self) -> Result<Trial> {
        let assignment = self.configuration(self.next_idx).ok_or(HPOError::Exhausted)?;
        let trial = Trial::new(self.next_idx, assignment);
        self.next_idx += 1;
        Ok(trial)
    }

    fn record(&mut self, trial: Trial) {
        self.trials.push(trial);
    }

    fn trials(&self) -> &[Trial] {
        &self.trials
    }

    fn exhaustive(&self) -> bool {
        true
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_grid_search_size(max in 1i64..8, n_choices in 1usize..5) {
            let mut space = HyperparameterSpace::new();
            space.int_range("x", 1, max, 1).unwrap();
            let choices: Vec<String> = (0..n_choices).map(|i| format!("c{i}")).collect();
            space.choice("c", &choices).unwrap();

            let grid = GridSearch::new(space.clone());
            let configs = grid.configurations();
            prop_assert_eq!(configs.len(), max as usize * n_choices);
            prop_assert!(configs.iter().all(|c| space.validate(c).is_ok()));
        }
    }
}
