//! Random search for hyperparameter optimization

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::error::{HPOError, Result};
use super::searcher::TuneSearcher;
use super::types::{HyperparameterSpace, Trial};

/// Uniform random sampler over the full search space
///
/// With a fixed seed the sequence of suggestions is reproducible.
#[derive(Debug, Clone)]
pub struct RandomSearch {
    space: HyperparameterSpace,
    seed: Option<u64>,
    rng: StdRng,
    trials: Vec<Trial>,
    next_id: usize,
}

impl RandomSearch {
    /// Create a random searcher; `None` seeds from the OS
    pub fn new(space: HyperparameterSpace, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { space, seed, rng, trials: Vec::new(), next_id: 0 }
    }

    /// Search space being sampled
    pub fn space(&self) -> &HyperparameterSpace {
        &self.space
    }
}

impl TuneSearcher for RandomSearch {
    fn suggest(&mut self) -> Result<Trial> {
        if self.space.is_empty() {
            return Err(HPOError::EmptySpace);
        }
        let assignment = self.space.sample(&mut self.rng)?;
        let trial = Trial::new(self.next_id, assignment);
        self.next_id += 1;
        Ok(trial)
    }

    fn record(&mut self, trial: Trial) {
        self.trials.push(trial);
    }

    fn trials(&self) -> &[Trial] {
        &self.trials
    }

    fn reseed(&mut self, salt: u64) {
        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed.wrapping_add(salt));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hpo::types::TrialStatus;
    use std::collections::BTreeMap;

    fn space() -> HyperparameterSpace {
        let mut space = HyperparameterSpace::new();
        space.choice("model_type", &["mlp", "cnn"]).unwrap();
        space.int_range("units_0", 32, 128, 32).unwrap();
        space.boolean("dropout").unwrap();
        space
    }

    #[test]
    fn test_random_search_empty_space() {
        let mut searcher = RandomSearch::new(HyperparameterSpace::new(), Some(0));
        assert_eq!(searcher.suggest(), Err(HPOError::EmptySpace));
    }

    #[test]
    fn test_random_search_sequential_ids() {
        let mut searcher = RandomSearch::new(space(), Some(1));
        assert_eq!(searcher.suggest().unwrap().id, 0);
        assert_eq!(searcher.suggest().unwrap().id, 1);
        assert_eq!(searcher.suggest().unwrap().id, 2);
        assert!(!searcher.exhaustive());
    }

    #[test]
    fn test_random_search_reseed_changes_stream() {
        let mut a = RandomSearch::new(space(), Some(42));
        let mut b = RandomSearch::new(space(), Some(42));
        b.reseed(5);
        let first_a: Vec<_> = (0..10).map(|_| a.suggest().unwrap().assignment).collect();
        let first_b: Vec<_> = (0..10).map(|_| b.suggest().unwrap().assignment).collect();
        assert_ne!(first_a, first_b);

        let mut c = RandomSearch::new(space(), Some(47));
        let first_c: Vec<_> = (0..10).map(|_| c.suggest().unwrap().assignment).collect();
        assert_eq!(first_b, first_c);
    }

    #[test]
    fn test_random_search_reproducible() {
        let mut a = RandomSearch::new(space(), Some(42));
        let mut b = RandomSearch::new(space(), Some(42));
        for _ in 0..20 {
            assert_eq!(a.suggest().unwrap().assignment, b.suggest().unwrap().assignment);
        }
    }

    #[test]
    fn test_random_search_assignments_valid() {
        let space = space();
        let mut searcher = RandomSearch::new(space.clone(), None);
        for _ in 0..50 {
            let trial = searcher.suggest().unwrap();
            assert_eq!(trial.assignment.len(), 3);
            assert!(space.validate(&trial.assignment).is_ok());
        }
    }

    #[test]
    fn test_random_search_record_and_completed() {
        let mut searcher = RandomSearch::new(space(), Some(3));
        let mut t0 = searcher.suggest().unwrap();
        t0.complete(0.8, BTreeMap::new(), 1);
        let mut t1 = searcher.suggest().unwrap();
        t1.fail("diverged");
        searcher.record(t0);
        searcher.record(t1);
        assert_eq!(searcher.trials().len(), 2);
        assert_eq!(searcher.completed(), 1);
        assert_eq!(searcher.trials()[1].status, TrialStatus::Failed);
    }
}
