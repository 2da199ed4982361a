//! Search strategy trait shared by the samplers

use super::error::Result;
use super::types::{Trial, TrialStatus};

/// Search strategy for suggesting hyperparameter assignments.
pub trait TuneSearcher {
    /// Suggest the next trial to evaluate.
    fn suggest(&mut self) -> Result<Trial>;

    /// Record a finished trial.
    fn record(&mut self, trial: Trial);

    /// Trials recorded so far.
    fn trials(&self) -> &[Trial];

    /// Derive a new sampling stream (used when resuming a seeded search).
    fn reseed(&mut self, _salt: u64) {}

    /// Whether suggestions enumerate a finite space and end with `Exhausted`.
    fn exhaustive(&self) -> bool {
        false
    }

    /// Number of completed trials.
    fn completed(&self) -> usize {
        self.trials().iter().filter(|t| t.status == TrialStatus::Completed).count()
    }
}

impl<S: TuneSearcher + ?Sized> TuneSearcher for Box<S> {
    fn suggest(&mut self) -> Result<Trial> {
        (**self).suggest()
    }

    fn record(&mut self, trial: Trial) {
        (**self).record(trial);
    }

    fn trials(&self) -> &[Trial] {
        (**self).trials()
    }

    fn reseed(&mut self, salt: u64) {
        (**self).reseed(salt);
    }

    fn exhaustive(&self) -> bool {
        (**self).exhaustive()
    }
}
