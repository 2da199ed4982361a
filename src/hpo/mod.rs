//! Hyperparameter Optimization Module
//!
//! Typed search spaces, per-trial assignments and the samplers that produce
//! them.
//!
//! A space is declared once, up front. Each trial gets a fresh [`Assignment`]
//! from a [`TuneSearcher`], and a model factory reads it through the
//! [`HyperParameters`] view, which rejects undeclared names, conflicting
//! domains and out-of-domain values instead of coercing them.
//!
//! # Example
//!
//! ```
//! use afinar::hpo::{HyperParameters, HyperparameterSpace, RandomSearch, TuneSearcher};
//!
//! let mut space = HyperparameterSpace::new();
//! space.choice("model_type", &["mlp", "cnn"])?;
//! space.int_range("units_0", 32, 128, 32)?;
//! space.boolean("dropout")?;
//!
//! let mut searcher = RandomSearch::new(space.clone(), Some(42));
//! let trial = searcher.suggest()?;
//!
//! let mut hp = HyperParameters::new(&space, &trial.assignment);
//! let units = hp.int_range("units_0", 32, 128, 32)?;
//! assert!([32, 64, 96, 128].contains(&units));
//! # Ok::<(), afinar::hpo::HPOError>(())
//! ```

mod error;
mod grid;
mod hyperparameters;
mod random;
mod searcher;
mod types;

pub use error::{HPOError, Result};
pub use grid::GridSearch;
pub use hyperparameters::HyperParameters;
pub use random::RandomSearch;
pub use searcher::TuneSearcher;
pub use types::{
    Assignment, HyperparameterSpace, HyperparameterSpec, ParameterDomain, ParameterKind,
    ParameterValue, Trial, TrialStatus,
};
