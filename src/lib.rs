//! # afinar
//!
//! Hyperparameter search for small image classifiers.
//!
//! A hyper-model declares a typed search space (choices, stepped integer
//! ranges and booleans) and maps one concrete assignment of that space to an
//! inert model topology, either an MLP or a CNN. A tuner samples assignments,
//! hands each built topology to an external trainer and records the results.
//!
//! ## Example
//!
//! ```
//! use afinar::hpo::Assignment;
//! use afinar::model::build;
//!
//! # fn main() -> afinar::Result<()> {
//! let assignment = Assignment::new()
//!     .with("model_type", "mlp")
//!     .with("mlp_layers", 1)
//!     .with("units_0", 128)
//!     .with("dropout", true);
//!
//! let model = build(&assignment)?;
//! assert_eq!(model.to_string(), "[flatten, dense(128, relu), dropout(0.5), dense(10, softmax)]");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`hpo`]: search space, assignments, accessor view, random and grid searchers
//! - [`model`]: layer stages, model specs and the MLP-or-CNN factory
//! - [`tuner`]: search loop delegating training to a [`tuner::TrialRunner`]
//! - [`tracking`]: trial records and recorders
//! - [`config`]: YAML configuration and CLI arguments

pub mod cli;
pub mod config;
pub mod error;
pub mod hpo;
pub mod model;
pub mod tracking;
pub mod tuner;

pub use error::{Error, Result};
