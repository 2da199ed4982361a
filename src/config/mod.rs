//! Declarative YAML configuration and the command-line surface
//!
//! A tuning run is described by one [`TuneConfig`] document:
//!
//! ```yaml
//! project:
//!   directory: tuning
//!   name: mnist
//! strategy: random
//! seed: 42
//! max_trials: 20
//! epochs: 2
//! objective:
//!   name: val_accuracy
//!   direction: max
//! ```

pub mod cli;
mod loader;
mod schema;
mod validate;

pub use cli::{
    parse_args, BuildArgs, Cli, Command, InfoArgs, OutputFormat, SampleArgs, SpaceArgs, TrialsArgs,
    ValidateArgs,
};
pub use loader::{load_config, parse_config};
pub use schema::{ProjectConfig, TuneConfig, TuneStrategy};
pub use validate::{validate_config, ValidationError};
