//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! afinar space
//! afinar build --set model_type=cnn --set cnn_layers=2 --set filters_0=32 \
//!     --set filters_1=64 --set dropout=false --summary
//! afinar build assignment.yaml --format json
//! afinar sample -n 10 --seed 42
//! afinar trials tune.yaml --top 5
//! afinar validate tune.yaml
//! afinar info tune.yaml
//! ```

mod core;
mod types;

#[cfg(test)]
mod tests;

pub use core::{
    parse_args, parse_key_value, BuildArgs, Cli, Command, InfoArgs, SampleArgs, SpaceArgs, TrialsArgs,
    ValidateArgs,
};
pub use types::OutputFormat;
