//! Afinar CLI
//!
//! Inspect the search space, build individual models and review recorded
//! trials from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the declared hyperparameters
//! afinar space
//!
//! # Build one model and print its summary
//! afinar build --set model_type=mlp --set mlp_layers=1 --set units_0=128 --set dropout=true --summary
//!
//! # Draw reproducible samples
//! afinar sample -n 10 --seed 42
//!
//! # Show the leaderboard of a tuning project
//! afinar trials tune.yaml --top 5
//! ```

use afinar::cli::{run_command, Cli};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
