//! Configuration validation
//!
//! Validates tuning configurations for correctness before a search starts.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::validate_config;
