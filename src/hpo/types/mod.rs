//! Core HPO types

mod assignment;
mod parameter;
mod space;
mod trial;


// Re-export all public types
pub use assignment::Assignment;
pub use parameter::{ParameterDomain, ParameterKind, ParameterValue};
pub(crate) use space::check_value;
pub use space::{HyperparameterSpace, HyperparameterSpec};
pub use trial::{Trial, TrialStatus};
