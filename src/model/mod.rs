//! Model topology descriptions
//!
//! A [`ModelSpec`] is an inert, framework-independent layer sequence. The
//! [`HyperModel`] trait maps one hyperparameter assignment to one spec;
//! [`ImageClassifier`] is the MLP-or-CNN family for 28x28x1 inputs.
//!
//! # Example
//!
//! ```
//! use afinar::hpo::Assignment;
//! use afinar::model::build;
//!
//! let assignment = Assignment::new()
//!     .with("model_type", "mlp")
//!     .with("mlp_layers", 1)
//!     .with("units_0", 128)
//!     .with("dropout", true);
//!
//! let spec = build(&assignment)?;
//! assert_eq!(spec.to_string(), "[flatten, dense(128, relu), dropout(0.5), dense(10, softmax)]");
//! # Ok::<(), afinar::Error>(())
//! ```

mod error;
mod factory;
mod layer;
mod spec;


pub use error::{ModelError, Result};
pub use factory::{
    build, build_assignment, filters_name, units_name, BuiltModel, HyperModel, ImageClassifier,
    CNN_LAYERS, DROPOUT, DROPOUT_RATE, KERNEL_SIZE, MAX_DEPTH, MAX_WIDTH, MIN_WIDTH, MLP_LAYERS,
    MODEL_TYPE, MODEL_TYPES, POOL_SIZE, WIDTH_STEP,
};
pub use layer::{Activation, Layer};
pub use spec::{LayerSummary, ModelSpec, ModelSpecBuilder, ModelSummary};
