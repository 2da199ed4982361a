//! Model factory: assignment -> topology
//!
//! [`ImageClassifier`] is the MLP-or-CNN hyper-model for small grayscale
//! images. Its branching is fixed:
//!
//! ```text
//! model_type = mlp:  flatten, dense(units_i, relu) x mlp_layers
//! model_type = cnn:  [conv(filters_i, 3x3, relu), pool(2x2)] x cnn_layers, flatten
//! dropout:           dropout(0.5)
//! output:            dense(num_classes, softmax)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hpo::{self, Assignment, HPOError, HyperParameters, HyperparameterSpace};

use super::layer::{Activation, Layer};
use super::spec::ModelSpec;

pub const MODEL_TYPE: &str = "model_type";
pub const MODEL_TYPES: [&str; 2] = ["mlp", "cnn"];
pub const MLP_LAYERS: &str = "mlp_layers";
pub const CNN_LAYERS: &str = "cnn_layers";
pub const DROPOUT: &str = "dropout";

pub const MAX_DEPTH: i64 = 3;
pub const MIN_WIDTH: i64 = 32;
pub const MAX_WIDTH: i64 = 128;
pub const WIDTH_STEP: i64 = 32;
pub const KERNEL_SIZE: usize = 3;
pub const POOL_SIZE: usize = 2;
pub const DROPOUT_RATE: f64 = 0.5;

/// Name of the `i`-th dense width parameter
pub fn units_name(i: i64) -> String {
    format!("units_{i}")
}

/// Name of the `i`-th convolution filter-count parameter
pub fn filters_name(i: i64) -> String {
    format!("filters_{i}")
}

/// A model family parameterized by hyperparameters.
pub trait HyperModel {
    /// Declare every hyperparameter [`HyperModel::build`] may read.
    fn declare(&self, space: &mut HyperparameterSpace) -> hpo::Result<()>;

    /// Build one topology from the values in `hp`.
    ///
    /// Must be deterministic and free of side effects.
    fn build(&self, hp: &mut HyperParameters<'_>) -> Result<ModelSpec>;

    /// Fresh space holding this model's declarations.
    fn search_space(&self) -> hpo::Result<HyperparameterSpace> {
        let mut space = HyperparameterSpace::new();
        self.declare(&mut space)?;
        Ok(space)
    }
}

/// Result of building one assignment
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltModel {
    pub spec: ModelSpec,
    /// The assignment restricted to the names `build` read
    pub active: Assignment,
    /// Names supplied but never read (inactive branches)
    pub unused: Vec<String>,
}

/// Validate `assignment` against `space`, then build it
///
/// Unknown names and out-of-domain values fail before the model is touched.
/// Declared names left unread by the chosen branch are reported in
/// [`BuiltModel::unused`], not rejected.
pub fn build_assignment<H: HyperModel + ?Sized>(
    model: &H,
    space: &HyperparameterSpace,
    assignment: &Assignment,
) -> Result<BuiltModel> {
    space.validate(assignment)?;
    let mut hp = HyperParameters::new(space, assignment);
    let spec = model.build(&mut hp)?;
    Ok(BuiltModel {
        spec,
        active: hp.active_assignment(),
        unused: hp.unused().into_iter().map(String::from).collect(),
    })
}

/// Build an [`ImageClassifier`] with the default 28x28x1 input and 10 classes
pub fn build(assignment: &Assignment) -> Result<ModelSpec> {
    let model = ImageClassifier::default();
    let space = model.search_space()?;
    Ok(build_assignment(&model, &space, assignment)?.spec)
}

/// MLP-or-CNN image classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageClassifier {
    /// `[height, width, channels]`
    pub input_shape: [usize; 3],
    pub num_classes: usize,
}

impl Default for ImageClassifier {
    fn default() -> Self {
        Self { input_shape: [28, 28, 1], num_classes: 10 }
    }
}

impl ImageClassifier {
    pub fn new(input_shape: [usize; 3], num_classes: usize) -> Self {
        Self { input_shape, num_classes }
    }
}

fn width(hp: &mut HyperParameters<'_>, name: &str) -> Result<usize> {
    let value = hp.int_range(name, MIN_WIDTH, MAX_WIDTH, WIDTH_STEP)?;
    usize::try_from(value).map_err(|_| HPOError::out_of_domain(name, value).into())
}

impl HyperModel for ImageClassifier {
    fn declare(&self, space: &mut HyperparameterSpace) -> hpo::Result<()> {
        space.choice(MODEL_TYPE, &MODEL_TYPES)?;
        space.int_range(MLP_LAYERS, 1, MAX_DEPTH, 1)?;
        for i in 0..MAX_DEPTH {
            space.int_range(&units_name(i), MIN_WIDTH, MAX_WIDTH, WIDTH_STEP)?;
        }
        space.int_range(CNN_LAYERS, 1, MAX_DEPTH, 1)?;
        for i in 0..MAX_DEPTH {
            space.int_range(&filters_name(i), MIN_WIDTH, MAX_WIDTH, WIDTH_STEP)?;
        }
        space.boolean(DROPOUT)
    }

    fn build(&self, hp: &mut HyperParameters<'_>) -> Result<ModelSpec> {
        let mut model = ModelSpec::builder(self.input_shape);

        match hp.choice(MODEL_TYPE, &MODEL_TYPES)? {
            "mlp" => {
                model.push(Layer::Flatten);
                for i in 0..hp.int_range(MLP_LAYERS, 1, MAX_DEPTH, 1)? {
                    let units = width(hp, &units_name(i))?;
                    model.push(Layer::dense(units, Activation::Relu));
                }
            }
            "cnn" => {
                for i in 0..hp.int_range(CNN_LAYERS, 1, MAX_DEPTH, 1)? {
                    let filters = width(hp, &filters_name(i))?;
                    model.push(Layer::conv2d(filters, KERNEL_SIZE, Activation::Relu));
                    model.push(Layer::max_pool2d(POOL_SIZE));
                }
                model.push(Layer::Flatten);
            }
            other => return Err(HPOError::out_of_domain(MODEL_TYPE, other).into()),
        }

        if hp.boolean(DROPOUT)? {
            model.push(Layer::dropout(DROPOUT_RATE));
        }

        Ok(model.finish(Layer::dense(self.num_classes, Activation::Softmax))?)
    }
}
