//! Layer descriptors

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed nonlinearity applied by a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Relu,
    Softmax,
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::Relu => write!(f, "relu"),
            Activation::Softmax => write!(f, "softmax"),
        }
    }
}

/// One stage of a model topology
///
/// Inert description only. Nothing here owns weights or runs a forward pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    /// Collapse all non-batch dimensions into one
    Flatten,
    /// Fully connected layer
    Dense { units: usize, activation: Activation },
    /// 2-D convolution, valid padding, stride 1
    #[serde(rename = "conv2d")]
    Conv2D { filters: usize, kernel_size: [usize; 2], activation: Activation },
    /// Non-overlapping 2-D max pooling
    #[serde(rename = "max_pool2d")]
    MaxPool2D { pool_size: [usize; 2] },
    /// Dropout with a fixed rate
    Dropout { rate: f64 },
}

impl Layer {
    pub fn dense(units: usize, activation: Activation) -> Self {
        Layer::Dense { units, activation }
    }

    pub fn conv2d(filters: usize, kernel: usize, activation: Activation) -> Self {
        Layer::Conv2D { filters, kernel_size: [kernel, kernel], activation }
    }

    pub fn max_pool2d(pool: usize) -> Self {
        Layer::MaxPool2D { pool_size: [pool, pool] }
    }

    pub fn dropout(rate: f64) -> Self {
        Layer::Dropout { rate }
    }

    /// Short lowercase name used for summary rows
    pub fn kind_name(&self) -> &'static str {
        match self {
            Layer::Flatten => "flatten",
            Layer::Dense { .. } => "dense",
            Layer::Conv2D { .. } => "conv2d",
            Layer::MaxPool2D { .. } => "max_pool2d",
            Layer::Dropout { .. } => "dropout",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Flatten => write!(f, "flatten"),
            Layer::Dense { units, activation } => write!(f, "dense({units}, {activation})"),
            Layer::Conv2D { filters, .. } => write!(f, "conv({filters})"),
            Layer::MaxPool2D { .. } => write!(f, "pool"),
            Layer::Dropout { rate } => write!(f, "dropout({rate})"),
        }
    }
}
