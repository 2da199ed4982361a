//! Model topology description and shape inference

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{ModelError, Result};
use super::layer::Layer;

/// Abstract layer sequence plus exactly one output stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    input_shape: [usize; 3],
    stages: Vec<Layer>,
    output: Layer,
}

/// Incremental [`ModelSpec`] assembly
#[derive(Debug, Clone)]
pub struct ModelSpecBuilder {
    input_shape: [usize; 3],
    stages: Vec<Layer>,
}

impl ModelSpecBuilder {
    /// Append a hidden stage
    pub fn push(&mut self, layer: Layer) -> &mut Self {
        self.stages.push(layer);
        self
    }

    /// Close the model with its output stage
    pub fn finish(self, output: Layer) -> Result<ModelSpec> {
        if self.stages.is_empty() {
            return Err(ModelError::EmptyModel);
        }
        if !matches!(output, Layer::Dense { .. }) {
            return Err(ModelError::InvalidOutput(output.to_string()));
        }
        Ok(ModelSpec { input_shape: self.input_shape, stages: self.stages, output })
    }
}

impl ModelSpec {
    /// Start a model over inputs of shape `[height, width, channels]`
    pub fn builder(input_shape: [usize; 3]) -> ModelSpecBuilder {
        ModelSpecBuilder { input_shape, stages: Vec::new() }
    }

    pub fn input_shape(&self) -> [usize; 3] {
        self.input_shape
    }

    /// Hidden stages in order
    pub fn stages(&self) -> &[Layer] {
        &self.stages
    }

    /// Final classification stage
    pub fn output(&self) -> &Layer {
        &self.output
    }

    /// All stages including the output
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.stages.iter().chain(std::iter::once(&self.output))
    }

    /// Width of the output stage
    pub fn output_units(&self) -> usize {
        match self.output {
            Layer::Dense { units, .. } => units,
            _ => 0,
        }
    }

    /// Widths of hidden dense stages
    pub fn dense_units(&self) -> Vec<usize> {
        self.stages
            .iter()
            .filter_map(|l| match l {
                Layer::Dense { units, .. } => Some(*units),
                _ => None,
            })
            .collect()
    }

    /// Filter counts of convolutions immediately followed by pooling
    pub fn conv_blocks(&self) -> Vec<usize> {
        self.stages
            .windows(2)
            .filter_map(|w| match (&w[0], &w[1]) {
                (Layer::Conv2D { filters, .. }, Layer::MaxPool2D { .. }) => Some(*filters),
                _ => None,
            })
            .collect()
    }

    /// Number of dropout stages
    pub fn dropout_count(&self) -> usize {
        self.stages.iter().filter(|l| matches!(l, Layer::Dropout { .. })).count()
    }

    /// Infer output shapes and parameter counts stage by stage
    pub fn summary(&self) -> Result<ModelSummary> {
        let mut shape = self.input_shape.to_vec();
        let mut rows = Vec::with_capacity(self.stages.len() + 1);
        for (index, layer) in self.layers().enumerate() {
            let (next, params) = infer(layer, &shape)?;
            rows.push(LayerSummary {
                name: format!("{}_{index}", layer.kind_name()),
                layer: layer.to_string(),
                output_shape: next.clone(),
                params,
            });
            shape = next;
        }
        let total_params = rows
            .iter()
            .try_fold(0usize, |acc, r| acc.checked_add(r.params))
            .ok_or_else(|| ModelError::ParamOverflow(self.to_string()))?;
        Ok(ModelSummary { input_shape: self.input_shape, layers: rows, total_params })
    }
}

fn invalid(layer: &Layer, shape: &[usize]) -> ModelError {
    ModelError::InvalidShape { stage: layer.to_string(), shape: shape.to_vec() }
}

/// Output shape and parameter count of `layer` applied to `shape`
fn infer(layer: &Layer, shape: &[usize]) -> Result<(Vec<usize>, usize)> {
    match layer {
        Layer::Flatten => {
            let size = shape.iter().try_fold(1usize, |acc, d| acc.checked_mul(*d));
            Ok((vec![size.ok_or_else(|| invalid(layer, shape))?], 0))
        }
        Layer::Dense { units, .. } => {
            let (last, batch_dims) = shape.split_last().ok_or_else(|| invalid(layer, shape))?;
            let mut out = batch_dims.to_vec();
            out.push(*units);
            let params = last.checked_add(1).and_then(|n| n.checked_mul(*units));
            Ok((out, params.ok_or_else(|| invalid(layer, shape))?))
        }
        Layer::Conv2D { filters, kernel_size: [kh, kw], .. } => match shape {
            [h, w, c] if h >= kh && w >= kw && *kh > 0 && *kw > 0 => {
                let params = kh
                    .checked_mul(*kw)
                    .and_then(|n| n.checked_mul(*c))
                    .and_then(|n| n.checked_add(1))
                    .and_then(|n| n.checked_mul(*filters))
                    .ok_or_else(|| invalid(layer, shape))?;
                Ok((vec![h - kh + 1, w - kw + 1, *filters], params))
            }
            _ => Err(invalid(layer, shape)),
        },
        Layer::MaxPool2D { pool_size: [ph, pw] } => match shape {
            [h, w, c] if *ph > 0 && *pw > 0 && h >= ph && w >= pw => {
                Ok((vec![h / ph, w / pw, *c], 0))
            }
            _ => Err(invalid(layer, shape)),
        },
        Layer::Dropout { .. } => Ok((shape.to_vec(), 0)),
    }
}

impl fmt::Display for ModelSpec {
    /// Compact notation, e.g. `[conv(32)+pool, flatten, dense(10, softmax)]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(self.stages.len() + 1);
        let mut i = 0;
        while i < self.stages.len() {
            match (&self.stages[i], self.stages.get(i + 1)) {
                (conv @ Layer::Conv2D { .. }, Some(pool @ Layer::MaxPool2D { .. })) => {
                    parts.push(format!("{conv}+{pool}"));
                    i += 2;
                }
                (layer, _) => {
                    parts.push(layer.to_string());
                    i += 1;
                }
            }
        }
        parts.push(self.output.to_string());
        write!(f, "[{}]", parts.join(", "))
    }
}

/// One row of a [`ModelSummary`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSummary {
    pub name: String,
    pub layer: String,
    pub output_shape: Vec<usize>,
    pub params: usize,
}

/// Per-stage output shapes and trainable parameter counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub input_shape: [usize; 3],
    pub layers: Vec<LayerSummary>,
    pub total_params: usize,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<16} {:<20} {:>14}", "Layer", "Output Shape", "Params")?;
        writeln!(f, "{}", "-".repeat(52))?;
        for row in &self.layers {
            let shape = format!("{:?}", row.output_shape);
            writeln!(f, "{:<16} {:<20} {:>14}", row.name, shape, row.params)?;
        }
        writeln!(f, "{}", "-".repeat(52))?;
        write!(f, "Total params: {}", self.total_params)
    }
}
