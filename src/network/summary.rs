use serde::{Deserialize, Serialize};

use crate::activation::ActivationFunction;

/// Human-facing description of a network's architecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureSummary {
    pub input_size: usize,
    pub hidden_layer_sizes: Vec<usize>,
    pub num_hidden_layers: usize,
    pub activation_function: ActivationFunction,
    pub learning_rate: f64,
}
