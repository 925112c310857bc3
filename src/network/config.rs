use serde::{Deserialize, Serialize};

use crate::activation::ActivationFunction;
use crate::error::ConfigError;

/// Binary classification: a single sigmoid output neuron.
pub const OUTPUT_SIZE: usize = 1;

/// Upper bound on weights plus biases across all layers (128 MiB of `f64`).
pub const MAX_PARAMETERS: usize = 16_000_000;

/// Seed used for parameter initialization unless overridden.
pub const DEFAULT_SEED: u64 = 42;

pub(crate) fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Architecture and learning rate of a network.
///
/// Two networks built from equal configs (seed included) start from
/// bit-identical parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub input_size: usize,
    pub hidden_layer_sizes: Vec<usize>,
    pub activation_function: ActivationFunction,
    pub learning_rate: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl NetworkConfig {
    pub fn new(
        input_size: usize,
        hidden_layer_sizes: Vec<usize>,
        learning_rate: f64,
        activation_function: ActivationFunction,
    ) -> NetworkConfig {
        NetworkConfig {
            input_size,
            hidden_layer_sizes,
            activation_function,
            learning_rate,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> NetworkConfig {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_size == 0 {
            return Err(ConfigError::ZeroInputSize);
        }
        if self.hidden_layer_sizes.is_empty() {
            return Err(ConfigError::EmptyHiddenLayers);
        }
        if let Some(index) = self.hidden_layer_sizes.iter().position(|&s| s == 0) {
            return Err(ConfigError::NonPositiveLayerSize { index, size: 0 });
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        match self.parameter_count() {
            Some(n) if n <= MAX_PARAMETERS => Ok(()),
            _ => Err(ConfigError::TooManyParameters { limit: MAX_PARAMETERS }),
        }
    }

    /// Total weights and biases, or `None` if the count overflows `usize`.
    pub fn parameter_count(&self) -> Option<usize> {
        self.layer_shapes().into_iter().try_fold(0usize, |total, (fan_in, size)| {
            fan_in.checked_add(1)?.checked_mul(size)?.checked_add(total)
        })
    }

    pub fn num_hidden_layers(&self) -> usize {
        self.hidden_layer_sizes.len()
    }

    /// `(inputs, outputs)` for every layer, hidden layers first and the
    /// single-neuron output layer last.
    pub fn layer_shapes(&self) -> Vec<(usize, usize)> {
        let mut fan_in = self.input_size;
        let mut shapes = Vec::with_capacity(self.hidden_layer_sizes.len() + 1);
        for &size in &self.hidden_layer_sizes {
            shapes.push((fan_in, size));
            fan_in = size;
        }
        shapes.push((fan_in, OUTPUT_SIZE));
        shapes
    }
}

/// Converts hidden sizes as received on the wire, where negative numbers
/// are representable, into validated layer sizes.
pub fn hidden_sizes_from_signed(sizes: &[i64]) -> Result<Vec<usize>, ConfigError> {
    if sizes.is_empty() {
        return Err(ConfigError::EmptyHiddenLayers);
    }
    sizes
        .iter()
        .enumerate()
        .map(|(index, &size)| {
            if size > 0 {
                usize::try_from(size).map_err(|_| ConfigError::NonPositiveLayerSize { index, size })
            } else {
                Err(ConfigError::NonPositiveLayerSize { index, size })
            }
        })
        .collect()
}
