use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::activation::ActivationFunction;
use crate::error::{ClassifierError, ConfigError};
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;
use crate::network::summary::ArchitectureSummary;

/// A feed-forward binary classifier: the configured hidden layers followed
/// by one sigmoid output neuron.
///
/// The network owns its parameters; only the optimizer mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    config: NetworkConfig,
    layers: Vec<Layer>,
}

/// Intermediate values of one training forward pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ForwardTrace {
    /// `activations[0]` is the raw input; `activations[l + 1]` is the
    /// output of layer `l`.
    pub activations: Vec<Vec<f64>>,
    /// `pre_activations[l]` are layer `l`'s weighted sums plus bias.
    pub pre_activations: Vec<Vec<f64>>,
}

impl ForwardTrace {
    /// The network's output probability.
    pub fn output(&self) -> f64 {
        self.activations.last().and_then(|a| a.first()).copied().unwrap_or(0.0)
    }
}

impl Network {
    /// Builds a network with freshly initialized parameters.
    ///
    /// Every weight and bias is `N(0, 1) * 0.1`, drawn layer by layer
    /// (weights row by row, then biases) from an RNG seeded with
    /// `config.seed`.
    pub fn new(config: NetworkConfig) -> Result<Network, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let last = config.num_hidden_layers();
        let layers = config
            .layer_shapes()
            .into_iter()
            .enumerate()
            .map(|(idx, (fan_in, size))| {
                Layer::random(fan_in, size, layer_activation(&config, idx, last), &mut rng)
            })
            .collect();
        Ok(Network { config, layers })
    }

    /// Rebuilds a network from explicit `(weights, biases)` per layer.
    ///
    /// Weights are indexed `[from][to]`. Every shape must match what
    /// `config.layer_shapes()` derives.
    pub fn from_parameters(
        config: NetworkConfig,
        parameters: Vec<(Vec<Vec<f64>>, Vec<f64>)>,
    ) -> Result<Network, ConfigError> {
        config.validate()?;
        let shapes = config.layer_shapes();
        if parameters.len() != shapes.len() {
            return Err(ConfigError::ParameterShape(format!(
                "expected {} layers, got {}",
                shapes.len(),
                parameters.len()
            )));
        }
        let last = config.num_hidden_layers();
        let mut layers = Vec::with_capacity(shapes.len());
        for (idx, ((weights, biases), (fan_in, size))) in parameters.into_iter().zip(shapes).enumerate() {
            let weights = Matrix::from_rows(weights)
                .filter(|m| m.rows() == fan_in && m.cols() == size)
                .ok_or_else(|| {
                    ConfigError::ParameterShape(format!("layer {} weights must be {}x{}", idx, fan_in, size))
                })?;
            let layer = Layer::from_parameters(weights, biases, layer_activation(&config, idx, last))
                .ok_or_else(|| {
                    ConfigError::ParameterShape(format!("layer {} needs {} biases", idx, size))
                })?;
            layers.push(layer);
        }
        Ok(Network { config, layers })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn input_size(&self) -> usize {
        self.config.input_size
    }

    pub fn hidden_layer_sizes(&self) -> &[usize] {
        &self.config.hidden_layer_sizes
    }

    pub fn num_hidden_layers(&self) -> usize {
        self.config.num_hidden_layers()
    }

    pub fn activation(&self) -> ActivationFunction {
        self.config.activation_function
    }

    pub fn learning_rate(&self) -> f64 {
        self.config.learning_rate
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Output probability for `input`, in `(0, 1)`.
    pub fn predict(&self, input: &[f64]) -> Result<f64, ClassifierError> {
        self.check_input(input)?;
        Ok(self.forward(input))
    }

    pub(crate) fn check_input(&self, input: &[f64]) -> Result<(), ClassifierError> {
        if input.len() != self.input_size() {
            return Err(ClassifierError::InputSizeMismatch {
                expected: self.input_size(),
                actual: input.len(),
            });
        }
        Ok(())
    }

    /// Unchecked forward pass; callers guarantee `input.len() == input_size`.
    pub(crate) fn forward(&self, input: &[f64]) -> f64 {
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.feed_from(&current);
        }
        current.first().copied().unwrap_or(0.0)
    }

    /// Forward pass that keeps every layer's sums and outputs. Unchecked,
    /// like `forward`.
    pub(crate) fn forward_trace(&self, input: &[f64]) -> ForwardTrace {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        let mut pre_activations = Vec::with_capacity(self.layers.len());
        activations.push(input.to_vec());
        for layer in &self.layers {
            let out = layer.feed_traced(&activations[activations.len() - 1]);
            pre_activations.push(out.pre_activation);
            activations.push(out.activation);
        }
        ForwardTrace { activations, pre_activations }
    }

    pub fn describe(&self) -> ArchitectureSummary {
        ArchitectureSummary {
            input_size: self.input_size(),
            hidden_layer_sizes: self.config.hidden_layer_sizes.clone(),
            num_hidden_layers: self.num_hidden_layers(),
            activation_function: self.activation(),
            learning_rate: self.learning_rate(),
        }
    }

    /// Weights as `[layer][from][to]`.
    pub fn weights(&self) -> Vec<Vec<Vec<f64>>> {
        self.layers.iter().map(|l| l.weights.to_rows()).collect()
    }

    /// Biases as `[layer][neuron]`.
    pub fn biases(&self) -> Vec<Vec<f64>> {
        self.layers.iter().map(|l| l.biases.clone()).collect()
    }
}

/// Hidden layers use the configured activation; the output layer is sigmoid.
fn layer_activation(config: &NetworkConfig, idx: usize, output_idx: usize) -> ActivationFunction {
    if idx == output_idx {
        ActivationFunction::Sigmoid
    } else {
        config.activation_function
    }
}
