use rand::Rng;

use crate::{activation::{ActivationFunction, Activator}, math::matrix::Matrix};

/// Scale applied to the standard-normal draws used for initial parameters.
pub const INIT_SCALE: f64 = 0.1;

/// One fully connected layer: `inputs × size` weights plus `size` biases.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub weights: Matrix,
    pub biases: Vec<f64>,
    activator: Activator,
}

/// Values captured by a training forward pass through one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerOutput {
    /// Weighted sums plus bias, before the activation.
    pub pre_activation: Vec<f64>,
    pub activation: Vec<f64>,
}

impl Layer {
    /// Draws every weight (row by row) and then every bias from `rng`.
    pub fn random<R: Rng + ?Sized>(
        input_size: usize,
        size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        let weights = Matrix::gaussian(input_size, size, INIT_SCALE, rng);
        let biases = Matrix::gaussian(1, size, INIT_SCALE, rng).row(0).to_vec();
        Layer { weights, biases, activator: activation.activator() }
    }

    /// Wraps existing parameters. Returns `None` if the bias count does not
    /// match the weight matrix's column count.
    pub fn from_parameters(weights: Matrix, biases: Vec<f64>, activation: ActivationFunction) -> Option<Layer> {
        if weights.cols() != biases.len() {
            return None;
        }
        Some(Layer { weights, biases, activator: activation.activator() })
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows()
    }

    pub fn size(&self) -> usize {
        self.biases.len()
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activator.kind()
    }

    pub fn activator(&self) -> &Activator {
        &self.activator
    }

    /// `bias[j] + Σ_i input[i] · weight[i][j]` for every neuron `j`.
    pub fn pre_activation(&self, input: &[f64]) -> Vec<f64> {
        (0..self.size())
            .map(|j| {
                let mut sum = self.biases[j];
                for (i, x) in input.iter().enumerate() {
                    sum += x * self.weights[(i, j)];
                }
                sum
            })
            .collect()
    }

    pub fn feed_from(&self, input: &[f64]) -> Vec<f64> {
        self.pre_activation(input)
            .into_iter()
            .map(|z| self.activator.apply(z))
            .collect()
    }

    /// Like `feed_from`, but keeps the pre-activation sums for backprop.
    pub fn feed_traced(&self, input: &[f64]) -> LayerOutput {
        let pre_activation = self.pre_activation(input);
        let activation = pre_activation.iter().map(|&z| self.activator.apply(z)).collect();
        LayerOutput { pre_activation, activation }
    }
}
