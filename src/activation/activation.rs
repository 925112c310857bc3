use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Slope applied to negative inputs by `LeakyReLU`.
pub const LEAKY_SLOPE: f64 = 0.01;

/// Hidden-layer nonlinearities a network can be configured with.
///
/// The output layer is always `Sigmoid`, whatever is configured here.
/// Names on the wire are `SIGMOID`, `TANH`, `RELU` and `LEAKY_RELU`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationFunction {
    #[serde(rename = "SIGMOID")]
    Sigmoid,
    #[serde(rename = "TANH")]
    Tanh,
    #[serde(rename = "RELU")]
    ReLU,
    #[serde(rename = "LEAKY_RELU")]
    LeakyReLU,
}

impl ActivationFunction {
    pub const ALL: [ActivationFunction; 4] = [
        ActivationFunction::Sigmoid,
        ActivationFunction::Tanh,
        ActivationFunction::ReLU,
        ActivationFunction::LeakyReLU,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid   => "SIGMOID",
            ActivationFunction::Tanh      => "TANH",
            ActivationFunction::ReLU      => "RELU",
            ActivationFunction::LeakyReLU => "LEAKY_RELU",
        }
    }

    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid   => sigmoid(x),
            ActivationFunction::Tanh      => x.tanh(),
            ActivationFunction::ReLU      => relu(x),
            ActivationFunction::LeakyReLU => leaky_relu(x),
        }
    }

    /// Element-wise derivative, always called with the raw pre-activation `x`.
    ///
    /// Sigmoid and tanh first re-activate `x` and express the slope through
    /// the activated value (`f·(1-f)` and `1-f²`). ReLU and leaky ReLU read
    /// the slope straight off the sign of `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid   => sigmoid_derivative(x),
            ActivationFunction::Tanh      => tanh_derivative(x),
            ActivationFunction::ReLU      => relu_derivative(x),
            ActivationFunction::LeakyReLU => leaky_relu_derivative(x),
        }
    }

    /// Resolves the function pair once so hot loops skip the dispatch.
    pub fn activator(self) -> Activator {
        let (forward, derivative): (fn(f64) -> f64, fn(f64) -> f64) = match self {
            ActivationFunction::Sigmoid   => (sigmoid, sigmoid_derivative),
            ActivationFunction::Tanh      => (f64::tanh, tanh_derivative),
            ActivationFunction::ReLU      => (relu, relu_derivative),
            ActivationFunction::LeakyReLU => (leaky_relu, leaky_relu_derivative),
        };
        Activator { kind: self, forward, derivative }
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivationFunction {
    type Err = ConfigError;

    /// Case-insensitive; `"relu"`, `"Leaky_ReLU"` and `"SIGMOID"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ActivationFunction::ALL
            .iter()
            .copied()
            .find(|a| a.name() == upper)
            .ok_or_else(|| ConfigError::UnknownActivation(s.to_owned()))
    }
}

/// A forward/derivative pair selected once at layer construction.
#[derive(Clone, Copy)]
pub struct Activator {
    kind: ActivationFunction,
    forward: fn(f64) -> f64,
    derivative: fn(f64) -> f64,
}

impl Activator {
    pub fn kind(&self) -> ActivationFunction {
        self.kind
    }

    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        (self.forward)(x)
    }

    #[inline]
    pub fn slope(&self, x: f64) -> f64 {
        (self.derivative)(x)
    }
}

impl fmt::Debug for Activator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Activator").field(&self.kind).finish()
    }
}

impl PartialEq for Activator {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn sigmoid_derivative(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}

fn tanh_derivative(x: f64) -> f64 {
    let t = x.tanh();
    1.0 - t * t
}

fn relu(x: f64) -> f64 {
    if x > 0.0 { x } else { 0.0 }
}

fn relu_derivative(x: f64) -> f64 {
    if x > 0.0 { 1.0 } else { 0.0 }
}

fn leaky_relu(x: f64) -> f64 {
    if x > 0.0 { x } else { LEAKY_SLOPE * x }
}

fn leaky_relu_derivative(x: f64) -> f64 {
    if x > 0.0 { 1.0 } else { LEAKY_SLOPE }
}
