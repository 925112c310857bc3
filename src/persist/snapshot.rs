use serde::{Deserialize, Serialize};

use crate::activation::ActivationFunction;
use crate::error::PersistError;
use crate::eval::metrics::TrainingMetrics;
use crate::network::config::{default_seed, NetworkConfig};
use crate::network::network::Network;

/// Key of the single retained snapshot.
pub const PRETRAINED_MODEL_ID: &str = "pretrained_model";

/// Detached copy of a trained network and the metrics it was trained with.
///
/// Weights are `[layer][from][to]`, biases `[layer][neuron]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedModel {
    pub id: String,
    pub weights: Vec<Vec<Vec<f64>>>,
    pub biases: Vec<Vec<f64>>,
    pub input_size: usize,
    pub hidden_sizes: Vec<usize>,
    pub learning_rate: f64,
    pub activation_function: ActivationFunction,
    /// Initialization seed of the captured network; snapshots written
    /// without one load with the default.
    #[serde(default = "default_seed")]
    pub seed: u64,
    pub metrics: TrainingMetrics,
}

impl PersistedModel {
    pub fn capture(network: &Network, metrics: TrainingMetrics) -> PersistedModel {
        PersistedModel {
            id: PRETRAINED_MODEL_ID.to_owned(),
            weights: network.weights(),
            biases: network.biases(),
            input_size: network.input_size(),
            hidden_sizes: network.hidden_layer_sizes().to_vec(),
            learning_rate: network.learning_rate(),
            activation_function: network.activation(),
            seed: network.config().seed,
            metrics,
        }
    }

    /// Rebuilds an inference-ready network with exactly the stored parameters.
    pub fn to_network(&self) -> Result<Network, PersistError> {
        let config = NetworkConfig::new(
            self.input_size,
            self.hidden_sizes.clone(),
            self.learning_rate,
            self.activation_function,
        )
        .with_seed(self.seed);
        if self.weights.len() != self.biases.len() {
            return Err(PersistError::Corrupt(format!(
                "{} weight layers but {} bias layers",
                self.weights.len(),
                self.biases.len()
            )));
        }
        let parameters = self.weights.iter().cloned().zip(self.biases.iter().cloned()).collect();
        Network::from_parameters(config, parameters).map_err(|e| PersistError::Corrupt(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::config::DEFAULT_SEED;

    fn metrics() -> TrainingMetrics {
        TrainingMetrics {
            total_emails: 4,
            spam_emails: 2,
            non_spam_emails: 2,
            feature_dimensions: 3,
            train_size: 3,
            test_size: 1,
            accuracy: 1.0,
            spam_detection_rate: 1.0,
            non_spam_detection_rate: 0.0,
            hidden_layer_sizes: vec![2],
            num_hidden_layers: 1,
            activation_function: ActivationFunction::Sigmoid,
        }
    }

    #[test]
    fn restored_network_equals_original() {
        let cfg = NetworkConfig::new(3, vec![2], 0.1, ActivationFunction::Sigmoid).with_seed(9);
        let net = Network::new(cfg).unwrap();
        let restored = PersistedModel::capture(&net, metrics()).to_network().unwrap();
        assert_eq!(restored.config().seed, 9);
        assert_eq!(restored, net);
    }

    #[test]
    fn missing_seed_loads_as_default() {
        let cfg = NetworkConfig::new(3, vec![2], 0.1, ActivationFunction::Sigmoid).with_seed(9);
        let net = Network::new(cfg).unwrap();
        let mut value = serde_json::to_value(PersistedModel::capture(&net, metrics())).unwrap();
        value.as_object_mut().unwrap().remove("seed");
        let snapshot: PersistedModel = serde_json::from_value(value).unwrap();
        assert_eq!(snapshot.seed, DEFAULT_SEED);
        assert_eq!(snapshot.to_network().unwrap().weights(), net.weights());
    }

    #[test]
    fn mismatched_layer_counts_are_corrupt() {
        let net = Network::new(NetworkConfig::new(3, vec![2], 0.1, ActivationFunction::Sigmoid)).unwrap();
        let mut snapshot = PersistedModel::capture(&net, metrics());
        snapshot.biases.pop();
        assert!(matches!(snapshot.to_network(), Err(PersistError::Corrupt(_))));
    }
}
