use log::info;

use crate::data::dataset::check_rows;
use crate::error::{ClassifierError, DatasetError};
use crate::eval::evaluator::evaluate;
use crate::eval::metrics::TrainingMetrics;
use crate::network::config::NetworkConfig;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochLoss;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// A freshly trained network together with its hold-out metrics.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub network: Network,
    pub metrics: TrainingMetrics,
    pub loss_history: Vec<EpochLoss>,
}

/// Builds a new network from `config`, trains it on the training split and
/// scores it on the test split.
///
/// Configuration and dataset shape are validated before any parameters are
/// allocated. `train_config.epochs == 0` is valid and evaluates the freshly
/// initialized network.
pub fn train(
    config: NetworkConfig,
    train_features: &[Vec<f64>],
    train_labels: &[u8],
    test_features: &[Vec<f64>],
    test_labels: &[u8],
    train_config: &TrainConfig,
) -> Result<TrainingOutcome, ClassifierError> {
    config.validate()?;
    train_config.validate()?;
    check_rows(train_features, train_labels, config.input_size)?;
    check_rows(test_features, test_labels, config.input_size)?;
    if train_features.is_empty() {
        return Err(DatasetError::Empty.into());
    }

    info!(
        "training {:?} {} network on {} samples for {} epochs (lr {})",
        config.hidden_layer_sizes,
        config.activation_function,
        train_features.len(),
        train_config.epochs,
        config.learning_rate
    );

    let mut network = Network::new(config)?;
    let loss_history = train_loop(&mut network, train_features, train_labels, train_config);
    let eval = evaluate(&network, test_features, test_labels)?;

    let spam_emails = train_labels.iter().chain(test_labels).filter(|&&l| l == 1).count();
    let total_emails = train_features.len() + test_features.len();
    let metrics = TrainingMetrics {
        total_emails,
        spam_emails,
        non_spam_emails: total_emails - spam_emails,
        feature_dimensions: network.input_size(),
        train_size: train_features.len(),
        test_size: test_features.len(),
        accuracy: 0.0,
        spam_detection_rate: 0.0,
        non_spam_detection_rate: 0.0,
        hidden_layer_sizes: network.hidden_layer_sizes().to_vec(),
        num_hidden_layers: network.num_hidden_layers(),
        activation_function: network.activation(),
    }
    .with_evaluation(&eval);

    info!(
        "training finished: accuracy {:.4}, spam recall {:.4}, non-spam recall {:.4}",
        metrics.accuracy, metrics.spam_detection_rate, metrics.non_spam_detection_rate
    );

    Ok(TrainingOutcome { network, metrics, loss_history })
}
