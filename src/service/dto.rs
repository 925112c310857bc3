use serde::{Deserialize, Serialize};

use crate::eval::metrics::TrainingMetrics;
use crate::eval::evaluator::DECISION_THRESHOLD;
use crate::train::epoch_stats::EpochLoss;

/// Parameters of a training run as submitted by a client.
///
/// Hidden sizes and the activation name arrive unvalidated; the service
/// rejects bad values before any training work starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRequest {
    #[serde(default)]
    pub hidden_sizes: Vec<i64>,
    pub activation_function: String,
    pub learning_rate: f64,
    pub epochs: usize,
    #[serde(default)]
    pub report_interval: Option<usize>,
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingReport {
    pub status: &'static str,
    pub message: String,
    pub metrics: TrainingMetrics,
    pub epoch_losses: Vec<EpochLoss>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub prediction: f64,
    pub is_spam: bool,
    pub classification: String,
    /// Probability of the predicted class.
    pub confidence: f64,
    pub model_info: String,
}

impl Prediction {
    pub fn from_probability(prediction: f64, model_info: String) -> Prediction {
        let is_spam = prediction > DECISION_THRESHOLD;
        Prediction {
            prediction,
            is_spam,
            classification: if is_spam { "SPAM" } else { "NOT SPAM" }.to_owned(),
            confidence: if is_spam { prediction } else { 1.0 - prediction },
            model_info,
        }
    }
}
