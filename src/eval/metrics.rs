use serde::{Deserialize, Serialize};

use crate::activation::ActivationFunction;
use crate::eval::evaluator::Evaluation;

/// Summary of one training run, as reported to clients and stored with a
/// persisted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingMetrics {
    pub total_emails: usize,
    pub spam_emails: usize,
    pub non_spam_emails: usize,
    pub feature_dimensions: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub accuracy: f64,
    pub spam_detection_rate: f64,
    pub non_spam_detection_rate: f64,
    pub hidden_layer_sizes: Vec<usize>,
    pub num_hidden_layers: usize,
    pub activation_function: ActivationFunction,
}

impl TrainingMetrics {
    pub fn with_evaluation(mut self, eval: &Evaluation) -> Self {
        self.accuracy = eval.accuracy;
        self.spam_detection_rate = eval.spam_detection_rate;
        self.non_spam_detection_rate = eval.non_spam_detection_rate;
        self
    }
}
