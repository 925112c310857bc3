use crate::data::dataset::check_rows;
use crate::error::ClassifierError;
use crate::network::network::Network;

/// Outputs strictly above this are classified as spam.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Hold-out results of a network.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Evaluation {
    pub accuracy: f64,
    /// Recall on the positive (spam) class; 0 when there are no positives.
    pub spam_detection_rate: f64,
    /// Recall on the negative class; 0 when there are no negatives.
    pub non_spam_detection_rate: f64,
    pub correct: usize,
    pub total_spam: usize,
    pub correct_spam: usize,
    pub total_non_spam: usize,
    pub correct_non_spam: usize,
}

/// Scores `network` on a labelled test set with the fixed 0.5 threshold.
///
/// Every row needs `network.input_size()` features and a label; anything
/// else is rejected before scoring. An empty set yields all-zero rates.
pub fn evaluate(
    network: &Network,
    features: &[Vec<f64>],
    labels: &[u8],
) -> Result<Evaluation, ClassifierError> {
    check_rows(features, labels, network.input_size())?;
    let mut eval = Evaluation::default();

    for (x, &label) in features.iter().zip(labels) {
        let predicted = u8::from(network.forward(x) > DECISION_THRESHOLD);
        if predicted == label {
            eval.correct += 1;
        }
        if label == 1 {
            eval.total_spam += 1;
            if predicted == 1 {
                eval.correct_spam += 1;
            }
        } else {
            eval.total_non_spam += 1;
            if predicted == 0 {
                eval.correct_non_spam += 1;
            }
        }
    }

    eval.accuracy = ratio(eval.correct, features.len());
    eval.spam_detection_rate = ratio(eval.correct_spam, eval.total_spam);
    eval.non_spam_detection_rate = ratio(eval.correct_non_spam, eval.total_non_spam);
    Ok(eval)
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
