pub mod evaluator;
pub mod metrics;

pub use evaluator::{evaluate, Evaluation, DECISION_THRESHOLD};
pub use metrics::TrainingMetrics;
