pub mod classifier;
pub mod dto;

pub use classifier::ClassifierService;
pub use dto::{Prediction, TrainingReport, TrainingRequest};
