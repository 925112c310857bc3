pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod eval;
pub mod data;
pub mod text;
pub mod persist;
pub mod service;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{ArchitectureSummary, Network, NetworkConfig};
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use train::{train, EpochLoss, TrainConfig, TrainingOutcome};
pub use eval::{evaluate, Evaluation, TrainingMetrics};
pub use data::{load_dataset, parse_dataset, Dataset, DatasetSplit};
pub use text::Vectorizer;
pub use persist::{JsonFileStore, MemoryStore, ModelStore, PersistedModel};
pub use service::{ClassifierService, Prediction, TrainingReport, TrainingRequest};
pub use error::{ClassifierError, ConfigError, DatasetError, PersistError, Result};

/// Snapshot of `network` for storage, detached from the live parameters.
pub fn serialize(network: &Network, metrics: TrainingMetrics) -> PersistedModel {
    PersistedModel::capture(network, metrics)
}

/// Inference-ready network rebuilt from a snapshot.
pub fn deserialize(snapshot: &PersistedModel) -> std::result::Result<Network, PersistError> {
    snapshot.to_network()
}
