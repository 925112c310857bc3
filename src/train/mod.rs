pub mod backprop;
pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;
pub mod session;

pub use epoch_stats::EpochLoss;
pub use train_config::TrainConfig;
pub use session::{train, TrainingOutcome};
