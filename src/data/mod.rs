pub mod csv;
pub mod dataset;

pub use csv::{load_dataset, parse_dataset};
pub use dataset::{Dataset, DatasetSplit, DEFAULT_SPLIT_SEED, DEFAULT_TRAIN_FRACTION};
