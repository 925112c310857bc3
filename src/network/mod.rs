pub mod config;
pub mod network;
pub mod summary;

pub use config::{NetworkConfig, OUTPUT_SIZE, DEFAULT_SEED, MAX_PARAMETERS};
pub use network::Network;
pub use summary::ArchitectureSummary;
