pub mod snapshot;
pub mod store;

pub use snapshot::{PersistedModel, PRETRAINED_MODEL_ID};
pub use store::{JsonFileStore, MemoryStore, ModelStore};
