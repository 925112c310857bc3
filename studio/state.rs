use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ferrite_spam::{ClassifierService, JsonFileStore};

use crate::config::StudioConfig;

/// Everything the request handlers share.
///
/// The whole state sits behind one mutex, so at most one training run is in
/// flight and swapping the current model is atomic with respect to readers.
pub struct StudioState {
    pub config: StudioConfig,
    pub service: ClassifierService<JsonFileStore>,
}

impl StudioState {
    pub fn new(config: StudioConfig, service: ClassifierService<JsonFileStore>) -> Self {
        StudioState { config, service }
    }
}

/// Handle cloned into every request thread.
pub type SharedState = Arc<Mutex<StudioState>>;

/// Locks the state, recovering it if a handler thread panicked mid-request.
pub fn lock(state: &SharedState) -> MutexGuard<'_, StudioState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
