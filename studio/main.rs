/// ferrite-spam Studio
///
/// JSON API around the spam classifier, served by a synchronous tiny_http
/// server with one thread per request.
///
/// Run with:
///   cargo run --bin studio --release
///
/// Configure with SPAM_STUDIO_ADDR, SPAM_DATASET_PATH and SPAM_MODEL_DIR;
/// log verbosity follows RUST_LOG (default `info`).
///
/// Endpoints (all under /api):
///   POST train, predict, pretrained-predict, save-pretrained
///   GET  metrics, pretrained-metrics, model-info, pretrained-model-info,
///        activation-functions

mod config;
mod handlers;
mod routes;
mod state;

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use log::{error, info, warn};
use tiny_http::Server;

use ferrite_spam::{load_dataset, ClassifierService, JsonFileStore, Vectorizer};

use config::StudioConfig;
use state::StudioState;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = StudioConfig::from_env();

    // The vocabulary comes from the dataset header; without it every email
    // vectorizes to an empty vector until the first successful training run.
    let vectorizer = match load_dataset(&config.dataset_path) {
        Ok(dataset) => {
            info!(
                "loaded {} emails ({} spam) with {} features from {}",
                dataset.len(),
                dataset.positive_count(),
                dataset.feature_count(),
                config.dataset_path.display()
            );
            Vectorizer::from_dataset(&dataset)
        }
        Err(e) => {
            warn!("dataset {} not loaded: {}", config.dataset_path.display(), e);
            Vectorizer::new(Vec::new())
        }
    };

    let server = match Server::http(&config.addr) {
        Ok(s) => s,
        Err(e) => {
            error!("failed to bind {}: {}", config.addr, e);
            return ExitCode::FAILURE;
        }
    };
    info!("studio listening on http://{}", config.addr);

    let service = ClassifierService::new(JsonFileStore::new(&config.model_dir), vectorizer);
    let shared_state = Arc::new(Mutex::new(StudioState::new(config, service)));

    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
    ExitCode::SUCCESS
}
