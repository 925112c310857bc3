use log::{info, warn};
use ferrite_spam::{load_dataset, TrainingRequest};

use crate::routes::{classifier_error, json_response, parse_json, HttpResponse};
use crate::state::{lock, SharedState};

/// `POST /api/train`
///
/// Reloads the dataset from disk, trains a fresh network with the submitted
/// hyperparameters and makes it the current model. The state stays locked
/// for the whole run, so concurrent train requests queue up.
pub fn handle_train(body: &[u8], state: &SharedState) -> HttpResponse {
    let request: TrainingRequest = match parse_json(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let mut st = lock(state);
    let dataset = match load_dataset(&st.config.dataset_path) {
        Ok(d) => d,
        Err(e) => {
            warn!("dataset {} unavailable: {}", st.config.dataset_path.display(), e);
            return classifier_error(&e.into());
        }
    };

    info!(
        "training request: hidden {:?}, {} activation, lr {}, {} epochs",
        request.hidden_sizes, request.activation_function, request.learning_rate, request.epochs
    );
    match st.service.train(&request, &dataset) {
        Ok(report) => json_response(200, &report),
        Err(e) => {
            warn!("training rejected: {}", e);
            classifier_error(&e)
        }
    }
}
