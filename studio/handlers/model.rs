use log::warn;
use serde_json::json;

use ferrite_spam::{ClassifierService, JsonFileStore};

use crate::routes::{classifier_error, error_response, json_response, HttpResponse};
use crate::state::{lock, SharedState};

/// `GET /api/model-info`
pub fn handle_info(state: &SharedState) -> HttpResponse {
    match lock(state).service.model_info() {
        Ok(summary) => json_response(200, &summary),
        Err(e) => classifier_error(&e),
    }
}

/// `GET /api/pretrained-model-info`
pub fn handle_pretrained_info(state: &SharedState) -> HttpResponse {
    match lock(state).service.pretrained_model_info() {
        Ok(Some(summary)) => json_response(200, &summary),
        Ok(None) => error_response(404, "no pretrained model has been saved"),
        Err(e) => classifier_error(&e),
    }
}

/// `GET /api/activation-functions`
pub fn handle_activations() -> HttpResponse {
    json_response(200, &ClassifierService::<JsonFileStore>::activation_functions())
}

/// `POST /api/save-pretrained`
///
/// Overwrites the stored snapshot with the current model.
pub fn handle_save(state: &SharedState) -> HttpResponse {
    match lock(state).service.save_pretrained() {
        Ok(()) => json_response(
            200,
            &json!({ "status": "success", "message": "Pretrained model saved successfully" }),
        ),
        Err(e) => {
            warn!("save failed: {}", e);
            classifier_error(&e)
        }
    }
}
