use crate::routes::{classifier_error, error_response, json_response, HttpResponse};
use crate::state::{lock, SharedState};

/// `GET /api/metrics`
pub fn handle_current(state: &SharedState) -> HttpResponse {
    match lock(state).service.last_metrics() {
        Some(metrics) => json_response(200, metrics),
        None => error_response(404, "no model has been trained yet"),
    }
}

/// `GET /api/pretrained-metrics`
pub fn handle_pretrained(state: &SharedState) -> HttpResponse {
    match lock(state).service.pretrained_metrics() {
        Ok(Some(metrics)) => json_response(200, &metrics),
        Ok(None) => error_response(404, "no pretrained model has been saved"),
        Err(e) => classifier_error(&e),
    }
}
