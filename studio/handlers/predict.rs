use serde::Deserialize;

use crate::routes::{classifier_error, error_response, json_response, parse_json, HttpResponse};
use crate::state::{lock, SharedState};

#[derive(Deserialize)]
struct EmailBody {
    email: String,
}

fn read_email(body: &[u8]) -> Result<String, HttpResponse> {
    let body: EmailBody = parse_json(body)?;
    if body.email.trim().is_empty() {
        return Err(error_response(400, "email text must not be empty"));
    }
    Ok(body.email)
}

/// `POST /api/predict` with `{"email": "..."}`, scored by the current model.
pub fn handle_predict(body: &[u8], state: &SharedState) -> HttpResponse {
    let email = match read_email(body) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    match lock(state).service.predict_text(&email) {
        Ok(prediction) => json_response(200, &prediction),
        Err(e) => classifier_error(&e),
    }
}

/// `POST /api/pretrained-predict`, scored by the saved snapshot.
pub fn handle_pretrained(body: &[u8], state: &SharedState) -> HttpResponse {
    let email = match read_email(body) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    match lock(state).service.predict_pretrained_text(&email) {
        Ok(Some(prediction)) => json_response(200, &prediction),
        Ok(None) => error_response(404, "no pretrained model has been saved"),
        Err(e) => classifier_error(&e),
    }
}
