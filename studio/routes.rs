use std::io::{Cursor, Read};

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use ferrite_spam::ClassifierError;

use crate::handlers;
use crate::state::SharedState;

pub type HttpResponse = Response<Cursor<Vec<u8>>>;

/// Request bodies above this size are rejected.
const MAX_BODY_BYTES: u64 = 1024 * 1024;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}

fn cors_headers() -> Vec<Header> {
    [
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
        ("Access-Control-Allow-Headers", "Content-Type"),
    ]
    .iter()
    .filter_map(|(n, v)| header(n, v))
    .collect()
}

pub fn json_response<T: Serialize>(status: u16, body: &T) -> HttpResponse {
    let bytes = serde_json::to_vec(body).unwrap_or_else(|e| {
        warn!("failed to encode response body: {}", e);
        br#"{"status":"error","message":"response encoding failed"}"#.to_vec()
    });
    let len = bytes.len();
    let mut headers = cors_headers();
    headers.extend(header("Content-Type", "application/json"));
    Response::new(StatusCode(status), headers, Cursor::new(bytes), Some(len), None)
}

/// `{"status": "error", "message": ...}` with the given HTTP status.
pub fn error_response(status: u16, message: impl Into<String>) -> HttpResponse {
    json_response(status, &json!({ "status": "error", "message": message.into() }))
}

pub fn classifier_error(err: &ClassifierError) -> HttpResponse {
    let status = match err {
        ClassifierError::Config(_) => 400,
        ClassifierError::InputSizeMismatch { .. } => 400,
        ClassifierError::InvalidSaveState(_) => 400,
        ClassifierError::NoTrainedModel => 404,
        ClassifierError::Dataset(_) => 422,
        ClassifierError::Persist(_) => 500,
    };
    error_response(status, err.to_string())
}

pub fn not_found() -> HttpResponse {
    error_response(404, "not found")
}

fn preflight() -> HttpResponse {
    Response::new(StatusCode(204), cors_headers(), Cursor::new(Vec::new()), Some(0), None)
}

/// Reads the request body, or produces the error response to send back.
fn read_body(request: &mut Request) -> Result<Vec<u8>, HttpResponse> {
    let mut body = Vec::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut body)
        .map_err(|e| error_response(400, format!("could not read request body: {}", e)))?;
    if body.len() as u64 > MAX_BODY_BYTES {
        return Err(error_response(413, "request body too large"));
    }
    Ok(body)
}

/// Decodes a JSON request body, or produces the 400 to send back.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, HttpResponse> {
    serde_json::from_slice(body).map_err(|e| error_response(400, format!("invalid request body: {}", e)))
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Reads the body, routes the request and sends the response.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let path = url.split('?').next().unwrap_or("");
    debug!("{} {}", method, path);

    let response = match read_body(&mut request) {
        Ok(body) => route(&method, path, &body, &state),
        Err(resp) => resp,
    };

    if let Err(e) = request.respond(response) {
        warn!("failed to send response for {}: {}", url, e);
    }
}

/// Maps a method and path to its handler.
pub fn route(method: &Method, path: &str, body: &[u8], state: &SharedState) -> HttpResponse {
    match (method, path) {
        (Method::Options, _) => preflight(),

        // ── Training ─────────────────────────────────────────────────────
        (Method::Post, "/api/train")           => handlers::train::handle_train(body, state),
        (Method::Post, "/api/save-pretrained") => handlers::model::handle_save(state),

        // ── Inference ────────────────────────────────────────────────────
        (Method::Post, "/api/predict")            => handlers::predict::handle_predict(body, state),
        (Method::Post, "/api/pretrained-predict") => handlers::predict::handle_pretrained(body, state),

        // ── Metrics & model info ─────────────────────────────────────────
        (Method::Get, "/api/metrics")               => handlers::metrics::handle_current(state),
        (Method::Get, "/api/pretrained-metrics")    => handlers::metrics::handle_pretrained(state),
        (Method::Get, "/api/model-info")            => handlers::model::handle_info(state),
        (Method::Get, "/api/pretrained-model-info") => handlers::model::handle_pretrained_info(state),
        (Method::Get, "/api/activation-functions")  => handlers::model::handle_activations(),

        // ── 404 ──────────────────────────────────────────────────────────
        _ => not_found(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use serde_json::Value;

    use ferrite_spam::{ClassifierService, ConfigError, DatasetError, JsonFileStore, PersistError, Vectorizer};

    use super::*;
    use crate::config::StudioConfig;
    use crate::state::StudioState;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ferrite-spam-studio-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn state_in(dir: &Path) -> SharedState {
        let config = StudioConfig {
            addr: "127.0.0.1:0".to_owned(),
            dataset_path: dir.join("emails.csv"),
            model_dir: dir.join("models"),
        };
        let service = ClassifierService::new(JsonFileStore::new(&config.model_dir), Vectorizer::new(Vec::new()));
        Arc::new(Mutex::new(StudioState::new(config, service)))
    }

    fn write_dataset(dir: &Path) {
        let mut csv = String::from("Email No.,free,money,meeting,Prediction\n");
        for i in 0..20 {
            let spam = i % 2 == 0;
            let (free, meeting) = if spam { (3, 0) } else { (0, 2) };
            csv.push_str(&format!("Email {},{},{},{},{}\n", i, free, i % 3, meeting, u8::from(spam)));
        }
        std::fs::write(dir.join("emails.csv"), csv).unwrap();
    }

    fn allows_any_origin(resp: &HttpResponse) -> bool {
        resp.headers()
            .iter()
            .any(|h| h.field.equiv("Access-Control-Allow-Origin") && h.value.as_str() == "*")
    }

    fn body_json(resp: HttpResponse) -> Value {
        serde_json::from_slice(&resp.into_reader().into_inner()).unwrap()
    }

    fn call(state: &SharedState, method: Method, path: &str, body: &str) -> (u16, Value, bool) {
        let resp = route(&method, path, body.as_bytes(), state);
        let status = resp.status_code().0;
        let cors = allows_any_origin(&resp);
        let json = if status == 204 { Value::Null } else { body_json(resp) };
        (status, json, cors)
    }

    #[test]
    fn error_statuses_follow_the_error_kind() {
        let cases = [
            (ClassifierError::Config(ConfigError::EmptyHiddenLayers), 400),
            (ClassifierError::InputSizeMismatch { expected: 3, actual: 1 }, 400),
            (ClassifierError::InvalidSaveState("nothing to save".into()), 400),
            (ClassifierError::NoTrainedModel, 404),
            (ClassifierError::Dataset(DatasetError::Empty), 422),
            (ClassifierError::Persist(PersistError::Corrupt("bad".into())), 500),
        ];
        for (err, status) in cases {
            let message = err.to_string();
            let resp = classifier_error(&err);
            assert_eq!(resp.status_code().0, status, "{}", message);
            assert!(allows_any_origin(&resp));
            let body = body_json(resp);
            assert_eq!(body["status"], "error");
            assert_eq!(body["message"], message.as_str());
        }
    }

    #[test]
    fn every_helper_sets_cors() {
        assert!(allows_any_origin(&json_response(200, &json!({ "ok": true }))));
        assert!(allows_any_origin(&error_response(400, "bad")));
        assert!(allows_any_origin(&not_found()));
        assert!(allows_any_origin(&preflight()));
    }

    #[test]
    fn missing_models_and_unknown_routes() {
        let dir = scratch_dir("empty");
        let state = state_in(&dir);

        assert_eq!(call(&state, Method::Get, "/api/nope", "").0, 404);
        assert_eq!(call(&state, Method::Post, "/api/metrics", "").0, 404);
        assert_eq!(call(&state, Method::Get, "/api/metrics", "").0, 404);
        assert_eq!(call(&state, Method::Get, "/api/pretrained-metrics", "").0, 404);
        assert_eq!(call(&state, Method::Get, "/api/model-info", "").0, 404);
        assert_eq!(call(&state, Method::Get, "/api/pretrained-model-info", "").0, 404);
        assert_eq!(call(&state, Method::Post, "/api/predict", r#"{"email":"free money"}"#).0, 404);
        assert_eq!(call(&state, Method::Post, "/api/pretrained-predict", r#"{"email":"free"}"#).0, 404);

        let (status, body, cors) = call(&state, Method::Post, "/api/save-pretrained", "");
        assert_eq!(status, 400);
        assert_eq!(body["status"], "error");
        assert!(cors);

        assert_eq!(call(&state, Method::Options, "/api/train", "").0, 204);
    }

    #[test]
    fn bad_bodies_and_missing_dataset() {
        let dir = scratch_dir("bad-input");
        let state = state_in(&dir);

        assert_eq!(call(&state, Method::Post, "/api/predict", "not json").0, 400);
        assert_eq!(call(&state, Method::Post, "/api/predict", r#"{"email":"  "}"#).0, 400);
        assert_eq!(call(&state, Method::Post, "/api/train", r#"{"epochs":3}"#).0, 400);

        let request = r#"{"hiddenSizes":[3],"activationFunction":"SIGMOID","learningRate":0.5,"epochs":2}"#;
        assert_eq!(call(&state, Method::Post, "/api/train", request).0, 422);
    }

    #[test]
    fn train_save_and_predict() {
        let dir = scratch_dir("flow");
        write_dataset(&dir);
        let state = state_in(&dir);

        let bad = r#"{"hiddenSizes":[],"activationFunction":"SIGMOID","learningRate":0.5,"epochs":2}"#;
        assert_eq!(call(&state, Method::Post, "/api/train", bad).0, 400);

        let request =
            r#"{"hiddenSizes":[3],"activationFunction":"relu","learningRate":0.5,"epochs":5,"shuffleSeed":1}"#;
        let (status, body, cors) = call(&state, Method::Post, "/api/train", request);
        assert_eq!(status, 200);
        assert!(cors);
        assert_eq!(body["status"], "success");
        assert_eq!(body["metrics"]["trainSize"], 16);
        assert_eq!(body["metrics"]["activationFunction"], "RELU");

        let (status, metrics, _) = call(&state, Method::Get, "/api/metrics", "");
        assert_eq!(status, 200);
        assert_eq!(metrics["featureDimensions"], 3);

        let (status, prediction, _) = call(&state, Method::Post, "/api/predict", r#"{"email":"free free money"}"#);
        assert_eq!(status, 200);
        assert!(prediction["prediction"].as_f64().is_some());

        assert_eq!(call(&state, Method::Post, "/api/save-pretrained", "").0, 200);
        let (status, saved, _) = call(&state, Method::Get, "/api/pretrained-metrics", "");
        assert_eq!(status, 200);
        assert_eq!(saved, metrics);
        let (status, pretrained, _) =
            call(&state, Method::Post, "/api/pretrained-predict", r#"{"email":"free free money"}"#);
        assert_eq!(status, 200);
        assert_eq!(pretrained["prediction"], prediction["prediction"]);

        let (status, names, _) = call(&state, Method::Get, "/api/activation-functions", "");
        assert_eq!(status, 200);
        assert_eq!(names, json!(["SIGMOID", "TANH", "RELU", "LEAKY_RELU"]));
    }
}
