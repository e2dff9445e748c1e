//! Companion HTTP server: demo endpoints behind the gatekeeper.

use crate::config::Environment;
use crate::constants::header;
use crate::gatekeeper::SharedGatekeeper;
use crate::middleware::gatekeeper_middleware;
use crate::result::iso_timestamp;
use crate::util::equals_ignore_case;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Map, Value, json};

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
const APPLICATION_JSON: &str = "application/json";
const APPLICATION_FORM: &str = "application/x-www-form-urlencoded";

#[derive(Clone)]
pub struct AppState {
    pub gatekeeper: SharedGatekeeper,
    pub environment: Environment,
}

impl AppState {
    pub fn new(gatekeeper: SharedGatekeeper, environment: Environment) -> Self {
        Self {
            gatekeeper,
            environment,
        }
    }
}

/// Builds the application. The gatekeeper is the outermost layer, so it runs
/// before the body limit, routing and the 404 fallback.
pub fn router(state: AppState) -> Router {
    let mut routes = Router::new()
        .route("/health", get(health))
        .route("/api/data", get(get_data).post(post_data));

    if state.environment.is_development() {
        routes = routes.route("/cors-config", get(cors_config));
    }

    routes
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn_with_state(
            state.gatekeeper.clone(),
            gatekeeper_middleware,
        ))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let cors = if state.environment.is_development() {
        json!(state.gatekeeper.snapshot())
    } else {
        json!("configured")
    };

    Json(json!({
        "status": "healthy",
        "timestamp": iso_timestamp(),
        "cors": cors,
    }))
}

async fn cors_config(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.gatekeeper.snapshot()))
}

async fn get_data(headers: HeaderMap) -> Json<Value> {
    Json(json!({
        "message": "CORS is working!",
        "origin": request_origin(&headers),
        "timestamp": iso_timestamp(),
    }))
}

async fn post_data(headers: HeaderMap, body: Result<Bytes, BytesRejection>) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(status = %rejection.status(), "rejected request body");
            return error_response(rejection.status(), &rejection.body_text());
        }
    };

    let data = match BodyKind::from_headers(&headers) {
        _ if body.is_empty() => json!({}),
        BodyKind::Json => match serde_json::from_slice::<Value>(&body) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(error = %err, "rejected malformed JSON body");
                return error_response(StatusCode::BAD_REQUEST, &format!("Invalid JSON body: {err}"));
            }
        },
        BodyKind::Form => match form_fields(&body) {
            Ok(fields) => Value::Object(fields),
            Err(err) => {
                tracing::debug!(error = %err, "rejected malformed form body");
                return error_response(StatusCode::BAD_REQUEST, &format!("Invalid form body: {err}"));
            }
        },
        BodyKind::Other => json!({}),
    };

    Json(json!({
        "message": "POST request successful",
        "data": data,
        "origin": request_origin(&headers),
        "timestamp": iso_timestamp(),
    }))
    .into_response()
}

/// Body parsers are keyed on the media type; parameters such as `charset` are ignored.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn from_headers(headers: &HeaderMap) -> Self {
        let Some(content_type) = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        else {
            return Self::Other;
        };

        let media_type = content_type.split(';').next().unwrap_or_default().trim();
        if equals_ignore_case(media_type, APPLICATION_JSON) {
            Self::Json
        } else if equals_ignore_case(media_type, APPLICATION_FORM) {
            Self::Form
        } else {
            Self::Other
        }
    }
}

// Repeated keys collect into an array in submission order.
fn form_fields(body: &[u8]) -> Result<Map<String, Value>, serde_urlencoded::de::Error> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)?;
    let mut fields = Map::new();
    for (key, value) in pairs {
        match fields.get_mut(&key) {
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                fields.insert(key, Value::String(value));
            }
        }
    }
    Ok(fields)
}

async fn not_found(method: Method, uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "path": uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str()),
            "method": method.as_str(),
            "timestamp": iso_timestamp(),
        })),
    )
        .into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "error": message,
            "timestamp": iso_timestamp(),
        })),
    )
        .into_response()
}

fn request_origin(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::ORIGIN)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}
