use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use gatekeeper_cors_rs::config::Environment;
use gatekeeper_cors_rs::server::{AppState, router};
use gatekeeper_cors_rs::{Gatekeeper, SharedGatekeeper};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn shared_gatekeeper() -> SharedGatekeeper {
    Arc::new(Gatekeeper::standard().expect("standard configuration is valid"))
}

fn app(environment: Environment) -> Router {
    router(AppState::new(shared_gatekeeper(), environment))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app.oneshot(request).await.expect("infallible router");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, headers, body)
}

fn get(uri: &str, origin: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(origin) = origin {
        builder = builder.header("Origin", origin);
    }
    builder.body(Body::empty()).expect("valid request")
}

#[tokio::test]
async fn allows_requests_from_local_dev_server() {
    let (status, headers, body) = send(
        app(Environment::Production),
        get("/api/data", Some("http://localhost:5173")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:5173"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
    assert_eq!(body["origin"], "http://localhost:5173");
}

#[tokio::test]
async fn allows_requests_from_preview_domains() {
    let origin = "https://abc123-def456.bolt.new";

    let (status, headers, _) = send(app(Environment::Production), get("/api/data", Some(origin))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["access-control-allow-origin"], origin);
}

#[tokio::test]
async fn rejects_unauthorized_origins_with_json_body() {
    let (status, headers, body) = send(
        app(Environment::Production),
        get("/api/data", Some("https://malicious-site.com")),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(headers.get("access-control-allow-origin").is_none());
    assert_eq!(body["error"], "CORS Policy Violation");
    assert_eq!(
        body["message"],
        "This origin is not allowed to access this resource"
    );
    assert_eq!(body["origin"], "https://malicious-site.com");
    let timestamp = body["timestamp"].as_str().expect("timestamp string");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn rejects_suffix_injection_on_preview_domain() {
    let (status, _, body) = send(
        app(Environment::Production),
        get("/api/data", Some("https://malicious.bolt.new.evil.com")),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "CORS Policy Violation");
}

#[tokio::test]
async fn rejects_before_routing_so_unknown_paths_still_403() {
    let (status, _, body) = send(
        app(Environment::Production),
        get("/does-not-exist", Some("https://malicious-site.com")),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "CORS Policy Violation");
}

#[tokio::test]
async fn rejects_before_body_parsing() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/data")
        .header("Origin", "https://malicious-site.com")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .expect("valid request");

    let (status, _, body) = send(app(Environment::Production), request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "CORS Policy Violation");
}

#[tokio::test]
async fn allows_requests_without_origin() {
    let (status, headers, body) = send(app(Environment::Production), get("/api/data", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers.get("access-control-allow-origin").is_none());
    assert_eq!(body["message"], "CORS is working!");
    assert_eq!(body["origin"], Value::Null);
}

#[tokio::test]
async fn answers_preflight_with_204_and_empty_body() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/data")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "Content-Type")
        .body(Body::empty())
        .expect("valid request");

    let (status, headers, body) = send(app(Environment::Production), request).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:5173"
    );
    assert!(
        headers["access-control-allow-methods"]
            .to_str()
            .expect("ascii")
            .contains("POST")
    );
    assert_eq!(headers["access-control-max-age"], "86400");
}

#[tokio::test]
async fn echoes_posted_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/data")
        .header("Origin", "http://localhost:5173")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"task":"call supplier"}"#))
        .expect("valid request");

    let (status, headers, body) = send(app(Environment::Production), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["access-control-allow-credentials"], "true");
    assert_eq!(body["message"], "POST request successful");
    assert_eq!(body["data"]["task"], "call supplier");
}

#[tokio::test]
async fn malformed_json_from_allowed_origin_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/data")
        .header("Origin", "http://localhost:5173")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .expect("valid request");

    let (status, headers, body) = send(app(Environment::Production), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:5173"
    );
    assert!(body["error"].as_str().expect("message").starts_with("Invalid JSON body"));
}

fn post(content_type: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/data")
        .header("Origin", "http://localhost:5173")
        .header("Content-Type", content_type)
        .body(body.into())
        .expect("valid request")
}

#[tokio::test]
async fn echoes_posted_form_fields() {
    let request = post(
        "application/x-www-form-urlencoded",
        "task=call&tag=urgent&tag=supplier",
    );

    let (status, _, body) = send(app(Environment::Production), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "POST request successful");
    assert_eq!(body["data"]["task"], "call");
    assert_eq!(body["data"]["tag"], serde_json::json!(["urgent", "supplier"]));
}

#[tokio::test]
async fn json_content_type_with_charset_is_parsed_as_json() {
    let request = post("Application/JSON; charset=utf-8", r#"{"task":"call"}"#);

    let (status, _, body) = send(app(Environment::Production), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["task"], "call");
}

#[tokio::test]
async fn unparsed_content_type_echoes_empty_data() {
    let request = post("text/plain", "{not json");

    let (status, _, body) = send(app(Environment::Production), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!({}));
}

#[tokio::test]
async fn oversized_body_returns_json_413() {
    let request = post("text/plain", vec![b'a'; 10 * 1024 * 1024 + 1]);

    let (status, headers, body) = send(app(Environment::Production), request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:5173"
    );
    assert!(body["error"].is_string());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let (status, _, body) = send(
        app(Environment::Production),
        get("/missing?page=2", Some("http://localhost:5173")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
    assert_eq!(body["path"], "/missing?page=2");
    assert_eq!(body["method"], "GET");
}

#[tokio::test]
async fn health_hides_policy_in_production() {
    let (status, _, body) = send(app(Environment::Production), get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["cors"], "configured");
}

#[tokio::test]
async fn health_reports_policy_in_development() {
    let (_, _, body) = send(app(Environment::Development), get("/health", None)).await;

    assert_eq!(body["cors"]["allowedOrigins"][0], "http://localhost:5173");
    assert_eq!(body["cors"]["corsOptions"]["credentials"], true);
}

#[tokio::test]
async fn cors_config_route_only_exists_in_development() {
    let (status, _, _) = send(app(Environment::Production), get("/cors-config", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(app(Environment::Development), get("/cors-config", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["wildcardPattern"],
        r"^https://[A-Za-z0-9-]+\.bolt\.new$"
    );
}

#[tokio::test]
async fn runtime_added_origin_is_allowed_by_running_router() {
    let gatekeeper = shared_gatekeeper();
    let app = router(AppState::new(Arc::clone(&gatekeeper), Environment::Production));
    let origin = "https://ops.example.com";

    let (status, _, _) = send(app.clone(), get("/api/data", Some(origin))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert!(gatekeeper.add_origin(origin));

    let (status, headers, _) = send(app, get("/api/data", Some(origin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["access-control-allow-origin"], origin);
}
