//! axum adapter for [`Gatekeeper`](crate::Gatekeeper).
//!
//! Install it as the outermost layer so rejected requests never reach body
//! parsing, routing or handlers.

use crate::constants::header;
use crate::context::RequestContext;
use crate::gatekeeper::SharedGatekeeper;
use crate::headers::Headers;
use crate::result::{CorsResult, GateDecision, PolicyViolation, PreflightResult};
use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub async fn gatekeeper_middleware(
    State(gatekeeper): State<SharedGatekeeper>,
    request: Request,
    next: Next,
) -> Response {
    let owned_ctx = OwnedRequestContext::from_request(&request);
    let context = owned_ctx.as_request_context();

    match gatekeeper.check(&context) {
        GateDecision::Preflight(result) if result.end_response => {
            let status = StatusCode::from_u16(result.status).unwrap_or(StatusCode::NO_CONTENT);
            let mut response = status.into_response();
            apply_headers(response.headers_mut(), &result.headers);
            response
        }
        GateDecision::Preflight(PreflightResult { headers, .. })
        | GateDecision::Simple(CorsResult { headers, .. }) => {
            let mut response = next.run(request).await;
            apply_headers(response.headers_mut(), &headers);
            response
        }
        GateDecision::Rejected(violation) => violation_response(&violation),
    }
}

pub fn violation_response(violation: &PolicyViolation) -> Response {
    (StatusCode::FORBIDDEN, Json(violation.body())).into_response()
}

fn apply_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers.iter() {
        let (Ok(header_name), Ok(header_value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) else {
            tracing::warn!(header = %name, "skipping unrepresentable CORS header");
            continue;
        };

        if header_name == axum::http::header::VARY {
            map.append(header_name, header_value);
        } else {
            map.insert(header_name, header_value);
        }
    }
}

struct OwnedRequestContext {
    method: String,
    origin: Option<String>,
    access_control_request_method: Option<String>,
    access_control_request_headers: Option<String>,
}

impl OwnedRequestContext {
    fn from_request(request: &Request) -> Self {
        let headers = request.headers();

        Self {
            method: request.method().as_str().to_string(),
            origin: header_value(headers, header::ORIGIN),
            access_control_request_method: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_METHOD,
            ),
            access_control_request_headers: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_HEADERS,
            ),
        }
    }

    fn as_request_context(&self) -> RequestContext<'_> {
        RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: self.access_control_request_method.as_deref(),
            access_control_request_headers: self.access_control_request_headers.as_deref(),
        }
    }
}

// Lossy so that a non-UTF-8 Origin is still evaluated (and denied) rather than
// being mistaken for an absent header.
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}
