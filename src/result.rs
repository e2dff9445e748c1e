use crate::constants::{VIOLATION_ERROR, VIOLATION_MESSAGE};
use crate::headers::Headers;
use crate::origin::OriginDecision;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Headers to merge into the downstream response of an allowed request.
#[derive(Debug, Clone)]
pub struct CorsResult {
    pub headers: Headers,
    pub decision: OriginDecision,
}

/// Answer for an allowed `OPTIONS` request.
#[derive(Debug, Clone)]
pub struct PreflightResult {
    pub headers: Headers,
    pub status: u16,
    /// `false` only when the policy forwards preflights downstream.
    pub end_response: bool,
    pub decision: OriginDecision,
}

/// A request whose origin failed the matcher. Never forwarded downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyViolation {
    pub origin: Option<String>,
    pub method: String,
}

impl PolicyViolation {
    pub fn body(&self) -> ViolationBody {
        ViolationBody {
            error: VIOLATION_ERROR,
            message: VIOLATION_MESSAGE,
            origin: self.origin.clone(),
            timestamp: iso_timestamp(),
        }
    }
}

/// JSON payload of a `403` rejection.
#[derive(Debug, Clone, Serialize)]
pub struct ViolationBody {
    pub error: &'static str,
    pub message: &'static str,
    pub origin: Option<String>,
    pub timestamp: String,
}

/// Overall decision returned by the gatekeeper.
#[derive(Debug, Clone)]
pub enum GateDecision {
    Preflight(PreflightResult),
    Simple(CorsResult),
    Rejected(PolicyViolation),
}

/// Current UTC time as RFC 3339 with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
