use gatekeeper_cors_rs::{GateDecision, Headers, OriginDecision, PolicyViolation};

pub fn assert_simple(decision: GateDecision) -> (Headers, OriginDecision) {
    match decision {
        GateDecision::Simple(result) => (result.headers, result.decision),
        other => panic!("expected simple decision, got {:?}", other),
    }
}

pub fn assert_preflight(decision: GateDecision) -> (Headers, u16, bool) {
    match decision {
        GateDecision::Preflight(result) => (result.headers, result.status, result.end_response),
        other => panic!("expected preflight decision, got {:?}", other),
    }
}

pub fn assert_rejected(decision: GateDecision) -> PolicyViolation {
    match decision {
        GateDecision::Rejected(violation) => violation,
        other => panic!("expected rejection, got {:?}", other),
    }
}
