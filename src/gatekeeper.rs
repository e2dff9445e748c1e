use crate::constants::{DEFAULT_ALLOWED_ORIGINS, DEFAULT_WILDCARD_DOMAIN, header};
use crate::context::RequestContext;
use crate::error::ConfigurationError;
use crate::headers::{HeaderCollection, Headers};
use crate::options::CorsOptions;
use crate::origin::{OriginDecision, OriginMatcher, SubdomainPattern};
use crate::registry::OriginRegistry;
use crate::result::{CorsResult, GateDecision, PolicyViolation, PreflightResult};
use crate::snapshot::{ConfigSnapshot, PolicySnapshot};
use std::sync::Arc;

pub type SharedGatekeeper = Arc<Gatekeeper>;

/// Header values derived once from [`CorsOptions`].
#[derive(Debug)]
struct PolicyHeaders {
    credentials: Option<String>,
    methods: Option<String>,
    allowed_headers: Option<String>,
    exposed_headers: Option<String>,
    max_age: Option<String>,
}

impl PolicyHeaders {
    fn new(options: &CorsOptions) -> Self {
        Self {
            credentials: options.credentials.then(|| "true".to_string()),
            methods: options.methods.header_value(),
            allowed_headers: options.allowed_headers.header_value(),
            exposed_headers: options.exposed_headers.header_value(),
            max_age: options.max_age.map(|secs| secs.to_string()),
        }
    }
}

/// Cross-origin gate evaluated before any other request handling.
#[derive(Debug)]
pub struct Gatekeeper {
    options: CorsOptions,
    matcher: OriginMatcher,
    registry: OriginRegistry,
    policy_headers: PolicyHeaders,
}

impl Gatekeeper {
    pub fn new(
        options: CorsOptions,
        matcher: OriginMatcher,
        registry: OriginRegistry,
    ) -> Result<Self, ConfigurationError> {
        options.validate()?;
        let policy_headers = PolicyHeaders::new(&options);
        Ok(Self {
            options,
            matcher,
            registry,
            policy_headers,
        })
    }

    /// Default policy with the given seed origins and wildcard domain.
    pub fn with_origins<I, S>(origins: I, wildcard_domain: &str) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matcher = OriginMatcher::new(SubdomainPattern::for_domain(wildcard_domain)?);
        let registry = OriginRegistry::seeded(origins)?;
        Self::new(CorsOptions::default(), matcher, registry)
    }

    /// The production configuration: built-in seed origins and preview domain.
    pub fn standard() -> Result<Self, ConfigurationError> {
        Self::with_origins(DEFAULT_ALLOWED_ORIGINS, DEFAULT_WILDCARD_DOMAIN)
    }

    pub fn options(&self) -> &CorsOptions {
        &self.options
    }

    pub fn registry(&self) -> &OriginRegistry {
        &self.registry
    }

    pub fn add_origin(&self, origin: &str) -> bool {
        self.registry.add_origin(origin)
    }

    pub fn remove_origin(&self, origin: &str) -> bool {
        self.registry.remove_origin(origin)
    }

    pub fn decide(&self, origin: Option<&str>) -> OriginDecision {
        self.matcher.decide(origin, &self.registry.snapshot())
    }

    pub fn check(&self, request: &RequestContext<'_>) -> GateDecision {
        let decision = self.decide(request.origin);
        let origin = request.origin.unwrap_or("no origin");

        if !decision.is_allowed() {
            tracing::warn!(origin, method = request.method, "blocked cross-origin request");
            return GateDecision::Rejected(PolicyViolation {
                origin: request.origin.map(str::to_owned),
                method: request.method.to_string(),
            });
        }

        tracing::debug!(
            origin,
            method = request.method,
            decision = decision.as_str(),
            "allowed request"
        );

        let headers = self.build_headers(request.origin);

        if request.is_preflight() {
            self.log_uncovered_request_method(request);
            self.log_uncovered_request_headers(request);
            GateDecision::Preflight(PreflightResult {
                headers,
                status: self.options.options_success_status,
                end_response: !self.options.preflight_continue,
                decision,
            })
        } else {
            GateDecision::Simple(CorsResult { headers, decision })
        }
    }

    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            allowed_origins: self.registry.origins(),
            wildcard_pattern: self.matcher.pattern().source().to_string(),
            cors_options: PolicySnapshot::from(&self.options),
        }
    }

    // Without an Origin there is nothing to echo and no browser to instruct; only
    // `Vary` is kept so shared caches do not replay this response cross-origin.
    fn build_headers(&self, origin: Option<&str>) -> Headers {
        let mut headers = HeaderCollection::new();
        headers.add_vary(header::ORIGIN);

        let Some(origin) = origin else {
            return headers.into_headers();
        };

        let policy = &self.policy_headers;
        headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.push_opt(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            policy.credentials.clone(),
        );
        headers.push_opt(header::ACCESS_CONTROL_ALLOW_METHODS, policy.methods.clone());
        headers.push_opt(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            policy.allowed_headers.clone(),
        );
        headers.push_opt(
            header::ACCESS_CONTROL_EXPOSE_HEADERS,
            policy.exposed_headers.clone(),
        );
        headers.push_opt(header::ACCESS_CONTROL_MAX_AGE, policy.max_age.clone());
        headers.into_headers()
    }

    fn log_uncovered_request_method(&self, request: &RequestContext<'_>) {
        if let Some(requested) = request.access_control_request_method
            && !self.options.methods.allows_method(requested)
        {
            tracing::debug!(
                origin = request.origin.unwrap_or("no origin"),
                requested_method = requested,
                "preflight asks for a method outside the allow-list"
            );
        }
    }

    fn log_uncovered_request_headers(&self, request: &RequestContext<'_>) {
        if let Some(requested) = request.access_control_request_headers
            && !self.options.allowed_headers.allows_headers(requested)
        {
            tracing::debug!(
                origin = request.origin.unwrap_or("no origin"),
                requested_headers = requested,
                "preflight asks for headers outside the allow-list"
            );
        }
    }
}

#[cfg(test)]
#[path = "gatekeeper_test.rs"]
mod gatekeeper_test;
