use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::exposed_headers::ExposedHeaders;
use crate::options::CorsOptions;
use serde::Serialize;

/// Read-only view of the live configuration for diagnostics endpoints.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    pub allowed_origins: Vec<String>,
    pub wildcard_pattern: String,
    pub cors_options: PolicySnapshot,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PolicySnapshot {
    pub origin: &'static str,
    pub methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub exposed_headers: Vec<String>,
    pub credentials: bool,
    pub max_age: Option<u64>,
    pub preflight_continue: bool,
    pub options_success_status: u16,
}

impl From<&CorsOptions> for PolicySnapshot {
    fn from(options: &CorsOptions) -> Self {
        let wildcard = || vec!["*".to_string()];
        Self {
            origin: "allow-list and wildcard pattern",
            methods: match &options.methods {
                AllowedMethods::Any => wildcard(),
                AllowedMethods::List(values) => values.clone(),
            },
            allowed_headers: match &options.allowed_headers {
                AllowedHeaders::Any => wildcard(),
                AllowedHeaders::List(values) => values.clone(),
            },
            exposed_headers: match &options.exposed_headers {
                ExposedHeaders::Any => wildcard(),
                ExposedHeaders::List(values) => values.clone(),
            },
            credentials: options.credentials,
            max_age: options.max_age,
            preflight_continue: options.preflight_continue,
            options_success_status: options.options_success_status,
        }
    }
}
