use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::constants::DEFAULT_MAX_AGE_SECS;
use crate::exposed_headers::ExposedHeaders;
use crate::util::is_http_token;
use thiserror::Error;

/// Static cross-origin contract applied to every allowed request.
///
/// The [`Default`] value is the production descriptor: six methods, seven
/// request headers, three exposed headers, credentials on, a 24 hour
/// preflight cache and preflights answered with `204`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsOptions {
    pub methods: AllowedMethods,
    pub allowed_headers: AllowedHeaders,
    pub exposed_headers: ExposedHeaders,
    pub credentials: bool,
    pub max_age: Option<u64>,
    /// Forward allowed preflights downstream instead of answering them.
    pub preflight_continue: bool,
    pub options_success_status: u16,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            methods: AllowedMethods::default(),
            allowed_headers: AllowedHeaders::default(),
            exposed_headers: ExposedHeaders::default(),
            credentials: true,
            max_age: Some(DEFAULT_MAX_AGE_SECS),
            preflight_continue: false,
            options_success_status: 204,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least one allowed method is required")]
    MethodsEmpty,
    #[error("'{0}' is not a valid HTTP method token")]
    InvalidMethod(String),
    #[error("'{0}' is not a valid HTTP header name")]
    InvalidHeaderName(String),
    #[error("{0} cannot be '*' when credentials are allowed")]
    WildcardWithCredentials(&'static str),
    #[error("preflight success status {0} is outside 200-299")]
    InvalidSuccessStatus(u16),
}

impl CorsOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.methods.is_empty() {
            return Err(ValidationError::MethodsEmpty);
        }
        if let Some(invalid) = self
            .methods
            .entries()
            .iter()
            .find(|method| !is_http_token(method))
        {
            return Err(ValidationError::InvalidMethod(invalid.clone()));
        }

        let header_names = self
            .allowed_headers
            .entries()
            .iter()
            .chain(self.exposed_headers.entries());
        for name in header_names {
            if !is_http_token(name) {
                return Err(ValidationError::InvalidHeaderName(name.clone()));
            }
        }

        if self.credentials {
            if matches!(self.methods, AllowedMethods::Any) {
                return Err(ValidationError::WildcardWithCredentials("allowed methods"));
            }
            if matches!(self.allowed_headers, AllowedHeaders::Any) {
                return Err(ValidationError::WildcardWithCredentials("allowed headers"));
            }
            if matches!(self.exposed_headers, ExposedHeaders::Any) {
                return Err(ValidationError::WildcardWithCredentials("exposed headers"));
            }
        }

        if !(200..=299).contains(&self.options_success_status) {
            return Err(ValidationError::InvalidSuccessStatus(
                self.options_success_status,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
