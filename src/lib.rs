mod allowed_headers;
mod allowed_methods;
pub mod config;
pub mod constants;
mod context;
mod error;
mod exposed_headers;
mod gatekeeper;
mod headers;
pub mod middleware;
mod options;
mod origin;
mod registry;
mod result;
pub mod server;
mod snapshot;
mod util;

pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::AllowedMethods;
pub use context::RequestContext;
pub use error::ConfigurationError;
pub use exposed_headers::ExposedHeaders;
pub use gatekeeper::{Gatekeeper, SharedGatekeeper};
pub use headers::Headers;
pub use options::{CorsOptions, ValidationError};
pub use origin::{OriginDecision, OriginMatcher, PatternError, SubdomainPattern};
pub use registry::OriginRegistry;
pub use result::{
    CorsResult, GateDecision, PolicyViolation, PreflightResult, ViolationBody, iso_timestamp,
};
pub use snapshot::{ConfigSnapshot, PolicySnapshot};
