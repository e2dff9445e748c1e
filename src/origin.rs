use indexmap::IndexSet;
use regex_automata::meta::{BuildError, Regex};
use serde::Serialize;
use thiserror::Error;

const MAX_PATTERN_LENGTH: usize = 50_000;
const MAX_ORIGIN_LENGTH: usize = 4_096;

/// Outcome of evaluating a request's declared origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginDecision {
    /// No `Origin` header: same-origin, native or server-to-server caller.
    NoOrigin,
    ExactMatch,
    PatternMatch,
    Denied,
}

impl OriginDecision {
    pub fn is_allowed(self) -> bool {
        !matches!(self, OriginDecision::Denied)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OriginDecision::NoOrigin => "no_origin",
            OriginDecision::ExactMatch => "exact_match",
            OriginDecision::PatternMatch => "pattern_match",
            OriginDecision::Denied => "denied",
        }
    }
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile origin pattern")]
    Build(#[source] Box<BuildError>),
    #[error("origin pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
    #[error("'{0}' is not a valid wildcard domain")]
    InvalidDomain(String),
}

/// Anchored rule trusting every `https://<label>.<domain>` origin.
#[derive(Clone, Debug)]
pub struct SubdomainPattern {
    source: String,
    regex: Regex,
}

impl SubdomainPattern {
    /// Builds `^https://[A-Za-z0-9-]+\.<domain>$` for a plain DNS domain.
    pub fn for_domain(domain: &str) -> Result<Self, PatternError> {
        if !is_valid_domain(domain) {
            return Err(PatternError::InvalidDomain(domain.to_string()));
        }
        let escaped = domain.replace('.', r"\.");
        Self::from_pattern(&format!(r"^https://[A-Za-z0-9-]+\.{escaped}$"))
    }

    /// Compiles a raw pattern. The caller is responsible for anchoring it.
    pub fn from_pattern(pattern: &str) -> Result<Self, PatternError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let regex = Regex::new(pattern).map_err(|err| PatternError::Build(Box::new(err)))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, origin: &str) -> bool {
        self.regex.is_match(origin.as_bytes())
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

fn is_valid_domain(domain: &str) -> bool {
    !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label
                    .bytes()
                    .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-')
        })
}

/// Decides whether a declared origin may make cross-origin calls.
#[derive(Clone, Debug)]
pub struct OriginMatcher {
    pattern: SubdomainPattern,
}

impl OriginMatcher {
    pub fn new(pattern: SubdomainPattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &SubdomainPattern {
        &self.pattern
    }

    /// First match wins: absent, exact entry, subdomain pattern, otherwise denied.
    pub fn decide(&self, origin: Option<&str>, allowed: &IndexSet<String>) -> OriginDecision {
        let Some(origin) = origin else {
            return OriginDecision::NoOrigin;
        };

        if allowed.contains(origin) {
            return OriginDecision::ExactMatch;
        }

        // The length cap only bounds regex work; listed origins match at any length.
        if origin.len() > MAX_ORIGIN_LENGTH {
            OriginDecision::Denied
        } else if self.pattern.matches(origin) {
            OriginDecision::PatternMatch
        } else {
            OriginDecision::Denied
        }
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
