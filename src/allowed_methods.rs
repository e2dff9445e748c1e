use crate::constants::method;

/// Configuration for the `Access-Control-Allow-Methods` response header.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AllowedMethods {
    /// Emit the wildcard `*`. Browsers read it literally on credentialed requests.
    Any,
    /// Emit a comma-separated list of methods. Case-sensitive to preserve caller intent.
    List(Vec<String>),
}

impl AllowedMethods {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for value in values {
            let trimmed = value.into().trim().to_string();
            if !deduped.contains(&trimmed) {
                deduped.push(trimmed);
            }
        }
        Self::List(deduped)
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn header_value(&self) -> Option<String> {
        match self {
            AllowedMethods::Any => Some("*".to_string()),
            AllowedMethods::List(values) if values.is_empty() => None,
            AllowedMethods::List(values) => Some(values.join(",")),
        }
    }

    /// Method names are case-sensitive (RFC 9110), so `get` is not `GET`.
    pub fn allows_method(&self, requested: &str) -> bool {
        match self {
            AllowedMethods::Any => true,
            AllowedMethods::List(values) => values.iter().any(|value| value == requested.trim()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AllowedMethods::List(values) if values.is_empty())
    }

    pub(crate) fn entries(&self) -> &[String] {
        match self {
            AllowedMethods::Any => &[],
            AllowedMethods::List(values) => values,
        }
    }
}

impl Default for AllowedMethods {
    fn default() -> Self {
        Self::list([
            method::GET,
            method::POST,
            method::PUT,
            method::DELETE,
            method::PATCH,
            method::OPTIONS,
        ])
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
