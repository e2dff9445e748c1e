use crate::error::ConfigurationError;
use arc_swap::ArcSwap;
use indexmap::IndexSet;
use std::sync::Arc;

/// Exact-match origins trusted at runtime.
///
/// Readers load an immutable snapshot; writers publish a new one with
/// read-copy-update, so an in-flight request never sees a half-applied change
/// and concurrent writers never overwrite each other.
pub struct OriginRegistry {
    origins: ArcSwap<IndexSet<String>>,
}

impl OriginRegistry {
    pub fn empty() -> Self {
        Self {
            origins: ArcSwap::from_pointee(IndexSet::new()),
        }
    }

    /// Builds the startup list. Blank, malformed and repeated entries are rejected.
    pub fn seeded<I, S>(origins: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = IndexSet::new();
        for origin in origins {
            let origin = origin.as_ref();
            if origin.is_empty() {
                return Err(ConfigurationError::EmptyOrigin);
            }
            if !is_serialized_origin(origin) {
                return Err(ConfigurationError::InvalidOrigin(origin.to_string()));
            }
            if !set.insert(origin.to_string()) {
                return Err(ConfigurationError::DuplicateOrigin(origin.to_string()));
            }
        }

        Ok(Self {
            origins: ArcSwap::from_pointee(set),
        })
    }

    pub fn snapshot(&self) -> Arc<IndexSet<String>> {
        self.origins.load_full()
    }

    pub fn origins(&self) -> Vec<String> {
        self.origins.load().iter().cloned().collect()
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.origins.load().contains(origin)
    }

    pub fn len(&self) -> usize {
        self.origins.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.load().is_empty()
    }

    /// Appends `origin` unless it is empty or already present.
    pub fn add_origin(&self, origin: &str) -> bool {
        if origin.is_empty() || self.contains(origin) {
            return false;
        }

        let mut added = false;
        self.origins.rcu(|current| {
            let mut next = (**current).clone();
            added = next.insert(origin.to_string());
            next
        });
        if added {
            tracing::info!(origin, "added allowed origin");
        }
        added
    }

    /// Removes `origin`, keeping the order of the remaining entries.
    pub fn remove_origin(&self, origin: &str) -> bool {
        if !self.contains(origin) {
            return false;
        }

        let mut removed = false;
        self.origins.rcu(|current| {
            let mut next = (**current).clone();
            removed = next.shift_remove(origin);
            next
        });
        if removed {
            tracing::info!(origin, "removed allowed origin");
        }
        removed
    }
}

impl Default for OriginRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for OriginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.origins.load().iter()).finish()
    }
}

// scheme "://" host [":" port], nothing after the authority.
fn is_serialized_origin(value: &str) -> bool {
    let Some((scheme, authority)) = value.split_once("://") else {
        return false;
    };

    let scheme_ok = scheme
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'));

    let authority_ok = !authority.is_empty()
        && authority
            .chars()
            .all(|ch| ch.is_ascii_graphic() && !matches!(ch, '/' | '?' | '#' | '@'));

    scheme_ok && authority_ok
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;
