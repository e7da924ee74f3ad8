//! Statically validated route configuration.
//!
//! A [`RouteTable`] is built once at startup and never mutated. Construction
//! checks every invariant up front and refuses to build an inconsistent table.

use std::collections::HashSet;

use thiserror::Error;

use crate::core::types::{ContentId, RouteKey};

/// Startup configuration errors. Any of these is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("route table is empty")]
    EmptyTable,

    #[error("route #{index} has an empty key")]
    EmptyKey { index: usize },

    #[error("duplicate route key '{0}'")]
    DuplicateKey(String),

    #[error("default key '{0}' is not a configured route")]
    MissingDefault(String),

    #[error("invalid route table:\n- {}", join_errors(.0))]
    Invalid(Vec<ConfigError>),
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n- ")
}

/// One configured destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub key: RouteKey,
    pub content: ContentId,
}

/// Ordered mapping from route key to content id, plus the default key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    default_key: RouteKey,
}

impl RouteTable {
    /// Build a table from `(key, content)` pairs in display order.
    ///
    /// All violations are collected; a single one is returned as-is, several
    /// are wrapped in [`ConfigError::Invalid`].
    pub fn new<K, C>(
        routes: impl IntoIterator<Item = (K, C)>,
        default_key: &str,
    ) -> Result<Self, ConfigError>
    where
        K: Into<String>,
        C: Into<String>,
    {
        let routes: Vec<(String, String)> = routes
            .into_iter()
            .map(|(key, content)| (key.into(), content.into()))
            .collect();

        let errors = validate_routes(&routes, default_key);
        if let Some(err) = collapse(errors) {
            return Err(err);
        }

        let entries = routes
            .into_iter()
            .map(|(key, content)| RouteEntry {
                key: RouteKey::new(key),
                content: ContentId::new(content),
            })
            .collect();
        Ok(Self {
            entries,
            default_key: RouteKey::new(default_key),
        })
    }

    pub fn default_key(&self) -> &RouteKey {
        &self.default_key
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &RouteKey> {
        self.entries.iter().map(|entry| &entry.key)
    }

    /// Configured keys in table order.
    pub fn known_keys(&self) -> Vec<RouteKey> {
        self.keys().cloned().collect()
    }

    /// Exact-match lookup of a configured key.
    pub fn key(&self, raw: &str) -> Option<&RouteKey> {
        self.entry(raw).map(|entry| &entry.key)
    }

    pub(crate) fn entry(&self, raw: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.key.as_str() == raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Check table invariants:
/// - at least one route
/// - keys non-empty and unique
/// - default key configured
///
/// Keys are otherwise opaque: `#about` or `my page` are reachable through the
/// fragments `##about` and `#my page`.
fn validate_routes(routes: &[(String, String)], default_key: &str) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    if routes.is_empty() {
        errors.push(ConfigError::EmptyTable);
    }

    let mut seen = HashSet::new();
    for (index, (key, _)) in routes.iter().enumerate() {
        if key.is_empty() {
            errors.push(ConfigError::EmptyKey { index });
            continue;
        }
        if !seen.insert(key.as_str()) {
            errors.push(ConfigError::DuplicateKey(key.clone()));
        }
    }

    if !routes.iter().any(|(key, _)| key == default_key) {
        errors.push(ConfigError::MissingDefault(default_key.to_string()));
    }
    errors
}

fn collapse(mut errors: Vec<ConfigError>) -> Option<ConfigError> {
    match errors.len() {
        0 => None,
        1 => errors.pop(),
        _ => Some(ConfigError::Invalid(errors)),
    }
}
