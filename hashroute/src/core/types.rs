//! Shared deterministic types for the navigation core.
//!
//! These types define the contract between the router and the rendering
//! layer. They carry no references to the environment and are cheap to clone.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Configured route identifier.
///
/// Only a validated [`RouteTable`](crate::core::table::RouteTable) hands these
/// out, so a `RouteKey` always names a configured destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RouteKey(String);

impl RouteKey {
    pub(crate) fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of the content rendered for a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The single piece of navigation state: a configured key or `NotFound`.
///
/// Never holds a raw fragment string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentRoute {
    Key(RouteKey),
    NotFound,
}

impl CurrentRoute {
    pub fn key(&self) -> Option<&RouteKey> {
        match self {
            Self::Key(key) => Some(key),
            Self::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl fmt::Display for CurrentRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => key.fmt(f),
            Self::NotFound => f.write_str("<not found>"),
        }
    }
}

/// Outcome of resolving a route key to content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Content {
    Id(ContentId),
    NotFound,
}

impl Content {
    pub fn id(&self) -> Option<&ContentId> {
        match self {
            Self::Id(id) => Some(id),
            Self::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Per-key "is active" flags, in route table order.
///
/// At most one entry is `true`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveMap {
    entries: Vec<(RouteKey, bool)>,
}

impl ActiveMap {
    pub(crate) fn from_entries(entries: Vec<(RouteKey, bool)>) -> Self {
        Self { entries }
    }

    /// Flag for `key`, or `None` if the key is not part of the map.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate.as_str() == key)
            .map(|(_, active)| *active)
    }

    /// The key marked active, if any.
    pub fn active_key(&self) -> Option<&RouteKey> {
        self.entries
            .iter()
            .find(|(_, active)| *active)
            .map(|(key, _)| key)
    }

    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|(_, active)| *active).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RouteKey, bool)> {
        self.entries.iter().map(|(key, active)| (key, *active))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ActiveMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, active) in &self.entries {
            map.serialize_entry(key.as_str(), active)?;
        }
        map.end()
    }
}

/// Snapshot handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteView {
    pub current: CurrentRoute,
    pub content: Content,
    pub active: ActiveMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_map_serializes_as_object_in_order() {
        let map = ActiveMap::from_entries(vec![
            (RouteKey::new("home"), false),
            (RouteKey::new("about"), true),
        ]);
        let json = serde_json::to_string(&map).expect("serialize");
        assert_eq!(json, r#"{"home":false,"about":true}"#);
    }

    #[test]
    fn current_route_serializes_tagged() {
        let json = serde_json::to_string(&CurrentRoute::Key(RouteKey::new("about")))
            .expect("serialize");
        assert_eq!(json, r#"{"key":"about"}"#);
        let json = serde_json::to_string(&CurrentRoute::NotFound).expect("serialize");
        assert_eq!(json, r#""not_found""#);
    }
}
