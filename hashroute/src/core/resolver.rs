//! Pure route key resolution.
//!
//! Total and stateless: every input yields either content or `NotFound`.

use crate::core::table::RouteTable;
use crate::core::types::{Content, CurrentRoute};

/// Resolve `key` to its content id by exact match.
///
/// Empty and unconfigured keys resolve to [`Content::NotFound`].
pub fn resolve(table: &RouteTable, key: &str) -> Content {
    match table.entry(key) {
        Some(entry) => Content::Id(entry.content.clone()),
        None => Content::NotFound,
    }
}

/// Resolve the content for the current route.
pub fn resolve_route(table: &RouteTable, route: &CurrentRoute) -> Content {
    match route {
        CurrentRoute::Key(key) => resolve(table, key.as_str()),
        CurrentRoute::NotFound => Content::NotFound,
    }
}

/// Fold a normalized key against table membership.
pub fn route_of(table: &RouteTable, key: &str) -> CurrentRoute {
    match table.key(key) {
        Some(key) => CurrentRoute::Key(key.clone()),
        None => CurrentRoute::NotFound,
    }
}
