//! Derived "is active" view for navigation affordances.

use crate::core::types::{ActiveMap, CurrentRoute, RouteKey};

/// Mark the current route's key active among `known_keys`.
///
/// `NotFound`, or a key missing from `known_keys`, leaves every entry false.
pub fn compute_active_map(current: &CurrentRoute, known_keys: &[RouteKey]) -> ActiveMap {
    let entries = known_keys
        .iter()
        .map(|key| {
            let active = current.key() == Some(key);
            (key.clone(), active)
        })
        .collect();
    ActiveMap::from_entries(entries)
}
