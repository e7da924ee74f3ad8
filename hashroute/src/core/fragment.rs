//! Conversion between raw location fragments and route keys.

use crate::core::resolver::route_of;
use crate::core::table::RouteTable;
use crate::core::types::{CurrentRoute, RouteKey};

/// Leading character of a fragment (`#about`).
pub const MARKER: char = '#';

/// Strip a leading marker; an empty remainder maps to `default_key`.
///
/// Applied identically to initial snapshots and change notifications.
pub fn normalize<'a>(raw: &'a str, default_key: &'a str) -> &'a str {
    let stripped = raw.strip_prefix(MARKER).unwrap_or(raw);
    if stripped.is_empty() {
        default_key
    } else {
        stripped
    }
}

/// Normalize `raw` and fold it against table membership.
pub fn route_from_fragment(table: &RouteTable, raw: &str) -> CurrentRoute {
    route_of(table, normalize(raw, table.default_key().as_str()))
}

/// Fragment written to the environment for `key` (`"#" + key`).
pub fn canonical_fragment(key: &RouteKey) -> String {
    format!("{MARKER}{key}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_table, table_of};

    #[test]
    fn normalize_strips_marker() {
        assert_eq!(normalize("#about", "home"), "about");
    }

    #[test]
    fn normalize_accepts_bare_key() {
        assert_eq!(normalize("about", "home"), "about");
    }

    #[test]
    fn normalize_empty_is_default() {
        assert_eq!(normalize("", "home"), "home");
        assert_eq!(normalize("#", "home"), "home");
    }

    #[test]
    fn normalize_strips_only_one_marker() {
        assert_eq!(normalize("##about", "home"), "#about");
    }

    #[test]
    fn route_from_unknown_fragment_is_not_found() {
        let table = sample_table();
        assert_eq!(route_from_fragment(&table, "#bogus"), CurrentRoute::NotFound);
        assert_eq!(route_from_fragment(&table, "##about"), CurrentRoute::NotFound);
    }

    #[test]
    fn route_from_empty_fragment_is_default() {
        let table = sample_table();
        let route = route_from_fragment(&table, "");
        assert_eq!(route.key().map(RouteKey::as_str), Some("home"));
    }

    #[test]
    fn marker_prefixed_and_spaced_keys_are_reachable() {
        let table = table_of(&["home", "#about", "my page"], "home");
        let route = route_from_fragment(&table, "##about");
        assert_eq!(route.key().map(RouteKey::as_str), Some("#about"));
        let route = route_from_fragment(&table, "#my page");
        assert_eq!(route.key().map(RouteKey::as_str), Some("my page"));
    }

    #[test]
    fn canonical_fragment_prefixes_marker() {
        let table = sample_table();
        let key = table.key("contact").expect("key");
        assert_eq!(canonical_fragment(key), "#contact");
    }
}
