//! Route configuration stored in `hashroute.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::table::RouteTable;

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "hashroute.toml";

/// Router configuration (TOML).
///
/// Intended to be edited by humans. Route order is display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterConfig {
    /// Key that an empty fragment normalizes to.
    pub default: String,

    pub routes: Vec<RouteConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteConfig {
    pub key: String,
    /// Content identifier handed to the rendering layer.
    pub content: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        let route = |key: &str| RouteConfig {
            key: key.to_string(),
            content: format!("pages/{key}"),
        };
        Self {
            default: "home".to_string(),
            routes: vec![route("home"), route("about"), route("contact")],
        }
    }
}

impl RouterConfig {
    /// Build the immutable route table, failing on any configuration error.
    pub fn route_table(&self) -> Result<RouteTable> {
        let table = RouteTable::new(
            self.routes
                .iter()
                .map(|route| (route.key.clone(), route.content.clone())),
            &self.default,
        )?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        self.route_table().map(|_| ())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RouterConfig::default()`.
pub fn load_config(path: &Path) -> Result<RouterConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = RouterConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RouterConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), routes = cfg.routes.len(), "config loaded");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &RouterConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
