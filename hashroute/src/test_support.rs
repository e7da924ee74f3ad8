//! Test-only helpers for building tables, signals, and listeners.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};

use crate::core::table::RouteTable;
use crate::core::types::CurrentRoute;
use crate::store::{ListenerId, RouteStore};

/// `home`, `about`, `contact` with content ids `pages/<key>`; default `home`.
pub fn sample_table() -> RouteTable {
    table_of(&["home", "about", "contact"], "home")
}

/// Table with content ids `pages/<key>`. Panics on invalid input.
pub fn table_of(keys: &[&str], default_key: &str) -> RouteTable {
    RouteTable::new(
        keys.iter().map(|key| (key.to_string(), format!("pages/{key}"))),
        default_key,
    )
    .expect("valid test route table")
}

/// Store listener that records every transition it sees.
pub struct RecordingListener {
    id: ListenerId,
    seen: Rc<RefCell<Vec<CurrentRoute>>>,
}

impl RecordingListener {
    pub fn attach(store: &RouteStore) -> Self {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = store.on_change(move |route| sink.borrow_mut().push(route.clone()));
        Self { id, seen }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn count(&self) -> usize {
        self.seen.borrow().len()
    }

    /// Display form of each recorded route (`<not found>` for `NotFound`).
    pub fn keys(&self) -> Vec<String> {
        self.seen.borrow().iter().map(ToString::to_string).collect()
    }
}

/// Temporary directory holding a `hashroute.toml` with `contents`.
pub struct TempConfig {
    pub dir: tempfile::TempDir,
    pub path: PathBuf,
}

impl TempConfig {
    pub fn new(contents: &str) -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let path = dir.path().join("hashroute.toml");
        std::fs::write(&path, contents)
            .with_context(|| format!("write {}", path.display()))?;
        Ok(Self { dir, path })
    }
}
