//! Navigation façade used by links and other UI affordances.
//!
//! A controller owns the route store and, while mounted, one watcher
//! subscription. [`NavigationController::navigate`] writes the signal and the
//! store in one synchronous call; whatever notification the signal raises in
//! response finds the store already current and is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::active::compute_active_map;
use crate::core::fragment::{canonical_fragment, route_from_fragment};
use crate::core::resolver::resolve_route;
use crate::core::table::RouteTable;
use crate::core::types::{ActiveMap, Content, CurrentRoute, RouteView};
use crate::io::signal::NavigationSignal;
use crate::store::RouteStore;
use crate::watcher::HashWatcher;

/// Caller errors from [`NavigationController::navigate`]. Neither mutates
/// any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("unknown navigation target '{0}'")]
    UnknownTarget(String),

    #[error("navigation controller is unmounted")]
    Unmounted,
}

pub struct NavigationController {
    table: Rc<RouteTable>,
    signal: Rc<dyn NavigationSignal>,
    store: Rc<RouteStore>,
    watcher: RefCell<Option<HashWatcher>>,
}

impl NavigationController {
    /// Build a controller and mount it against `signal`.
    pub fn new(table: RouteTable, signal: Rc<dyn NavigationSignal>) -> Self {
        let table = Rc::new(table);
        let initial = route_from_fragment(&table, &signal.read());
        let controller = Self {
            table,
            signal,
            store: Rc::new(RouteStore::new(initial)),
            watcher: RefCell::new(None),
        };
        controller.mount();
        controller
    }

    /// Subscribe to the signal and re-sync from its snapshot.
    ///
    /// Returns `false` if already mounted; there is never more than one live
    /// subscription per controller.
    pub fn mount(&self) -> bool {
        if self.is_mounted() {
            return false;
        }
        let watcher = HashWatcher::attach(
            &self.signal,
            Rc::clone(&self.table),
            Rc::clone(&self.store),
        );
        *self.watcher.borrow_mut() = Some(watcher);
        debug!("navigation controller mounted");
        true
    }

    /// Release the subscription. Returns `false` if not mounted.
    pub fn unmount(&self) -> bool {
        let Some(mut watcher) = self.watcher.borrow_mut().take() else {
            return false;
        };
        watcher.detach();
        debug!("navigation controller unmounted");
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.watcher.borrow().is_some()
    }

    /// Navigate to a configured key.
    ///
    /// On return the store already holds `key`, whether or not the signal has
    /// delivered its own change notification. If another subscriber rewrote
    /// the fragment while the write was being dispatched, the store follows
    /// the signal instead.
    pub fn navigate(&self, key: &str) -> Result<(), NavigationError> {
        if !self.is_mounted() {
            warn!(key, "navigate on unmounted controller");
            return Err(NavigationError::Unmounted);
        }
        let Some(target) = self.table.key(key).cloned() else {
            warn!(key, "rejected navigation to unknown route");
            return Err(NavigationError::UnknownTarget(key.to_string()));
        };

        let fragment = canonical_fragment(&target);
        debug!(%fragment, "navigate");
        self.signal.write(&fragment);

        let observed = self.signal.read();
        if observed == fragment {
            self.store.set(CurrentRoute::Key(target));
        } else {
            debug!(%fragment, %observed, "fragment redirected during navigate");
            self.store.set(route_from_fragment(&self.table, &observed));
        }
        Ok(())
    }

    /// Navigate to the configured default key.
    pub fn navigate_home(&self) -> Result<(), NavigationError> {
        let home = self.table.default_key().as_str().to_string();
        self.navigate(&home)
    }

    pub fn current_route(&self) -> CurrentRoute {
        self.store.get()
    }

    pub fn content(&self) -> Content {
        resolve_route(&self.table, &self.store.get())
    }

    pub fn active_map(&self) -> ActiveMap {
        compute_active_map(&self.store.get(), &self.table.known_keys())
    }

    /// Everything the rendering layer needs, computed from one read.
    pub fn view(&self) -> RouteView {
        let current = self.store.get();
        RouteView {
            content: resolve_route(&self.table, &current),
            active: compute_active_map(&current, &self.table.known_keys()),
            current,
        }
    }

    /// Subscribe to route transitions. Writes stay inside the crate.
    pub fn store(&self) -> &Rc<RouteStore> {
        &self.store
    }
}

impl Drop for NavigationController {
    fn drop(&mut self) {
        self.unmount();
    }
}
