//! Keeps the route store in step with external fragment changes.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::core::fragment::route_from_fragment;
use crate::core::table::RouteTable;
use crate::io::signal::{NavigationSignal, Subscription};
use crate::store::RouteStore;

/// Registration of a route store with a navigation signal.
///
/// Dropping the watcher tears it down.
#[derive(Debug)]
pub struct HashWatcher {
    subscription: Subscription,
    attached: Rc<Cell<bool>>,
}

impl HashWatcher {
    /// Sync `store` from the signal's current snapshot, then subscribe to
    /// later changes.
    pub fn attach(
        signal: &Rc<dyn NavigationSignal>,
        table: Rc<RouteTable>,
        store: Rc<RouteStore>,
    ) -> Self {
        let snapshot = signal.read();
        let initial = route_from_fragment(&table, &snapshot);
        debug!(fragment = %snapshot, route = %initial, "watcher attached");
        store.set(initial);

        let attached = Rc::new(Cell::new(true));
        let live = Rc::clone(&attached);
        let source = Rc::downgrade(signal);
        let subscription = Subscription::new(
            signal,
            Rc::new(move || {
                if !live.get() {
                    return;
                }
                let Some(signal) = source.upgrade() else {
                    return;
                };
                let fragment = signal.read();
                let route = route_from_fragment(&table, &fragment);
                if store.get() == route {
                    trace!(fragment = %fragment, "redundant change notification");
                    return;
                }
                debug!(fragment = %fragment, route = %route, "external navigation");
                store.set(route);
            }),
        );

        Self {
            subscription,
            attached,
        }
    }

    /// Unsubscribe. Later notifications, including ones already being
    /// dispatched, no longer reach the store. Repeated calls are no-ops.
    pub fn detach(&mut self) -> bool {
        self.attached.set(false);
        let released = self.subscription.release();
        if released {
            debug!("watcher detached");
        }
        released
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }
}

impl Drop for HashWatcher {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::route_of;
    use crate::core::types::CurrentRoute;
    use crate::io::signal::MemorySignal;
    use crate::test_support::{RecordingListener, sample_table};

    struct Fixture {
        memory: Rc<MemorySignal>,
        signal: Rc<dyn NavigationSignal>,
        table: Rc<RouteTable>,
        store: Rc<RouteStore>,
    }

    fn fixture(initial: &str) -> Fixture {
        let memory = Rc::new(MemorySignal::new(initial));
        let signal: Rc<dyn NavigationSignal> = memory.clone();
        let table = Rc::new(sample_table());
        let store = Rc::new(RouteStore::new(CurrentRoute::NotFound));
        Fixture {
            memory,
            signal,
            table,
            store,
        }
    }

    #[test]
    fn attach_initializes_from_snapshot() {
        let fx = fixture("#contact");
        let _watcher = HashWatcher::attach(&fx.signal, Rc::clone(&fx.table), Rc::clone(&fx.store));
        assert_eq!(fx.store.get(), route_of(&fx.table, "contact"));
    }

    #[test]
    fn empty_snapshot_is_default_route() {
        let fx = fixture("");
        let _watcher = HashWatcher::attach(&fx.signal, Rc::clone(&fx.table), Rc::clone(&fx.store));
        assert_eq!(fx.store.get(), route_of(&fx.table, "home"));
    }

    #[test]
    fn unknown_snapshot_is_not_found() {
        let fx = fixture("#missing");
        fx.store.set(route_of(&fx.table, "home"));
        let _watcher = HashWatcher::attach(&fx.signal, Rc::clone(&fx.table), Rc::clone(&fx.store));
        assert_eq!(fx.store.get(), CurrentRoute::NotFound);
    }

    #[test]
    fn external_change_updates_store() {
        let fx = fixture("");
        let _watcher = HashWatcher::attach(&fx.signal, Rc::clone(&fx.table), Rc::clone(&fx.store));
        let recorder = RecordingListener::attach(&fx.store);

        fx.memory.external("#about");
        fx.memory.external("#bogus");

        assert_eq!(recorder.keys(), vec!["about", "<not found>"]);
    }

    #[test]
    fn redundant_notification_does_not_notify() {
        let fx = fixture("#about");
        let _watcher = HashWatcher::attach(&fx.signal, Rc::clone(&fx.table), Rc::clone(&fx.store));
        let recorder = RecordingListener::attach(&fx.store);

        fx.memory.emit();
        fx.memory.emit();

        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn detach_stops_updates_and_is_idempotent() {
        let fx = fixture("");
        let mut watcher =
            HashWatcher::attach(&fx.signal, Rc::clone(&fx.table), Rc::clone(&fx.store));

        assert!(watcher.detach());
        assert!(!watcher.detach());
        assert!(!watcher.is_attached());
        assert_eq!(fx.memory.live_subscriptions(), 0);

        fx.memory.external("#contact");
        assert_eq!(fx.store.get(), route_of(&fx.table, "home"));
    }

    #[test]
    fn drop_releases_subscription() {
        let fx = fixture("");
        {
            let _watcher =
                HashWatcher::attach(&fx.signal, Rc::clone(&fx.table), Rc::clone(&fx.store));
            assert_eq!(fx.memory.live_subscriptions(), 1);
        }
        assert_eq!(fx.memory.live_subscriptions(), 0);
    }
}
