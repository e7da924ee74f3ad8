//! Holder of the single current route.
//!
//! Notification is synchronous: listeners run inside [`RouteStore::set`],
//! before it returns. Setting the current value again is a silent no-op, which
//! is what stops the navigate → signal → watcher loop from repeating a
//! transition.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::core::types::CurrentRoute;

/// Callback receiving the new route after each transition.
pub type RouteListener = Rc<dyn Fn(&CurrentRoute)>;

/// Identifier of a registered store listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct RouteStore {
    current: RefCell<CurrentRoute>,
    listeners: RefCell<Vec<(ListenerId, RouteListener)>>,
    next_id: Cell<u64>,
    transitions: Cell<u64>,
}

impl RouteStore {
    pub fn new(initial: CurrentRoute) -> Self {
        Self {
            current: RefCell::new(initial),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            transitions: Cell::new(0),
        }
    }

    pub fn get(&self) -> CurrentRoute {
        self.current.borrow().clone()
    }

    /// Replace the current route and notify listeners.
    ///
    /// Returns `false` without notifying when `route` equals the current value.
    /// Only the watcher and controller write, so every stored key comes from
    /// the controller's table.
    pub(crate) fn set(&self, route: CurrentRoute) -> bool {
        {
            let mut current = self.current.borrow_mut();
            if *current == route {
                trace!(route = %route, "route unchanged");
                return false;
            }
            debug!(from = %*current, to = %route, "route transition");
            *current = route.clone();
        }
        self.transitions.set(self.transitions.get() + 1);

        // Snapshot so listeners can read, set, or register re-entrantly.
        let listeners: Vec<RouteListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&route);
        }
        true
    }

    pub fn on_change(&self, listener: impl Fn(&CurrentRoute) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Deregister a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(candidate, _)| *candidate != id);
        listeners.len() != before
    }

    /// Number of transitions applied since construction.
    pub fn transitions(&self) -> u64 {
        self.transitions.get()
    }
}

impl fmt::Debug for RouteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteStore")
            .field("current", &*self.current.borrow())
            .field("listeners", &self.listeners.borrow().len())
            .field("transitions", &self.transitions.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::route_of;
    use crate::test_support::{RecordingListener, sample_table};

    #[test]
    fn set_notifies_before_returning() {
        let table = sample_table();
        let store = RouteStore::new(route_of(&table, "home"));
        let recorder = RecordingListener::attach(&store);

        assert!(store.set(route_of(&table, "about")));

        assert_eq!(recorder.keys(), vec!["about"]);
        assert_eq!(store.get(), route_of(&table, "about"));
    }

    #[test]
    fn set_same_value_is_silent() {
        let table = sample_table();
        let store = RouteStore::new(route_of(&table, "home"));
        let recorder = RecordingListener::attach(&store);

        assert!(!store.set(route_of(&table, "home")));
        assert!(store.set(CurrentRoute::NotFound));
        assert!(!store.set(CurrentRoute::NotFound));

        assert_eq!(recorder.count(), 1);
        assert_eq!(store.transitions(), 1);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let table = sample_table();
        let store = RouteStore::new(route_of(&table, "home"));
        let recorder = RecordingListener::attach(&store);

        assert!(store.remove_listener(recorder.id()));
        assert!(!store.remove_listener(recorder.id()));
        store.set(route_of(&table, "contact"));

        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn listener_may_set_re_entrantly() {
        let table = Rc::new(sample_table());
        let store = Rc::new(RouteStore::new(route_of(&table, "home")));
        let weak = Rc::downgrade(&store);
        let redirect = Rc::clone(&table);
        store.on_change(move |route| {
            if route.is_not_found() {
                if let Some(store) = weak.upgrade() {
                    store.set(route_of(&redirect, "home"));
                }
            }
        });

        store.set(CurrentRoute::NotFound);

        assert_eq!(store.get(), route_of(&table, "home"));
        assert_eq!(store.transitions(), 2);
    }
}
