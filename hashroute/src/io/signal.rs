//! Navigation signal: the environment-owned location fragment.
//!
//! The router never touches ambient global state. Everything it needs from
//! the host is behind [`NavigationSignal`], injected at construction.
//! [`MemorySignal`] is a deterministic in-process binding with browser-like
//! history, used by the CLI and by tests.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

/// Callback invoked when the environment's fragment may have changed.
pub type ChangeHandler = Rc<dyn Fn()>;

/// Identifier of a registered change handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Read/write/subscribe surface over the environment's location.
///
/// Receivers are `&self`: the environment is shared and mutated from
/// several places, so implementations use interior mutability. Handlers may
/// be invoked synchronously from inside `write`.
pub trait NavigationSignal {
    /// Current raw fragment, e.g. `"#about"` or `""`.
    fn read(&self) -> String;

    /// Replace the fragment. Writing the current value must succeed.
    fn write(&self, fragment: &str);

    fn subscribe(&self, handler: ChangeHandler) -> SubscriptionId;

    /// Deregister `id`. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Owned registration with a [`NavigationSignal`].
///
/// Released exactly once, either by [`Subscription::release`] or on drop.
/// Further releases are no-ops.
pub struct Subscription {
    signal: Weak<dyn NavigationSignal>,
    id: Option<SubscriptionId>,
}

impl Subscription {
    pub fn new(signal: &Rc<dyn NavigationSignal>, handler: ChangeHandler) -> Self {
        let id = signal.subscribe(handler);
        Self {
            signal: Rc::downgrade(signal),
            id: Some(id),
        }
    }

    /// Unsubscribe. Returns `true` only for the call that actually released.
    pub fn release(&mut self) -> bool {
        let Some(id) = self.id.take() else {
            return false;
        };
        if let Some(signal) = self.signal.upgrade() {
            signal.unsubscribe(id);
        }
        true
    }

    pub fn is_live(&self) -> bool {
        self.id.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// When [`MemorySignal`] delivers change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Handlers run inside the call that changed the fragment.
    #[default]
    Immediate,
    /// Notifications queue until [`MemorySignal::flush`], like an event loop.
    Deferred,
}

#[derive(Debug)]
struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    fn current(&self) -> &str {
        &self.entries[self.index]
    }

    fn push(&mut self, fragment: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(fragment.to_string());
        self.index = self.entries.len() - 1;
    }
}

/// In-process location with back/forward history.
///
/// Mirrors browser behaviour: assigning the current fragment creates no
/// history entry and raises no notification; any other change pushes an
/// entry (dropping forward history) and notifies subscribers.
pub struct MemorySignal {
    history: RefCell<History>,
    handlers: RefCell<Vec<(SubscriptionId, ChangeHandler)>>,
    next_id: Cell<u64>,
    mode: DispatchMode,
    pending: Cell<usize>,
    writes: RefCell<Vec<String>>,
}

impl MemorySignal {
    pub fn new(initial: &str) -> Self {
        Self::with_mode(initial, DispatchMode::Immediate)
    }

    pub fn with_mode(initial: &str, mode: DispatchMode) -> Self {
        Self {
            history: RefCell::new(History {
                entries: vec![initial.to_string()],
                index: 0,
            }),
            handlers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            mode,
            pending: Cell::new(0),
            writes: RefCell::new(Vec::new()),
        }
    }

    /// Change the fragment from outside the application (address bar, link
    /// from another page).
    pub fn external(&self, fragment: &str) {
        debug!(fragment, "external fragment change");
        self.change_to(fragment);
    }

    /// Step back in history. Returns `false` at the oldest entry.
    pub fn back(&self) -> bool {
        {
            let mut history = self.history.borrow_mut();
            if history.index == 0 {
                return false;
            }
            history.index -= 1;
            debug!(fragment = history.current(), "history back");
        }
        self.notify();
        true
    }

    /// Step forward in history. Returns `false` at the newest entry.
    pub fn forward(&self) -> bool {
        {
            let mut history = self.history.borrow_mut();
            if history.index + 1 >= history.entries.len() {
                return false;
            }
            history.index += 1;
            debug!(fragment = history.current(), "history forward");
        }
        self.notify();
        true
    }

    /// Raise a change notification without changing the fragment.
    pub fn emit(&self) {
        self.notify();
    }

    /// Deliver queued notifications, including any raised while flushing.
    /// Returns how many were delivered.
    pub fn flush(&self) -> usize {
        let mut delivered = 0;
        while self.pending.get() > 0 {
            self.pending.set(self.pending.get() - 1);
            self.dispatch();
            delivered += 1;
        }
        delivered
    }

    pub fn pending(&self) -> usize {
        self.pending.get()
    }

    /// All history entries, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().entries.clone()
    }

    /// Every fragment passed to [`NavigationSignal::write`], in call order.
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    pub fn live_subscriptions(&self) -> usize {
        self.handlers.borrow().len()
    }

    fn change_to(&self, fragment: &str) {
        {
            let mut history = self.history.borrow_mut();
            if history.current() == fragment {
                trace!(fragment, "fragment unchanged");
                return;
            }
            history.push(fragment);
        }
        self.notify();
    }

    fn notify(&self) {
        match self.mode {
            DispatchMode::Immediate => self.dispatch(),
            DispatchMode::Deferred => self.pending.set(self.pending.get() + 1),
        }
    }

    fn dispatch(&self) {
        // Snapshot so handlers can subscribe, unsubscribe, or write re-entrantly.
        let handlers: Vec<ChangeHandler> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        trace!(count = handlers.len(), "dispatching change notification");
        for handler in handlers {
            handler();
        }
    }
}

impl Default for MemorySignal {
    fn default() -> Self {
        Self::new("")
    }
}

impl NavigationSignal for MemorySignal {
    fn read(&self) -> String {
        self.history.borrow().current().to_string()
    }

    fn write(&self, fragment: &str) {
        self.writes.borrow_mut().push(fragment.to_string());
        self.change_to(fragment);
    }

    fn subscribe(&self, handler: ChangeHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, handler));
        debug!(?id, "signal subscription added");
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.handlers
            .borrow_mut()
            .retain(|(candidate, _)| *candidate != id);
        debug!(?id, "signal subscription removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(signal: &Rc<dyn NavigationSignal>) -> (Subscription, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let subscription = Subscription::new(signal, Rc::new(move || seen.set(seen.get() + 1)));
        (subscription, count)
    }

    #[test]
    fn write_same_value_is_silent_success() {
        let memory = Rc::new(MemorySignal::new("#about"));
        let signal: Rc<dyn NavigationSignal> = memory.clone();
        let (_sub, count) = counter(&signal);

        signal.write("#about");

        assert_eq!(signal.read(), "#about");
        assert_eq!(count.get(), 0);
        assert_eq!(memory.history(), vec!["#about"]);
        assert_eq!(memory.writes(), vec!["#about"]);
    }

    #[test]
    fn write_new_value_pushes_and_notifies() {
        let memory = Rc::new(MemorySignal::new(""));
        let signal: Rc<dyn NavigationSignal> = memory.clone();
        let (_sub, count) = counter(&signal);

        signal.write("#contact");

        assert_eq!(signal.read(), "#contact");
        assert_eq!(count.get(), 1);
        assert_eq!(memory.history(), vec!["", "#contact"]);
    }

    #[test]
    fn back_and_forward_walk_history() {
        let memory = Rc::new(MemorySignal::new(""));
        memory.write("#about");
        memory.write("#contact");

        assert!(memory.back());
        assert_eq!(memory.read(), "#about");
        assert!(memory.back());
        assert_eq!(memory.read(), "");
        assert!(!memory.back());
        assert!(memory.forward());
        assert_eq!(memory.read(), "#about");
    }

    #[test]
    fn push_after_back_drops_forward_entries() {
        let memory = MemorySignal::new("");
        memory.write("#about");
        memory.write("#contact");
        memory.back();
        memory.write("#home");

        assert_eq!(memory.history(), vec!["", "#about", "#home"]);
        assert!(!memory.forward());
    }

    #[test]
    fn deferred_mode_queues_until_flush() {
        let memory = Rc::new(MemorySignal::with_mode("", DispatchMode::Deferred));
        let signal: Rc<dyn NavigationSignal> = memory.clone();
        let (_sub, count) = counter(&signal);

        signal.write("#about");
        memory.external("#contact");
        assert_eq!(count.get(), 0);
        assert_eq!(memory.pending(), 2);

        assert_eq!(memory.flush(), 2);
        assert_eq!(count.get(), 2);
        assert_eq!(memory.pending(), 0);
    }

    #[test]
    fn subscription_releases_exactly_once() {
        let memory = Rc::new(MemorySignal::new(""));
        let signal: Rc<dyn NavigationSignal> = memory.clone();
        let (mut sub, count) = counter(&signal);
        assert_eq!(memory.live_subscriptions(), 1);

        assert!(sub.release());
        assert!(!sub.release());
        assert!(!sub.is_live());
        assert_eq!(memory.live_subscriptions(), 0);

        memory.external("#about");
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let memory = Rc::new(MemorySignal::new(""));
        let signal: Rc<dyn NavigationSignal> = memory.clone();
        {
            let (_sub, _count) = counter(&signal);
            assert_eq!(memory.live_subscriptions(), 1);
        }
        assert_eq!(memory.live_subscriptions(), 0);
    }

    #[test]
    fn handler_may_unsubscribe_during_dispatch() {
        let memory = Rc::new(MemorySignal::new(""));
        let signal: Rc<dyn NavigationSignal> = memory.clone();
        let slot: Rc<RefCell<Option<SubscriptionId>>> = Rc::new(RefCell::new(None));
        let weak = Rc::downgrade(&signal);
        let own_id = Rc::clone(&slot);
        let id = signal.subscribe(Rc::new(move || {
            if let (Some(signal), Some(id)) = (weak.upgrade(), *own_id.borrow()) {
                signal.unsubscribe(id);
            }
        }));
        *slot.borrow_mut() = Some(id);

        memory.external("#about");
        assert_eq!(memory.live_subscriptions(), 0);
    }
}
