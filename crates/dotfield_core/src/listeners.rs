//! Injected event callbacks with drop-to-unsubscribe handles
//!
//! Instead of registering global listeners and remembering to remove them,
//! callers subscribe a closure and receive a [`Subscription`]. Dropping the
//! subscription removes the closure, so teardown happens on every exit path.

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

new_key_type! {
    /// Key to a registered listener
    pub struct ListenerKey;
}

type Handler<E> = Box<dyn FnMut(&E)>;
// A slot is `None` while its handler is running
type Registry<E> = RefCell<SlotMap<ListenerKey, Option<Handler<E>>>>;

/// A set of callbacks for one event type
pub struct Listeners<E> {
    registry: Rc<Registry<E>>,
}

impl<E: 'static> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Listeners<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(SlotMap::with_key())),
        }
    }

    /// Register a callback; it stays registered until the returned handle is dropped
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&E) + 'static,
    {
        let key = self.registry.borrow_mut().insert(Some(Box::new(handler)));
        let registry: Weak<Registry<E>> = Rc::downgrade(&self.registry);

        Subscription {
            key,
            release: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.borrow_mut().remove(key);
                }
            })),
        }
    }

    /// Deliver an event to every registered callback; returns how many ran
    ///
    /// Callbacks may subscribe or drop subscriptions while running. A
    /// callback added during delivery first runs on the next event.
    pub fn emit(&self, event: &E) -> usize {
        let keys: Vec<ListenerKey> = self.registry.borrow().keys().collect();
        let mut delivered = 0;

        for key in keys {
            let handler = self
                .registry
                .borrow_mut()
                .get_mut(key)
                .and_then(Option::take);

            if let Some(mut handler) = handler {
                handler(event);
                delivered += 1;
                // Put it back unless it was unsubscribed while running
                if let Some(slot) = self.registry.borrow_mut().get_mut(key) {
                    *slot = Some(handler);
                }
            }
        }

        delivered
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to a registered callback; unsubscribes on drop
pub struct Subscription {
    key: ListenerKey,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn key(&self) -> ListenerKey {
        self.key
    }

    /// Unsubscribe now (same as dropping)
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("key", &self.key).finish()
    }
}
