#![forbid(unsafe_code)]

//! Observer list for property-changed notifications.
//!
//! # Design
//!
//! [`PropertyChanged<S>`] is owned by the source object `S` (usually as a
//! plain struct field) and holds the callbacks interested in that object's
//! changes. Each callback receives the source and a
//! [`PropertyChangedEventArgs`] naming the property.
//!
//! Callbacks live in `Rc`s behind a `RefCell`. A notification first clones
//! the `Rc`s into a snapshot and releases the borrow, then calls them. As a
//! result an observer may subscribe or unsubscribe on the same list while
//! it is being notified; the change applies from the next notification.
//!
//! # Invariants
//!
//! 1. Observers are called in registration order.
//! 2. Each live observer is called exactly once per [`raise`](PropertyChanged::raise).
//! 3. An unsubscribed observer is never called by a later `raise`.
//! 4. Subscription ids are never reused within one list.
//!
//! # Failure Modes
//!
//! - **Observer panic**: not caught. The unwind leaves `raise` immediately,
//!   so observers after the panicking one are skipped for that round. No
//!   borrow is held while observers run, so the list stays usable.
//! - **Observer leak**: callbacks are removed only by
//!   [`unsubscribe`](PropertyChanged::unsubscribe) or [`clear`](PropertyChanged::clear).
//!   A warning is logged when the list grows past
//!   [`NotifyConfig::observer_warn_threshold`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, trace, trace_span, warn};

use crate::config::NotifyConfig;
use crate::event::PropertyChangedEventArgs;

type Callback<S> = Rc<dyn Fn(&S, &PropertyChangedEventArgs<'_>)>;

/// Handle returned by [`PropertyChanged::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Raw id value, unique within the list that issued it.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

struct Entry<S> {
    id: SubscriptionId,
    callback: Callback<S>,
}

/// Ordered list of property-changed observers for a source of type `S`.
///
/// Cloning yields an **empty** list with the same config: observers are
/// bound to the instance they subscribed to.
pub struct PropertyChanged<S> {
    entries: RefCell<Vec<Entry<S>>>,
    next_id: Cell<u64>,
    config: NotifyConfig,
}

impl<S> PropertyChanged<S> {
    /// Empty list using [`NotifyConfig::global`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(NotifyConfig::global())
    }

    /// Empty list with an explicit config.
    #[must_use]
    pub fn with_config(config: NotifyConfig) -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            config,
        }
    }

    /// Diagnostics settings this list was built with.
    #[must_use]
    pub fn config(&self) -> NotifyConfig {
        self.config
    }

    /// Append an observer. The same closure may be registered more than
    /// once; each registration gets its own id and its own call.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&S, &PropertyChangedEventArgs<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let count = {
            let mut entries = self.entries.borrow_mut();
            entries.push(Entry {
                id,
                callback: Rc::new(callback),
            });
            entries.len()
        };
        debug!(id = id.0, observers = count, "observer subscribed");

        let threshold = self.config.observer_warn_threshold;
        if threshold > 0 && count == threshold + 1 {
            warn!(
                observers = count,
                threshold, "observer count exceeded threshold, possible subscription leak"
            );
        }
        id
    }

    /// Remove the observer registered under `id`.
    ///
    /// Returns `false` (and does nothing) if `id` is not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = {
            let mut entries = self.entries.borrow_mut();
            match entries.iter().position(|entry| entry.id == id) {
                Some(index) => {
                    entries.remove(index);
                    true
                }
                None => false,
            }
        };
        if removed {
            debug!(id = id.0, "observer unsubscribed");
        }
        removed
    }

    /// Drop every observer.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True when no observer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Call every registered observer with `(source, property_name)`, in
    /// registration order. A no-op when nobody is subscribed.
    pub fn raise(&self, source: &S, property_name: &str) {
        // Snapshot so observers can touch the list while we iterate.
        let callbacks: Vec<Callback<S>> = self
            .entries
            .borrow()
            .iter()
            .map(|entry| Rc::clone(&entry.callback))
            .collect();

        let _span = self.config.log_notifications.then(|| {
            trace_span!(
                "property_changed",
                property = property_name,
                observers = callbacks.len()
            )
            .entered()
        });
        if self.config.log_notifications {
            trace!(property = property_name, "notifying observers");
        }

        let args = PropertyChangedEventArgs::new(property_name);
        for callback in &callbacks {
            callback(source, &args);
        }
    }
}

impl<S> Default for PropertyChanged<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for PropertyChanged<S> {
    fn clone(&self) -> Self {
        Self::with_config(self.config)
    }
}

impl<S> std::fmt::Debug for PropertyChanged<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyChanged")
            .field("observers", &self.len())
            .field("config", &self.config)
            .finish()
    }
}
