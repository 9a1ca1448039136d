//! Outside-click dismissal as an explicit subscription.
//!
//! Every open popup needs to hear about pointer-downs that land outside of it.
//! Instead of a global listener registered by a lifecycle hook, a popup holds a
//! [`Subscription`] acquired from a shared [`DismissRegistry`] while it is open.
//! The subscription is released by [`Subscription::unsubscribe`] on every close
//! path and by `Drop` when the widget goes away, so the registry's
//! [`active_count`](DismissRegistry::active_count) returns to zero once nothing
//! is open.
//!
//! Everything here is single-threaded: the registry lives on the UI event
//! thread and is shared through `Rc`.
//!
//! # Example
//!
//! ```rust
//! use sift::select::DismissRegistry;
//!
//! let registry = DismissRegistry::new();
//! let first = registry.subscribe();
//! let second = registry.subscribe();
//!
//! // A click inside the first popup dismisses only the second.
//! assert_eq!(registry.pointer_down(Some(first.id())), vec![second.id()]);
//!
//! first.unsubscribe();
//! drop(second);
//! assert_eq!(registry.active_count(), 0);
//! ```

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::{Rc, Weak};

/// Identifies one outside-click listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

#[derive(Debug, Default)]
struct Listeners {
    next_id: u64,
    active: BTreeSet<ListenerId>,
}

/// Shared table of open popups listening for outside pointer-downs.
///
/// Cloning yields another handle to the same table.
#[derive(Debug, Clone, Default)]
pub struct DismissRegistry {
    inner: Rc<RefCell<Listeners>>,
}

impl DismissRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. It stays active until the returned subscription
    /// is unsubscribed or dropped.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let mut listeners = self.inner.borrow_mut();
        let id = ListenerId(listeners.next_id);
        listeners.next_id += 1;
        listeners.active.insert(id);
        tracing::trace!(
            listener = %id,
            active = listeners.active.len(),
            "outside-click listener registered"
        );
        Subscription {
            id,
            registry: Some(Rc::downgrade(&self.inner)),
        }
    }

    /// Routes a pointer-down. `inside` names the listener whose popup contains
    /// the pointer, if any; every other active listener is returned and should
    /// receive [`SelectEvent::OutsidePointerDown`](super::SelectEvent::OutsidePointerDown).
    #[must_use]
    pub fn pointer_down(&self, inside: Option<ListenerId>) -> Vec<ListenerId> {
        let listeners = self.inner.borrow();
        let targets: Vec<ListenerId> = listeners
            .active
            .iter()
            .copied()
            .filter(|id| Some(*id) != inside)
            .collect();
        tracing::trace!(targets = targets.len(), "pointer down routed");
        targets
    }

    /// Number of listeners still registered.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.inner.borrow().active.len()
    }

    #[must_use]
    pub fn is_active(&self, id: ListenerId) -> bool {
        self.inner.borrow().active.contains(&id)
    }
}

/// Scoped registration in a [`DismissRegistry`].
///
/// Released exactly once: by [`unsubscribe`](Self::unsubscribe) or on drop.
/// Outliving the registry is harmless.
#[derive(Debug)]
pub struct Subscription {
    id: ListenerId,
    registry: Option<Weak<RefCell<Listeners>>>,
}

impl Subscription {
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) else {
            return;
        };
        let mut listeners = registry.borrow_mut();
        listeners.active.remove(&self.id);
        tracing::trace!(
            listener = %self.id,
            active = listeners.active.len(),
            "outside-click listener released"
        );
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::DismissRegistry;

    #[test]
    fn subscribe_and_unsubscribe_balance() {
        let registry = DismissRegistry::new();
        let sub = registry.subscribe();
        assert_eq!(registry.active_count(), 1);
        assert!(registry.is_active(sub.id()));
        let id = sub.id();
        sub.unsubscribe();
        assert_eq!(registry.active_count(), 0);
        assert!(!registry.is_active(id));
    }

    #[test]
    fn drop_releases_listener() {
        let registry = DismissRegistry::new();
        {
            let _sub = registry.subscribe();
            assert_eq!(registry.active_count(), 1);
        }
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn ids_are_unique() {
        let registry = DismissRegistry::new();
        let a = registry.subscribe();
        let b = registry.subscribe();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn pointer_down_outside_everything_targets_all() {
        let registry = DismissRegistry::new();
        let a = registry.subscribe();
        let b = registry.subscribe();
        assert_eq!(registry.pointer_down(None), vec![a.id(), b.id()]);
    }

    #[test]
    fn subscription_outliving_registry_is_harmless() {
        let registry = DismissRegistry::new();
        let sub = registry.subscribe();
        drop(registry);
        sub.unsubscribe();
    }
}
