use std::{
    mem::take,
    rc::{Rc, Weak},
};

use crate::{
    slot::SlotKey,
    store::{slots::SlotKind, RawStore},
};

#[cfg(test)]
mod tests;

/// Handle to a cell, reducer, middleware or observer registered with a [`Store`](crate::Store).
///
/// Disposing the handle, or dropping it, removes exactly the slot it was issued for.
/// Disposal is idempotent.
#[derive(Default)]
#[must_use]
pub struct Subscription(RawSubscription);

impl Subscription {
    pub fn empty() -> Self {
        Subscription(RawSubscription::Empty)
    }

    /// Creates a handle that calls `f` when disposed.
    pub fn from_fn(f: impl FnOnce() + 'static) -> Self {
        Subscription(RawSubscription::Fn(Box::new(f)))
    }

    pub(crate) fn from_slot(store: &Rc<RawStore>, kind: SlotKind, key: SlotKey) -> Self {
        Subscription(RawSubscription::Slot {
            store: Rc::downgrade(store),
            kind,
            key,
        })
    }

    /// Removes the slot from the store.
    ///
    /// Does nothing if the handle has already been disposed,
    /// the slot has been removed by [`Store::clear`](crate::Store::clear),
    /// or the store has been dropped.
    pub fn dispose(&mut self) {
        match take(&mut self.0) {
            RawSubscription::Empty => {}
            RawSubscription::Fn(f) => f(),
            RawSubscription::Slot { store, kind, key } => {
                if let Some(store) = store.upgrade() {
                    store.remove(kind, key);
                }
            }
        }
    }

    /// Returns `true` if the handle no longer refers to a live slot.
    ///
    /// This is the case after [`dispose`](Self::dispose), after the slot was removed by other means
    /// (a [`Store::subscribe_once`](crate::Store::subscribe_once) observer that has fired,
    /// [`Store::clear`](crate::Store::clear)), and after the store was dropped.
    pub fn is_disposed(&self) -> bool {
        match &self.0 {
            RawSubscription::Empty => true,
            RawSubscription::Fn(_) => false,
            RawSubscription::Slot { store, kind, key } => !store
                .upgrade()
                .is_some_and(|store| store.contains(*kind, *key)),
        }
    }
}
impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[derive(Default)]
enum RawSubscription {
    #[default]
    Empty,
    Fn(Box<dyn FnOnce() + 'static>),
    Slot {
        store: Weak<RawStore>,
        kind: SlotKind,
        key: SlotKey,
    },
}

/// A group of [`Subscription`]s disposed together.
#[derive(Default)]
#[must_use]
pub struct Subscriptions(Vec<Subscription>);

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, subscription: Subscription) {
        self.0.push(subscription);
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Disposes every subscription in registration order and empties the group.
    pub fn dispose(&mut self) {
        for mut s in self.0.drain(..) {
            s.dispose();
        }
    }
}
impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.dispose();
    }
}
impl Extend<Subscription> for Subscriptions {
    fn extend<T: IntoIterator<Item = Subscription>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
impl FromIterator<Subscription> for Subscriptions {
    fn from_iter<T: IntoIterator<Item = Subscription>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl std::ops::AddAssign<Subscription> for Subscriptions {
    fn add_assign(&mut self, rhs: Subscription) {
        self.push(rhs);
    }
}
