//! Reference tracker: the latest handle to something the host owns.
//!
//! ```text
//! update(Option<T>) ──→ EventChannel ──→ drop None ──→ drop repeats ──→ share_latest
//! ```
//!
//! Consecutive identical references are suppressed by identity, and the most
//! recent reference is replayed to every new subscriber. The tracker holds
//! one subscription of its own on the shared stream for its whole life, so
//! the latest reference is kept even while no consumer listens.

use std::cell::RefCell;
use std::rc::Rc;

use crate::channel::EventChannel;
use crate::element::ElementHandle;
use crate::stream::{Stream, Subscription};

/// Identity comparison for reference-like values.
pub trait Identity {
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Rc<T> {
    fn same(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(self), Rc::as_ptr(other))
    }
}

impl Identity for ElementHandle {
    fn same(&self, other: &Self) -> bool {
        ElementHandle::same(self, other)
    }
}

pub struct RefTracker<T> {
    updates: EventChannel<Option<T>>,
    references: Stream<T>,
    latest: Rc<RefCell<Option<T>>>,
    _retained: Rc<Subscription>,
}

impl<T> Clone for RefTracker<T> {
    fn clone(&self) -> Self {
        Self {
            updates: self.updates.clone(),
            references: self.references.clone(),
            latest: Rc::clone(&self.latest),
            _retained: Rc::clone(&self._retained),
        }
    }
}

impl<T: Identity + Clone + 'static> Default for RefTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identity + Clone + 'static> RefTracker<T> {
    pub fn new() -> Self {
        let updates = EventChannel::new();
        let references = updates
            .stream()
            .filter_map(|reference: Option<T>| reference)
            .distinct_until_changed_by(|previous: &T, next: &T| previous.same(next))
            .share_latest();
        let latest = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&latest);
        let retained = references.subscribe(move |reference| *slot.borrow_mut() = Some(reference));
        Self {
            updates,
            references,
            latest,
            _retained: Rc::new(retained),
        }
    }

    /// Records a new reference. `None` and repeats of the current reference
    /// are ignored.
    pub fn update(&self, reference: Option<T>) {
        self.updates.emit(reference);
    }

    /// Callback form of [`update`](Self::update).
    pub fn handler(&self) -> impl Fn(Option<T>) + 'static {
        let tracker = self.clone();
        move |reference| tracker.update(reference)
    }

    pub fn current(&self) -> Option<T> {
        self.latest.borrow().clone()
    }

    pub fn stream(&self) -> Stream<T> {
        self.references.clone()
    }
}
