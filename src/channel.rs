//! Event channel: turns imperative callbacks into a stream.
//!
//! ```text
//! handler(value) ──→ EventChannel ──→ stream() ──→ subscribers
//! ```
//!
//! Delivery is synchronous and in emission order. There is no replay: a
//! subscriber only sees values emitted after it subscribed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::stream::{Stream, Subscriber, Teardown};

struct Registry<T> {
    observers: Vec<(u64, Subscriber<T>)>,
    next_id: u64,
    completed: bool,
}

/// Sink + stream pair for UI-originated events.
///
/// Cloning yields another handle onto the same channel.
pub struct EventChannel<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T> Clone for EventChannel<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<T: Clone + 'static> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> EventChannel<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                observers: Vec::new(),
                next_id: 0,
                completed: false,
            })),
        }
    }

    /// Delivers `value` to every current subscriber. No-op once completed or
    /// when nobody listens.
    pub fn emit(&self, value: T) {
        let observers: Vec<Subscriber<T>> = {
            let registry = self.registry.borrow();
            if registry.completed {
                return;
            }
            registry.observers.iter().map(|(_, o)| o.clone()).collect()
        };
        for observer in observers {
            observer.next(value.clone());
        }
    }

    /// Callback form of [`emit`](Self::emit), for wiring into event handlers.
    pub fn handler(&self) -> impl Fn(T) + 'static {
        let channel = self.clone();
        move |value| channel.emit(value)
    }

    /// Completes every subscriber; later emissions are dropped and later
    /// subscribers complete immediately.
    pub fn complete(&self) {
        let observers: Vec<Subscriber<T>> = {
            let mut registry = self.registry.borrow_mut();
            if registry.completed {
                return;
            }
            registry.completed = true;
            registry.observers.drain(..).map(|(_, o)| o).collect()
        };
        for observer in observers {
            observer.complete();
        }
    }

    pub fn is_completed(&self) -> bool {
        self.registry.borrow().completed
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().observers.len()
    }

    pub fn stream(&self) -> Stream<T> {
        let registry = Rc::clone(&self.registry);
        Stream::new(move |subscriber| register(&registry, subscriber))
    }
}

fn register<T: 'static>(
    registry: &Rc<RefCell<Registry<T>>>,
    subscriber: Subscriber<T>,
) -> Teardown {
    let id = {
        let mut state = registry.borrow_mut();
        if state.completed {
            drop(state);
            subscriber.complete();
            return Teardown::none();
        }
        let id = state.next_id;
        state.next_id += 1;
        state.observers.push((id, subscriber));
        id
    };
    let registry: Weak<RefCell<Registry<T>>> = Rc::downgrade(registry);
    Teardown::new(move || {
        if let Some(registry) = registry.upgrade() {
            registry
                .borrow_mut()
                .observers
                .retain(|(other, _)| *other != id);
        }
    })
}
