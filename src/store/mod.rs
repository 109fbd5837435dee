//! The external store capability and its bridge into streams.
//!
//! ```text
//! Action ──→ StoreReducer ──→ StoreState ──→ bridge_store ──→ components
//!    ↑                                                          │
//!    └────────────────────── action sink ───────────────────────┘
//! ```
//!
//! Components only need [`Store`]: a snapshot read, change notification and
//! dispatch. [`AppStore`] is the in-memory implementation used by the demo
//! and the tests; hosts may bring their own.

mod action;
mod app_store;
mod reducer;
mod state;

use std::rc::Rc;

use crate::stream::{Stream, Subscriber, Teardown};

pub use action::Action;
pub use app_store::AppStore;
pub use reducer::StoreReducer;
pub use state::StoreState;

/// Change notification callback.
pub type Listener = Rc<dyn Fn()>;

/// Cancels one `subscribe` registration.
pub type Unsubscribe = Box<dyn FnOnce()>;

/// What the runtime needs from the host's state container.
pub trait Store {
    type State: Clone + 'static;
    type Action: 'static;

    /// Synchronous snapshot of the current state.
    fn get_state(&self) -> Self::State;

    /// Registers `listener`, called synchronously after every change.
    fn subscribe(&self, listener: Listener) -> Unsubscribe;

    fn dispatch(&self, action: Self::Action);
}

/// Push view of `store`.
///
/// Every subscription registers its own listener with the store, receives
/// the current snapshot synchronously inside `subscribe`, then one snapshot
/// per change notification. Unsubscribing unregisters that listener.
pub fn bridge_store<St: Store + 'static>(store: Rc<St>) -> Stream<St::State> {
    Stream::new(move |subscriber: Subscriber<St::State>| {
        let listener = {
            let store = Rc::downgrade(&store);
            let subscriber = subscriber.clone();
            Rc::new(move || {
                if let Some(store) = store.upgrade() {
                    subscriber.next(store.get_state());
                }
            })
        };
        let unsubscribe = store.subscribe(listener);
        subscriber.next(store.get_state());
        Teardown::new(unsubscribe)
    })
}
