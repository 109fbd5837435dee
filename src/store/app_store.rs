//! In-memory store driven by a [`StoreReducer`].

use std::cell::RefCell;
use std::rc::Rc;

use super::reducer::StoreReducer;
use super::{Listener, Store, Unsubscribe};

struct Listeners {
    entries: Vec<(u64, Listener)>,
    next_id: u64,
}

/// Single-threaded application store.
///
/// `dispatch` applies the reducer and notifies listeners only when the state
/// actually changed. Listeners may dispatch again; the nested action is
/// applied immediately, and every listener reads the newest state through
/// `get_state`.
pub struct AppStore<R: StoreReducer> {
    state: RefCell<R::State>,
    listeners: Rc<RefCell<Listeners>>,
}

impl<R: StoreReducer> AppStore<R> {
    pub fn new(initial: R::State) -> Self {
        Self {
            state: RefCell::new(initial),
            listeners: Rc::new(RefCell::new(Listeners {
                entries: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

impl<R: StoreReducer> Default for AppStore<R> {
    fn default() -> Self {
        Self::new(R::State::default())
    }
}

impl<R: StoreReducer> Store for AppStore<R> {
    type State = R::State;
    type Action = R::Action;

    fn get_state(&self) -> Self::State {
        self.state.borrow().clone()
    }

    fn subscribe(&self, listener: Listener) -> Unsubscribe {
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, listener));
            id
        };
        let listeners = Rc::downgrade(&self.listeners);
        Box::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().entries.retain(|(other, _)| *other != id);
            }
        })
    }

    fn dispatch(&self, action: Self::Action) {
        let changed = {
            let previous = self.state.borrow().clone();
            let next = R::reduce(previous.clone(), action);
            let changed = next != previous;
            if changed {
                *self.state.borrow_mut() = next;
            }
            changed
        };
        if !changed {
            tracing::trace!(target: "streamview::store", "action left state unchanged");
            return;
        }

        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        tracing::trace!(target: "streamview::store", listeners = listeners.len(), "state changed");
        for listener in listeners {
            listener();
        }
    }
}
