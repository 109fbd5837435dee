use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::{Observer, Stream, Subscriber, Subscription, Teardown};
use crate::error::StreamError;

struct Shared<T> {
    observers: Vec<(u64, Subscriber<T>)>,
    next_id: u64,
    latest: Option<T>,
    connected: bool,
    connection: Option<Subscription>,
    finished: Option<Result<(), StreamError>>,
}

impl<T: Clone> Shared<T> {
    fn snapshot(&self) -> Vec<Subscriber<T>> {
        self.observers.iter().map(|(_, o)| o.clone()).collect()
    }
}

fn broadcast<T: Clone + 'static>(shared: &Weak<RefCell<Shared<T>>>, value: T) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let observers = {
        let mut state = shared.borrow_mut();
        state.latest = Some(value.clone());
        state.snapshot()
    };
    for observer in observers {
        observer.next(value.clone());
    }
}

fn finish<T: Clone + 'static>(shared: &Weak<RefCell<Shared<T>>>, outcome: Result<(), StreamError>) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let (observers, connection) = {
        let mut state = shared.borrow_mut();
        state.finished = Some(outcome.clone());
        let observers: Vec<Subscriber<T>> =
            state.observers.drain(..).map(|(_, o)| o).collect();
        (observers, state.connection.take())
    };
    drop(connection);
    for observer in observers {
        match &outcome {
            Ok(()) => observer.complete(),
            Err(err) => observer.error(err.clone()),
        }
    }
}

impl<T: Clone + 'static> Stream<T> {
    /// Multicasts one upstream subscription and replays the latest value to
    /// each new subscriber.
    ///
    /// Upstream is subscribed by the first subscriber and released when the
    /// last one leaves; the latest value is kept across reconnections.
    pub fn share_latest(&self) -> Stream<T> {
        let source = self.clone();
        let shared = Rc::new(RefCell::new(Shared {
            observers: Vec::new(),
            next_id: 0,
            latest: None,
            connected: false,
            connection: None,
            finished: None,
        }));

        Stream::new(move |down: Subscriber<T>| {
            let (id, latest, finished) = {
                let mut state = shared.borrow_mut();
                let id = state.next_id;
                state.next_id += 1;
                if state.finished.is_none() {
                    state.observers.push((id, down.clone()));
                }
                (id, state.latest.clone(), state.finished.clone())
            };

            if let Some(value) = latest {
                down.next(value);
            }
            match finished {
                Some(Ok(())) => {
                    down.complete();
                    return Teardown::none();
                }
                Some(Err(err)) => {
                    down.error(err);
                    return Teardown::none();
                }
                None => {}
            }

            let must_connect = !std::mem::replace(&mut shared.borrow_mut().connected, true);
            if must_connect {
                let on_next = Rc::downgrade(&shared);
                let on_error = Rc::downgrade(&shared);
                let on_complete = Rc::downgrade(&shared);
                let connection = source.subscribe_with(
                    Observer::new(move |value| broadcast(&on_next, value))
                        .on_error(move |err| finish(&on_error, Err(err)))
                        .on_complete(move || finish(&on_complete, Ok(()))),
                );
                let mut state = shared.borrow_mut();
                if state.finished.is_none() && state.connected {
                    state.connection = Some(connection);
                }
            }

            let shared = Rc::downgrade(&shared);
            Teardown::new(move || {
                let Some(shared) = shared.upgrade() else {
                    return;
                };
                let connection = {
                    let mut state = shared.borrow_mut();
                    state.observers.retain(|(other, _)| *other != id);
                    if state.observers.is_empty() && state.finished.is_none() {
                        state.connected = false;
                        state.connection.take()
                    } else {
                        None
                    }
                };
                drop(connection);
            })
        })
    }
}
