//! Push-based streams.
//!
//! A [`Stream`] is a cold description of a sequence: every subscription runs
//! the producer again, synchronously, inside the `subscribe` call. Hot
//! sources (event channels, store bridges) are built on top with
//! [`Stream::new`] and an explicit observer registry.
//!
//! Everything here is single-threaded: values, callbacks and teardowns run on
//! the call stack that triggered them.

mod operators;
mod share;
mod subscriber;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub(crate) use subscriber::relay;
pub use subscriber::{Observer, Subscriber, Subscription, Teardown};

type Producer<T> = dyn Fn(Subscriber<T>) -> Teardown;

pub struct Stream<T> {
    producer: Rc<Producer<T>>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            producer: Rc::clone(&self.producer),
        }
    }
}

impl<T: 'static> Stream<T> {
    pub fn new(producer: impl Fn(Subscriber<T>) -> Teardown + 'static) -> Self {
        Self {
            producer: Rc::new(producer),
        }
    }

    /// Completes immediately without a value.
    pub fn empty() -> Self {
        Self::new(|subscriber| {
            subscriber.complete();
            Teardown::none()
        })
    }

    /// Never emits, never completes.
    pub fn never() -> Self {
        Self::new(|_| Teardown::none())
    }

    /// Emits `values` synchronously on subscribe, then completes.
    pub fn of(values: impl IntoIterator<Item = T>) -> Self
    where
        T: Clone,
    {
        let values: Rc<[T]> = values.into_iter().collect();
        Self::new(move |subscriber| {
            for value in values.iter() {
                if subscriber.is_closed() {
                    break;
                }
                subscriber.next(value.clone());
            }
            subscriber.complete();
            Teardown::none()
        })
    }

    pub fn subscribe(&self, next: impl Fn(T) + 'static) -> Subscription {
        self.subscribe_with(Observer::new(next))
    }

    pub fn subscribe_with(&self, observer: Observer<T>) -> Subscription {
        let subscriber = Subscriber::new(observer);
        let teardown = (self.producer)(subscriber.clone());
        Subscription::new(subscriber, teardown)
    }

    /// Interleaves every source in arrival order.
    ///
    /// Completes once all sources complete; the first error ends the merged
    /// stream.
    pub fn merge(sources: Vec<Stream<T>>) -> Self {
        Self::new(move |down| {
            if sources.is_empty() {
                down.complete();
                return Teardown::none();
            }
            let remaining = Rc::new(Cell::new(sources.len()));
            let subscriptions: Vec<Subscription> = sources
                .iter()
                .map(|source| {
                    let on_next = down.clone();
                    let on_error = down.clone();
                    let on_complete = down.clone();
                    let remaining = Rc::clone(&remaining);
                    source.subscribe_with(
                        Observer::new(move |value| on_next.next(value))
                            .on_error(move |err| on_error.error(err))
                            .on_complete(move || {
                                remaining.set(remaining.get() - 1);
                                if remaining.get() == 0 {
                                    on_complete.complete();
                                }
                            }),
                    )
                })
                .collect();
            subscriptions.into()
        })
    }
}

impl<A: Clone + 'static> Stream<A> {
    /// Emits a pair every time either side emits, once both have emitted.
    pub fn combine_latest<B: Clone + 'static>(a: Stream<A>, b: Stream<B>) -> Stream<(A, B)> {
        Stream::new(move |down: Subscriber<(A, B)>| {
            let latest: Rc<RefCell<(Option<A>, Option<B>)>> = Rc::new(RefCell::new((None, None)));
            let remaining = Rc::new(Cell::new(2usize));

            let emit = {
                let latest = Rc::clone(&latest);
                move |down: &Subscriber<(A, B)>| {
                    let pair = match &*latest.borrow() {
                        (Some(a), Some(b)) => Some((a.clone(), b.clone())),
                        _ => None,
                    };
                    if let Some(pair) = pair {
                        down.next(pair);
                    }
                }
            };
            let finish = {
                let remaining = Rc::clone(&remaining);
                move |down: &Subscriber<(A, B)>| {
                    remaining.set(remaining.get() - 1);
                    if remaining.get() == 0 {
                        down.complete();
                    }
                }
            };

            let left = {
                let (latest, emit, finish) = (Rc::clone(&latest), emit.clone(), finish.clone());
                let (on_next, on_error, on_complete) = (down.clone(), down.clone(), down.clone());
                a.subscribe_with(
                    Observer::new(move |value| {
                        latest.borrow_mut().0 = Some(value);
                        emit(&on_next);
                    })
                    .on_error(move |err| on_error.error(err))
                    .on_complete(move || finish(&on_complete)),
                )
            };
            let right = {
                let (on_next, on_error, on_complete) = (down.clone(), down.clone(), down.clone());
                b.subscribe_with(
                    Observer::new(move |value| {
                        latest.borrow_mut().1 = Some(value);
                        emit(&on_next);
                    })
                    .on_error(move |err| on_error.error(err))
                    .on_complete(move || finish(&on_complete)),
                )
            };
            vec![left, right].into()
        })
    }
}
