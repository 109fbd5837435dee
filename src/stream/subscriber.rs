//! Subscriber side of a stream: callbacks, closing, and teardown.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::StreamError;

type NextFn<T> = Box<dyn Fn(T)>;
type ErrorFn = Box<dyn Fn(StreamError)>;
type CompleteFn = Box<dyn Fn()>;

/// Callbacks handed to [`Stream::subscribe_with`](super::Stream::subscribe_with).
///
/// Without an explicit error handler, errors are reported through
/// `tracing::error!` so they surface in the host's log.
pub struct Observer<T> {
    next: NextFn<T>,
    error: ErrorFn,
    complete: CompleteFn,
}

impl<T: 'static> Observer<T> {
    pub fn new(next: impl Fn(T) + 'static) -> Self {
        Self {
            next: Box::new(next),
            error: Box::new(|err| {
                tracing::error!(
                    target: "streamview::stream",
                    error = %err,
                    "unhandled stream error"
                );
            }),
            complete: Box::new(|| {}),
        }
    }

    pub fn on_error(mut self, error: impl Fn(StreamError) + 'static) -> Self {
        self.error = Box::new(error);
        self
    }

    pub fn on_complete(mut self, complete: impl Fn() + 'static) -> Self {
        self.complete = Box::new(complete);
        self
    }
}

struct SubscriberInner<T> {
    closed: Cell<bool>,
    observer: Observer<T>,
}

/// The producer's handle onto one subscription.
///
/// Cheap to clone. Every delivery is dropped once the subscriber is closed,
/// which happens on `error`, `complete`, or when the consumer releases its
/// [`Subscription`].
pub struct Subscriber<T> {
    inner: Rc<SubscriberInner<T>>,
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Subscriber<T> {
    pub(crate) fn new(observer: Observer<T>) -> Self {
        Self {
            inner: Rc::new(SubscriberInner {
                closed: Cell::new(false),
                observer,
            }),
        }
    }

    pub fn next(&self, value: T) {
        if !self.inner.closed.get() {
            (self.inner.observer.next)(value);
        }
    }

    pub fn error(&self, err: StreamError) {
        if !self.inner.closed.replace(true) {
            (self.inner.observer.error)(err);
        }
    }

    pub fn complete(&self) {
        if !self.inner.closed.replace(true) {
            (self.inner.observer.complete)();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }

    pub(crate) fn close(&self) {
        self.inner.closed.set(true);
    }
}

/// Cleanup a producer registers for when its subscriber goes away.
#[must_use]
pub struct Teardown(Option<Box<dyn FnOnce()>>);

impl Teardown {
    pub fn new(cleanup: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(cleanup)))
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub(crate) fn run(mut self) {
        if let Some(cleanup) = self.0.take() {
            cleanup();
        }
    }
}

impl From<Subscription> for Teardown {
    fn from(subscription: Subscription) -> Self {
        Teardown::new(move || drop(subscription))
    }
}

impl From<Vec<Subscription>> for Teardown {
    fn from(subscriptions: Vec<Subscription>) -> Self {
        Teardown::new(move || drop(subscriptions))
    }
}

/// Consumer-side handle of an active subscription.
///
/// Releasing it (explicitly or by dropping) closes the subscriber first, so
/// no callback fires after this point, then runs the producer's teardown.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    pub(crate) fn new<T: 'static>(subscriber: Subscriber<T>, teardown: Teardown) -> Self {
        Self {
            release: RefCell::new(Some(Box::new(move || {
                subscriber.close();
                teardown.run();
            }))),
        }
    }

    pub fn unsubscribe(&self) {
        let release = self.release.borrow_mut().take();
        if let Some(release) = release {
            release();
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.borrow().is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Observer that forwards error and completion to `down` and lets `next`
/// decide what to emit.
pub(crate) fn relay<T: 'static, U: 'static>(
    down: &Subscriber<U>,
    next: impl Fn(&Subscriber<U>, T) + 'static,
) -> Observer<T> {
    let on_next = down.clone();
    let on_error = down.clone();
    let on_complete = down.clone();
    Observer::new(move |value| next(&on_next, value))
        .on_error(move |err| on_error.error(err))
        .on_complete(move || on_complete.complete())
}
