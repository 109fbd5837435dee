use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{relay, Observer, Stream, Subscriber, Subscription, Teardown};
use crate::error::StreamError;

impl<T: 'static> Stream<T> {
    pub fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> Stream<U> {
        let source = self.clone();
        let f = Rc::new(f);
        Stream::new(move |down| {
            let f = Rc::clone(&f);
            source
                .subscribe_with(relay(&down, move |down, value| down.next(f(value))))
                .into()
        })
    }

    /// Like [`map`](Self::map), but an `Err` ends the stream with that error.
    pub fn try_map<U: 'static>(
        &self,
        f: impl Fn(T) -> Result<U, StreamError> + 'static,
    ) -> Stream<U> {
        let source = self.clone();
        let f = Rc::new(f);
        Stream::new(move |down| {
            let f = Rc::clone(&f);
            source
                .subscribe_with(relay(&down, move |down, value| match f(value) {
                    Ok(mapped) => down.next(mapped),
                    Err(err) => down.error(err),
                }))
                .into()
        })
    }

    pub fn filter(&self, predicate: impl Fn(&T) -> bool + 'static) -> Stream<T> {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Stream::new(move |down| {
            let predicate = Rc::clone(&predicate);
            source
                .subscribe_with(relay(&down, move |down, value| {
                    if predicate(&value) {
                        down.next(value);
                    }
                }))
                .into()
        })
    }

    pub fn filter_map<U: 'static>(&self, f: impl Fn(T) -> Option<U> + 'static) -> Stream<U> {
        let source = self.clone();
        let f = Rc::new(f);
        Stream::new(move |down| {
            let f = Rc::clone(&f);
            source
                .subscribe_with(relay(&down, move |down, value| {
                    if let Some(mapped) = f(value) {
                        down.next(mapped);
                    }
                }))
                .into()
        })
    }

    /// Running fold; every subscription starts again from `seed`.
    pub fn scan<A: Clone + 'static>(&self, seed: A, f: impl Fn(A, T) -> A + 'static) -> Stream<A> {
        let source = self.clone();
        let f = Rc::new(f);
        Stream::new(move |down| {
            let f = Rc::clone(&f);
            let acc = RefCell::new(seed.clone());
            source
                .subscribe_with(relay(&down, move |down, value| {
                    let previous = acc.borrow().clone();
                    let next = f(previous, value);
                    *acc.borrow_mut() = next.clone();
                    down.next(next);
                }))
                .into()
        })
    }

    pub fn start_with(&self, first: T) -> Stream<T>
    where
        T: Clone,
    {
        let source = self.clone();
        Stream::new(move |down: Subscriber<T>| {
            down.next(first.clone());
            if down.is_closed() {
                return Teardown::none();
            }
            source
                .subscribe_with(relay(&down, |down, value| down.next(value)))
                .into()
        })
    }

    /// Emits at most `count` values, then completes.
    pub fn take(&self, count: usize) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |down: Subscriber<T>| {
            if count == 0 {
                down.complete();
                return Teardown::none();
            }
            let taken = Cell::new(0usize);
            source
                .subscribe_with(relay(&down, move |down, value| {
                    let seen = taken.get();
                    if seen >= count {
                        return;
                    }
                    taken.set(seen + 1);
                    down.next(value);
                    if seen + 1 == count {
                        down.complete();
                    }
                }))
                .into()
        })
    }

    /// Maps each value to an inner stream and mirrors only the newest one.
    ///
    /// Every inner subscription is tagged with a generation. An inner stream
    /// superseded while it is still subscribing (a value re-entering the
    /// outer stream synchronously) is released and its values dropped.
    pub fn switch_map<U: 'static>(&self, project: impl Fn(T) -> Stream<U> + 'static) -> Stream<U> {
        let source = self.clone();
        let project = Rc::new(project);
        Stream::new(move |down: Subscriber<U>| {
            let inner: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
            let generation = Rc::new(Cell::new(0u64));
            let inner_active = Rc::new(Cell::new(false));
            let outer_done = Rc::new(Cell::new(false));

            let outer = {
                let project = Rc::clone(&project);
                let inner = Rc::clone(&inner);
                let generation = Rc::clone(&generation);
                let inner_active = Rc::clone(&inner_active);
                let outer_done = Rc::clone(&outer_done);
                let on_next = down.clone();
                let on_error = down.clone();
                let on_complete = down.clone();
                let active_for_complete = Rc::clone(&inner_active);
                let done_for_inner = Rc::clone(&outer_done);
                source.subscribe_with(
                    Observer::new(move |value| {
                        let current = generation.get() + 1;
                        generation.set(current);
                        let previous = inner.borrow_mut().take();
                        drop(previous);
                        inner_active.set(true);

                        let live_next = Rc::clone(&generation);
                        let live_error = Rc::clone(&generation);
                        let live_complete = Rc::clone(&generation);
                        let forward = on_next.clone();
                        let fail = on_next.clone();
                        let finish = on_next.clone();
                        let active = Rc::clone(&inner_active);
                        let done = Rc::clone(&done_for_inner);
                        let subscription = project(value).subscribe_with(
                            Observer::new(move |inner_value| {
                                if live_next.get() == current {
                                    forward.next(inner_value);
                                }
                            })
                            .on_error(move |err| {
                                if live_error.get() == current {
                                    fail.error(err);
                                }
                            })
                            .on_complete(move || {
                                if live_complete.get() != current {
                                    return;
                                }
                                active.set(false);
                                if done.get() {
                                    finish.complete();
                                }
                            }),
                        );
                        if generation.get() == current {
                            *inner.borrow_mut() = Some(subscription);
                        } else {
                            drop(subscription);
                        }
                    })
                    .on_error(move |err| on_error.error(err))
                    .on_complete(move || {
                        outer_done.set(true);
                        if !active_for_complete.get() {
                            on_complete.complete();
                        }
                    }),
                )
            };

            Teardown::new(move || {
                drop(outer);
                let current = inner.borrow_mut().take();
                drop(current);
            })
        })
    }

    /// Drops a value when `same` says it matches the previous emission.
    pub fn distinct_until_changed_by(&self, same: impl Fn(&T, &T) -> bool + 'static) -> Stream<T>
    where
        T: Clone,
    {
        let source = self.clone();
        let same = Rc::new(same);
        Stream::new(move |down| {
            let same = Rc::clone(&same);
            let last: RefCell<Option<T>> = RefCell::new(None);
            source
                .subscribe_with(relay(&down, move |down, value: T| {
                    let repeated = last
                        .borrow()
                        .as_ref()
                        .is_some_and(|previous| same(previous, &value));
                    if repeated {
                        return;
                    }
                    *last.borrow_mut() = Some(value.clone());
                    down.next(value);
                }))
                .into()
        })
    }

    pub fn distinct_until_changed(&self) -> Stream<T>
    where
        T: Clone + PartialEq,
    {
        self.distinct_until_changed_by(|a, b| a == b)
    }

    /// Projects each value and suppresses repeated projections.
    pub fn select<U: Clone + PartialEq + 'static>(
        &self,
        selector: impl Fn(T) -> U + 'static,
    ) -> Stream<U> {
        self.map(selector).distinct_until_changed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::EventChannel;
    use crate::stream::testing::collect;

    #[test]
    fn map_and_filter_compose() {
        let stream = Stream::of(1..=6).filter(|n| n % 2 == 0).map(|n| n * 10);
        let (seen, _sub) = collect(&stream);
        assert_eq!(*seen.borrow(), vec![20, 40, 60]);
    }

    #[test]
    fn try_map_error_closes_the_stream() {
        let failures = Rc::new(RefCell::new(Vec::new()));
        let sink = failures.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let values = seen.clone();
        let _sub = Stream::of([1, 2, 3])
            .try_map(|n| {
                if n == 2 {
                    Err(StreamError::producer("two"))
                } else {
                    Ok(n)
                }
            })
            .subscribe_with(
                Observer::new(move |n| values.borrow_mut().push(n))
                    .on_error(move |err| sink.borrow_mut().push(err)),
            );

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(*failures.borrow(), vec![StreamError::producer("two")]);
    }

    #[test]
    fn scan_restarts_from_seed_per_subscription() {
        let stream = Stream::of([1, 2, 3]).scan(0, |acc, n| acc + n);
        let (first, _a) = collect(&stream);
        let (second, _b) = collect(&stream);
        assert_eq!(*first.borrow(), vec![1, 3, 6]);
        assert_eq!(*second.borrow(), vec![1, 3, 6]);
    }

    #[test]
    fn select_suppresses_repeated_projections() {
        let channel = EventChannel::new();
        let (seen, _sub) = collect(&channel.stream().select(|(name, _): (&'static str, u32)| name));
        channel.emit(("a", 1));
        channel.emit(("a", 2));
        channel.emit(("b", 3));
        channel.emit(("a", 4));
        assert_eq!(*seen.borrow(), vec!["a", "b", "a"]);
    }

    #[test]
    fn start_with_prepends_before_live_values() {
        let channel = EventChannel::new();
        let (seen, _sub) = collect(&channel.stream().start_with(false));
        channel.emit(true);
        assert_eq!(*seen.borrow(), vec![false, true]);
    }

    #[test]
    fn take_completes_after_count() {
        let channel = EventChannel::new();
        let done = Rc::new(Cell::new(false));
        let flag = done.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = channel.stream().take(2).subscribe_with(
            Observer::new(move |v| sink.borrow_mut().push(v)).on_complete(move || flag.set(true)),
        );
        channel.emit(1);
        channel.emit(2);
        channel.emit(3);
        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert!(done.get());
    }

    #[test]
    fn switch_map_follows_only_the_latest_inner_stream() {
        let selector = EventChannel::new();
        let left = EventChannel::new();
        let right = EventChannel::new();
        let (l, r) = (left.stream(), right.stream());
        let switched = selector
            .stream()
            .switch_map(move |use_left: bool| if use_left { l.clone() } else { r.clone() });
        let (seen, _sub) = collect(&switched);

        selector.emit(true);
        left.emit("l1");
        right.emit("r1");
        selector.emit(false);
        left.emit("l2");
        right.emit("r2");

        assert_eq!(*seen.borrow(), vec!["l1", "r2"]);
    }

    #[test]
    fn take_ignores_values_reentering_during_the_last_emission() {
        let channel = EventChannel::new();
        let feedback = channel.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = channel.stream().take(1).subscribe(move |v: u8| {
            sink.borrow_mut().push(v);
            if v == 1 {
                feedback.emit(2);
            }
        });

        channel.emit(1);

        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn switch_map_keeps_the_inner_stream_selected_while_subscribing() {
        let selector = EventChannel::new();
        let first = EventChannel::new();
        let second = EventChannel::new();
        let (a, b) = (first.stream(), second.stream());
        let switched = selector.stream().switch_map(move |index: u8| {
            if index == 0 {
                a.start_with("first-start")
            } else {
                b.clone()
            }
        });
        let feedback = selector.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = switched.subscribe(move |v: &'static str| {
            sink.borrow_mut().push(v);
            if v == "first-start" {
                feedback.emit(1);
            }
        });

        selector.emit(0);
        first.emit("first-late");
        second.emit("second-late");

        assert_eq!(*seen.borrow(), vec!["first-start", "second-late"]);
        assert_eq!(first.subscriber_count(), 0);
    }
}
