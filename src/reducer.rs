//! Reducers and the reducer combinator.
//!
//! A [`Reducer`] turns the previous state into the next one and may attach a
//! deferred [`Effect`]. Streams of reducers from different sources (props,
//! hover, ref updates) are merged by [`combine_reducers`] into one running
//! state stream.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::StreamError;
use crate::stream::{relay, Stream};

/// One-shot imperative follow-up of a state transition.
#[must_use]
pub struct Effect(Box<dyn FnOnce()>);

impl Effect {
    pub fn new(run: impl FnOnce() + 'static) -> Self {
        Self(Box::new(run))
    }

    /// Runs `effects` in order as a single effect.
    pub fn batch(effects: impl IntoIterator<Item = Effect>) -> Self {
        let effects: Vec<Effect> = effects.into_iter().collect();
        Self::new(move || effects.into_iter().for_each(Effect::run))
    }

    pub fn run(self) {
        (self.0)()
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Effect")
    }
}

/// Next state plus an optional deferred effect.
#[derive(Debug)]
pub struct Transition<S> {
    pub state: S,
    pub effect: Option<Effect>,
}

impl<S> Transition<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    pub fn with_effect(state: S, effect: Effect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}

type ReduceFn<S> = dyn Fn(S) -> Result<Transition<S>, StreamError>;

/// State transformer: previous state in, [`Transition`] out.
pub struct Reducer<S> {
    reduce: Rc<ReduceFn<S>>,
}

impl<S> Clone for Reducer<S> {
    fn clone(&self) -> Self {
        Self {
            reduce: Rc::clone(&self.reduce),
        }
    }
}

impl<S: 'static> Reducer<S> {
    /// Pure transition without effect.
    pub fn new(reduce: impl Fn(S) -> S + 'static) -> Self {
        Self::from_fn(move |state| Ok(Transition::new(reduce(state))))
    }

    pub fn with_effect(reduce: impl Fn(S) -> Transition<S> + 'static) -> Self {
        Self::from_fn(move |state| Ok(reduce(state)))
    }

    /// Transition that may fail; a failure ends the combined state stream.
    pub fn fallible(reduce: impl Fn(S) -> Result<S, StreamError> + 'static) -> Self {
        Self::from_fn(move |state| reduce(state).map(Transition::new))
    }

    pub fn from_fn(reduce: impl Fn(S) -> Result<Transition<S>, StreamError> + 'static) -> Self {
        Self {
            reduce: Rc::new(reduce),
        }
    }

    pub fn apply(&self, state: S) -> Result<Transition<S>, StreamError> {
        (self.reduce)(state)
    }
}

impl<S> fmt::Debug for Reducer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Reducer")
    }
}

/// Folds every reducer from `sources`, in arrival order, starting at `initial`.
///
/// Each emission is the state right after one reducer. The state is stored
/// and emitted before the reducer's effect runs, so an effect that feeds a
/// new reducer back in observes the state it caused. A failing reducer ends
/// the stream with its error. Every subscription folds independently.
pub fn combine_reducers<S: Clone + 'static>(
    initial: S,
    sources: Vec<Stream<Reducer<S>>>,
) -> Stream<S> {
    let merged = Stream::merge(sources);
    Stream::new(move |down| {
        let state = RefCell::new(initial.clone());
        merged
            .subscribe_with(relay(&down, move |down, reducer: Reducer<S>| {
                let previous = state.borrow().clone();
                match reducer.apply(previous) {
                    Ok(Transition { state: next, effect }) => {
                        *state.borrow_mut() = next.clone();
                        down.next(next);
                        if let Some(effect) = effect {
                            effect.run();
                        }
                    }
                    Err(err) => down.error(err),
                }
            }))
            .into()
    })
}
