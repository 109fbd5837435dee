//! Lifting reducers written for part of a state into reducers over the whole.
//!
//! - [`child_reducer`]: the reducer owns one field of the parent, reached
//!   through a [`Lens`].
//! - [`condition_reducer`]: the reducer only applies while the parent state
//!   carries a given tag; otherwise it is the identity.
//!
//! Both are pure rewrites of reducer values.

use std::rc::Rc;

use crate::reducer::{Reducer, Transition};
use crate::stream::Stream;

/// Read/replace access to one slice `R` of a parent `P`.
pub struct Lens<P, R> {
    get: Rc<dyn Fn(&P) -> R>,
    set: Rc<dyn Fn(P, R) -> P>,
}

impl<P, R> Clone for Lens<P, R> {
    fn clone(&self) -> Self {
        Self {
            get: Rc::clone(&self.get),
            set: Rc::clone(&self.set),
        }
    }
}

impl<P, R> Lens<P, R> {
    pub fn new(get: impl Fn(&P) -> R + 'static, set: impl Fn(P, R) -> P + 'static) -> Self {
        Self {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    pub fn get(&self, parent: &P) -> R {
        (self.get)(parent)
    }

    pub fn set(&self, parent: P, child: R) -> P {
        (self.set)(parent, child)
    }
}

/// Builds a [`Lens`] onto a named field: `lens!(Parent, count)`.
#[macro_export]
macro_rules! lens {
    ($parent:ty, $field:ident) => {
        $crate::adapters::Lens::new(
            |parent: &$parent| parent.$field.clone(),
            |mut parent: $parent, child| {
                parent.$field = child;
                parent
            },
        )
    };
}

/// Lifts reducers over a child slice into reducers over the parent.
///
/// Only the slice behind `lens` is replaced; the rest of the parent is passed
/// through and any effect is kept as is.
pub fn child_reducer<P: 'static, R: 'static>(
    lens: Lens<P, R>,
    reducers: &Stream<Reducer<R>>,
) -> Stream<Reducer<P>> {
    reducers.map(move |reducer: Reducer<R>| {
        let lens = lens.clone();
        Reducer::from_fn(move |parent: P| {
            let child = lens.get(&parent);
            let Transition { state, effect } = reducer.apply(child)?;
            Ok(Transition {
                state: lens.set(parent, state),
                effect,
            })
        })
    })
}

/// State shapes that carry a discriminant tag.
pub trait Discriminant {
    type Tag: PartialEq;

    fn condition(&self) -> Self::Tag;
}

/// Lifts reducers meant for one variant of `S` into reducers over all of `S`.
///
/// When the current state's tag differs from `tag`, the lifted reducer leaves
/// the state untouched and runs no effect.
pub fn condition_reducer<S>(tag: S::Tag, reducers: &Stream<Reducer<S>>) -> Stream<Reducer<S>>
where
    S: Discriminant + 'static,
    S::Tag: Clone + 'static,
{
    reducers.map(move |reducer: Reducer<S>| {
        let tag = tag.clone();
        Reducer::from_fn(move |state: S| {
            if state.condition() == tag {
                reducer.apply(state)
            } else {
                Ok(Transition::new(state))
            }
        })
    })
}
