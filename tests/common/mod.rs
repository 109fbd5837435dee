//! Shared test utilities: spy elements, a counter store, output recorders.

#![allow(dead_code, unused_imports)]

use std::cell::RefCell;
use std::rc::Rc;

use streamview::store::{Action, StoreReducer, StoreState};
use streamview::{
    AppStore, Element, ElementHandle, ScrollToOptions, Stream, Subscription, ViewContext,
};

/// Element that records every call made on it.
#[derive(Default)]
pub struct SpyElement {
    pub native_scroll: bool,
    pub calls: RefCell<Vec<String>>,
}

impl SpyElement {
    pub fn native() -> Rc<Self> {
        Rc::new(Self {
            native_scroll: true,
            ..Self::default()
        })
    }

    pub fn legacy() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Element for SpyElement {
    fn supports_scroll_to(&self) -> bool {
        self.native_scroll
    }

    fn scroll_to(&self, options: &ScrollToOptions) {
        self.calls.borrow_mut().push(format!(
            "scroll_to top={} left={:?} {:?}",
            options.top, options.left, options.behavior
        ));
    }

    fn set_scroll_top(&self, top: f64) {
        self.calls.borrow_mut().push(format!("scroll_top={top}"));
    }

    fn set_scroll_left(&self, left: f64) {
        self.calls.borrow_mut().push(format!("scroll_left={left}"));
    }

    fn focus(&self) {
        self.calls.borrow_mut().push("focus".to_string());
    }
}

pub fn handle(element: &Rc<SpyElement>) -> ElementHandle {
    ElementHandle::from_rc(element.clone())
}

/// Context rooted at a fresh native spy element.
pub fn context() -> (Rc<SpyElement>, ViewContext) {
    let root = SpyElement::native();
    let ctx = ViewContext::new(handle(&root));
    (root, ctx)
}

/// Subscribes and records every value.
pub fn record<T: 'static>(stream: &Stream<T>) -> (Rc<RefCell<Vec<T>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = stream.subscribe(move |value| sink.borrow_mut().push(value));
    (seen, subscription)
}

// -- Counter store ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Counter {
    pub value: i32,
}

impl StoreState for Counter {}

#[derive(Debug, Clone, PartialEq)]
pub enum CounterAction {
    Add(i32),
    Set(i32),
}

impl Action for CounterAction {}

pub struct CounterReducer;

impl StoreReducer for CounterReducer {
    type State = Counter;
    type Action = CounterAction;

    fn reduce(state: Counter, action: CounterAction) -> Counter {
        match action {
            CounterAction::Add(n) => Counter {
                value: state.value + n,
            },
            CounterAction::Set(value) => Counter { value },
        }
    }
}

pub type CounterStore = AppStore<CounterReducer>;
