use crate::element::{ElementHandle, ScrollRequest};
use crate::reducer::Reducer;
use crate::stream::Stream;

/// Output streams of a store-backed render function.
///
/// Only `output` is required; missing sinks are replaced by an inert stream
/// at mount. A bare `Stream<N>` converts into a bundle holding just the
/// output.
pub struct Sinks<N, A> {
    pub output: Stream<N>,
    pub action: Option<Stream<A>>,
    pub scroll: Option<Stream<ScrollRequest>>,
    pub focus: Option<Stream<ElementHandle>>,
}

impl<N, A> Sinks<N, A> {
    pub fn new(output: Stream<N>) -> Self {
        Self {
            output,
            action: None,
            scroll: None,
            focus: None,
        }
    }

    pub fn with_action(mut self, action: Stream<A>) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_scroll(mut self, scroll: Stream<ScrollRequest>) -> Self {
        self.scroll = Some(scroll);
        self
    }

    pub fn with_focus(mut self, focus: Stream<ElementHandle>) -> Self {
        self.focus = Some(focus);
        self
    }
}

impl<N, A> From<Stream<N>> for Sinks<N, A> {
    fn from(output: Stream<N>) -> Self {
        Self::new(output)
    }
}

/// Output streams of a self-contained render function.
///
/// `reducer` drives the component's local state.
pub struct StateSinks<N, S> {
    pub output: Stream<N>,
    pub reducer: Option<Stream<Reducer<S>>>,
    pub scroll: Option<Stream<ScrollRequest>>,
    pub focus: Option<Stream<ElementHandle>>,
}

impl<N, S> StateSinks<N, S> {
    pub fn new(output: Stream<N>) -> Self {
        Self {
            output,
            reducer: None,
            scroll: None,
            focus: None,
        }
    }

    pub fn with_reducer(mut self, reducer: Stream<Reducer<S>>) -> Self {
        self.reducer = Some(reducer);
        self
    }

    pub fn with_scroll(mut self, scroll: Stream<ScrollRequest>) -> Self {
        self.scroll = Some(scroll);
        self
    }

    pub fn with_focus(mut self, focus: Stream<ElementHandle>) -> Self {
        self.focus = Some(focus);
        self
    }
}

impl<N, S> From<Stream<N>> for StateSinks<N, S> {
    fn from(output: Stream<N>) -> Self {
        Self::new(output)
    }
}
