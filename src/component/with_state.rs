//! Self-contained component with local state.

use std::fmt;
use std::rc::Rc;

use super::instance::{report, Instance};
use super::{Component, Lifecycle, StateSinks, ViewContext};
use crate::channel::EventChannel;
use crate::error::ComponentError;
use crate::reducer::combine_reducers;
use crate::stream::{Observer, Stream};

/// Component that owns its state.
///
/// The render function receives the local state stream and the props
/// stream. Its reducer sink is folded from `initial` and every resulting
/// state is fed back into the local state stream. Props usually enter the
/// state through a reducer mapped from the props stream.
pub struct ComponentWithState<P, S, N> {
    instance: Instance<P, N>,
    state: EventChannel<S>,
    initial: Option<S>,
    sinks: Option<StateSinks<N, S>>,
}

impl<P, S, N> ComponentWithState<P, S, N>
where
    P: 'static,
    S: Clone + 'static,
    N: Clone + 'static,
{
    pub fn new<F, R>(name: &str, ctx: &ViewContext, initial: S, props: Rc<P>, render: F) -> Self
    where
        F: FnOnce(Stream<S>, Stream<Rc<P>>) -> R,
        R: Into<StateSinks<N, S>>,
    {
        let instance = Instance::new(name, ctx, props);
        let state = EventChannel::new();
        let sinks = render(state.stream(), instance.props_stream()).into();
        Self::assemble(instance, state, initial, sinks)
    }

    /// Like [`new`](Self::new) for render functions that can fail.
    pub fn try_new<F, R, E>(
        name: &str,
        ctx: &ViewContext,
        initial: S,
        props: Rc<P>,
        render: F,
    ) -> Result<Self, ComponentError>
    where
        F: FnOnce(Stream<S>, Stream<Rc<P>>) -> Result<R, E>,
        R: Into<StateSinks<N, S>>,
        E: fmt::Display,
    {
        let instance = Instance::new(name, ctx, props);
        let state = EventChannel::new();
        let sinks = render(state.stream(), instance.props_stream())
            .map_err(|err| ComponentError::Render {
                component: name.to_string(),
                reason: err.to_string(),
            })?
            .into();
        Ok(Self::assemble(instance, state, initial, sinks))
    }

    fn assemble(
        instance: Instance<P, N>,
        state: EventChannel<S>,
        initial: S,
        sinks: StateSinks<N, S>,
    ) -> Self {
        tracing::debug!(
            target: "streamview::component",
            component = %instance.name(),
            "constructed"
        );
        Self {
            instance,
            state,
            initial: Some(initial),
            sinks: Some(sinks),
        }
    }
}

impl<P, S, N> Component for ComponentWithState<P, S, N>
where
    P: 'static,
    S: Clone + 'static,
    N: Clone + 'static,
{
    type Props = P;
    type Output = N;

    fn mount(&mut self) {
        if !self.instance.can_mount() {
            return;
        }
        let (Some(StateSinks {
            output,
            reducer,
            scroll,
            focus,
        }), Some(initial)) = (self.sinks.take(), self.initial.take())
        else {
            return;
        };

        self.instance.watch_output(&output);
        self.instance.watch_scroll(scroll);
        self.instance.watch_focus(focus);

        let state = self.state.clone();
        let folding = combine_reducers(initial, vec![reducer.unwrap_or_else(Stream::empty)])
            .subscribe_with(
                Observer::new(move |next| state.emit(next))
                    .on_error(report(self.instance.name(), "reducer")),
            );
        self.instance.hold(folding);

        self.instance.finish_mount();
    }

    fn update(&mut self, props: Rc<P>) {
        self.instance.update(props);
    }

    fn unmount(&mut self) {
        let state = self.state.clone();
        self.instance.unmount(move || state.complete());
    }

    fn render(&self) -> Option<N> {
        self.instance.render()
    }

    fn lifecycle(&self) -> Lifecycle {
        self.instance.lifecycle()
    }
}
