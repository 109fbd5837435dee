//! Store-backed component.

use std::fmt;
use std::rc::Rc;

use super::instance::{report, Instance};
use super::{Component, Lifecycle, Sinks, ViewContext};
use crate::error::ComponentError;
use crate::store::{bridge_store, Store};
use crate::stream::{Observer, Stream};

/// Component whose render function sees its props and the store state.
///
/// The render function runs once, at construction; its sinks are subscribed
/// at [`mount`](Component::mount). Actions from the action sink are
/// dispatched to the store verbatim.
pub struct ComponentFromStream<P, St: Store, N> {
    instance: Instance<P, N>,
    store: Rc<St>,
    sinks: Option<Sinks<N, St::Action>>,
}

impl<P, St, N> ComponentFromStream<P, St, N>
where
    P: 'static,
    St: Store + 'static,
    N: Clone + 'static,
{
    pub fn new<F, R>(
        name: &str,
        ctx: &ViewContext,
        store: Rc<St>,
        props: Rc<P>,
        render: F,
    ) -> Self
    where
        F: FnOnce(Stream<Rc<P>>, Stream<St::State>) -> R,
        R: Into<Sinks<N, St::Action>>,
    {
        let instance = Instance::new(name, ctx, props);
        let sinks = render(instance.props_stream(), bridge_store(Rc::clone(&store))).into();
        Self::assemble(instance, store, sinks)
    }

    /// Like [`new`](Self::new) for render functions that can fail; the
    /// failure is returned and nothing is mounted.
    pub fn try_new<F, R, E>(
        name: &str,
        ctx: &ViewContext,
        store: Rc<St>,
        props: Rc<P>,
        render: F,
    ) -> Result<Self, ComponentError>
    where
        F: FnOnce(Stream<Rc<P>>, Stream<St::State>) -> Result<R, E>,
        R: Into<Sinks<N, St::Action>>,
        E: fmt::Display,
    {
        let instance = Instance::new(name, ctx, props);
        let sinks = render(instance.props_stream(), bridge_store(Rc::clone(&store)))
            .map_err(|err| ComponentError::Render {
                component: name.to_string(),
                reason: err.to_string(),
            })?
            .into();
        Ok(Self::assemble(instance, store, sinks))
    }

    fn assemble(instance: Instance<P, N>, store: Rc<St>, sinks: Sinks<N, St::Action>) -> Self {
        tracing::debug!(
            target: "streamview::component",
            component = %instance.name(),
            "constructed"
        );
        Self {
            instance,
            store,
            sinks: Some(sinks),
        }
    }
}

impl<P, St, N> Component for ComponentFromStream<P, St, N>
where
    P: 'static,
    St: Store + 'static,
    N: Clone + 'static,
{
    type Props = P;
    type Output = N;

    fn mount(&mut self) {
        if !self.instance.can_mount() {
            return;
        }
        let Some(Sinks {
            output,
            action,
            scroll,
            focus,
        }) = self.sinks.take()
        else {
            return;
        };

        self.instance.watch_output(&output);

        let store = Rc::clone(&self.store);
        let dispatching = action.unwrap_or_else(Stream::empty).subscribe_with(
            Observer::new(move |action| store.dispatch(action))
                .on_error(report(self.instance.name(), "action")),
        );
        self.instance.hold(dispatching);

        self.instance.watch_scroll(scroll);
        self.instance.watch_focus(focus);
        self.instance.finish_mount();
    }

    fn update(&mut self, props: Rc<P>) {
        self.instance.update(props);
    }

    fn unmount(&mut self) {
        self.instance.unmount(|| {});
    }

    fn render(&self) -> Option<N> {
        self.instance.render()
    }

    fn lifecycle(&self) -> Lifecycle {
        self.instance.lifecycle()
    }
}
