//! Lifecycle bookkeeping shared by both component variants.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Lifecycle, ViewContext};
use crate::channel::EventChannel;
use crate::element::{self, ElementHandle, ScrollRequest};
use crate::error::StreamError;
use crate::stream::{Observer, Stream, Subscription};

/// Error handler for a sink subscription: the subscription ends, the error
/// goes to the host's log, the other sinks keep running.
pub(crate) fn report(component: &Rc<str>, sink: &'static str) -> impl Fn(StreamError) + 'static {
    let component = Rc::clone(component);
    move |err| {
        let err = StreamError::Sink {
            sink,
            message: err.to_string(),
        };
        tracing::error!(
            target: "streamview::component",
            component = %component,
            error = %err,
            "sink terminated"
        );
    }
}

pub(crate) struct Instance<P, N> {
    name: Rc<str>,
    ctx: ViewContext,
    props: EventChannel<Rc<P>>,
    current: Rc<P>,
    output: Rc<RefCell<Option<N>>>,
    subscriptions: Vec<Subscription>,
    lifecycle: Lifecycle,
}

impl<P: 'static, N: Clone + 'static> Instance<P, N> {
    pub(crate) fn new(name: &str, ctx: &ViewContext, props: Rc<P>) -> Self {
        Self {
            name: Rc::from(name),
            ctx: ctx.clone(),
            props: EventChannel::new(),
            current: props,
            output: Rc::new(RefCell::new(None)),
            subscriptions: Vec::new(),
            lifecycle: Lifecycle::Constructed,
        }
    }

    pub(crate) fn name(&self) -> &Rc<str> {
        &self.name
    }

    pub(crate) fn props_stream(&self) -> Stream<Rc<P>> {
        self.props.stream()
    }

    pub(crate) fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether `mount` may proceed; logs the misuse otherwise.
    pub(crate) fn can_mount(&self) -> bool {
        if self.lifecycle != Lifecycle::Constructed {
            tracing::warn!(
                target: "streamview::component",
                component = %self.name,
                lifecycle = ?self.lifecycle,
                "mount ignored"
            );
            return false;
        }
        true
    }

    pub(crate) fn hold(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub(crate) fn watch_output(&mut self, output: &Stream<N>) {
        let slot = Rc::clone(&self.output);
        let ctx = self.ctx.clone();
        let name = Rc::clone(&self.name);
        let trace = ctx.config().diagnostics.trace_emissions;
        let subscription = output.subscribe_with(
            Observer::new(move |rendered| {
                *slot.borrow_mut() = Some(rendered);
                if trace {
                    tracing::trace!(
                        target: "streamview::component",
                        component = %name,
                        "output retained"
                    );
                }
                ctx.request_redraw();
            })
            .on_error(report(&self.name, "output")),
        );
        self.hold(subscription);
    }

    pub(crate) fn watch_scroll(&mut self, scroll: Option<Stream<ScrollRequest>>) {
        let ctx = self.ctx.clone();
        let subscription = scroll.unwrap_or_else(Stream::empty).subscribe_with(
            Observer::new(move |request: ScrollRequest| {
                element::scroll(&request, ctx.root(), ctx.config().scroll.default_behavior);
            })
            .on_error(report(&self.name, "scroll")),
        );
        self.hold(subscription);
    }

    pub(crate) fn watch_focus(&mut self, focus: Option<Stream<ElementHandle>>) {
        let subscription = focus.unwrap_or_else(Stream::empty).subscribe_with(
            Observer::new(|target: ElementHandle| target.focus())
                .on_error(report(&self.name, "focus")),
        );
        self.hold(subscription);
    }

    /// Marks the instance mounted and pushes the current props, after every
    /// sink is wired.
    pub(crate) fn finish_mount(&mut self) {
        self.lifecycle = Lifecycle::Mounted;
        tracing::debug!(
            target: "streamview::component",
            component = %self.name,
            subscriptions = self.subscriptions.len(),
            "mounted"
        );
        self.props.emit(Rc::clone(&self.current));
    }

    pub(crate) fn update(&mut self, props: Rc<P>) {
        if self.lifecycle == Lifecycle::Unmounted {
            tracing::warn!(
                target: "streamview::component",
                component = %self.name,
                "update after unmount ignored"
            );
            return;
        }
        if Rc::ptr_eq(&self.current, &props) {
            return;
        }
        self.current = props;
        if self.lifecycle == Lifecycle::Mounted {
            self.props.emit(Rc::clone(&self.current));
        }
    }

    /// Completes the props stream, runs `complete_inputs` for variant-owned
    /// streams, then releases every subscription.
    pub(crate) fn unmount(&mut self, complete_inputs: impl FnOnce()) {
        if self.lifecycle != Lifecycle::Mounted {
            tracing::warn!(
                target: "streamview::component",
                component = %self.name,
                lifecycle = ?self.lifecycle,
                "unmount ignored"
            );
            return;
        }
        self.props.complete();
        complete_inputs();
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        self.lifecycle = Lifecycle::Unmounted;
        tracing::debug!(target: "streamview::component", component = %self.name, "unmounted");
    }

    pub(crate) fn render(&self) -> Option<N> {
        self.output.borrow().clone()
    }
}
