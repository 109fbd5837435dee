//! Stream-driven components for a retained-mode view tree.
//!
//! A component is built from a render function that receives its input
//! streams and returns a bundle of output streams ([`Sinks`] or
//! [`StateSinks`]). The runtime owns the subscriptions:
//!
//! ```text
//! props ──→ render fn ──→ output ──→ retained output ──→ host redraw
//!  store ──↗        │
//!                   ├──→ action ──→ store.dispatch
//!                   ├──→ scroll ──→ element scroll
//!                   ├──→ focus  ──→ element focus
//!                   └──→ reducer ──→ local state ──↘ (back into render fn)
//! ```
//!
//! Two variants share the lifecycle:
//! - [`ComponentFromStream`]: render fn over (props, store state).
//! - [`ComponentWithState`]: render fn over (local state, props), where local
//!   state is folded from the component's own reducer sink.

mod context;
mod from_stream;
mod instance;
mod sinks;
mod with_state;

use std::rc::Rc;

pub use context::ViewContext;
pub use from_stream::ComponentFromStream;
pub use sinks::{Sinks, StateSinks};
pub use with_state::ComponentWithState;

/// Where an instance is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Sinks captured, nothing subscribed yet.
    Constructed,
    /// Subscriptions live, props flowing.
    Mounted,
    /// Streams completed and subscriptions released. Terminal.
    Unmounted,
}

/// Lifecycle surface the host tree drives.
pub trait Component {
    type Props;
    type Output;

    /// Subscribes every sink, then pushes the current props once.
    fn mount(&mut self);

    /// Pushes `props` unless they are the very same allocation as the
    /// previous props.
    fn update(&mut self, props: Rc<Self::Props>);

    /// Completes the input streams and releases every subscription.
    fn unmount(&mut self);

    /// Latest rendered output, `None` until the first emission.
    fn render(&self) -> Option<Self::Output>;

    fn lifecycle(&self) -> Lifecycle;
}
