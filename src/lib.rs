//! Stream-driven components for retained-mode view trees.
//!
//! Render logic is written as functions from input streams (props, store
//! state, local state) to output streams (rendered output, actions, scroll
//! and focus requests, reducers). The runtime in [`component`] wires those
//! streams to the host tree and the store, and releases everything at
//! unmount.
//!
//! Building blocks, leaves first:
//! - [`stream`]: single-threaded push streams and operators
//! - [`channel`]: callbacks into streams
//! - [`ref_tracker`]: latest element reference, replayed to late subscribers
//! - [`reducer`]: reducers, effects and the reducer combinator
//! - [`adapters`]: keyed and conditional reducer lifting
//! - [`store`]: store capability and its stream bridge
//! - [`component`]: the two component variants

pub mod adapters;
pub mod channel;
pub mod component;
pub mod config;
pub mod element;
pub mod error;
pub mod logging;
pub mod reducer;
pub mod ref_tracker;
pub mod store;
pub mod stream;

pub use adapters::{child_reducer, condition_reducer, Discriminant, Lens};
pub use channel::EventChannel;
pub use component::{
    Component, ComponentFromStream, ComponentWithState, Lifecycle, Sinks, StateSinks, ViewContext,
};
pub use element::{Element, ElementHandle, ScrollBehavior, ScrollRequest, ScrollToOptions};
pub use error::{ComponentError, StreamError};
pub use reducer::{combine_reducers, Effect, Reducer, Transition};
pub use ref_tracker::{Identity, RefTracker};
pub use store::{bridge_store, AppStore, Store};
pub use stream::{Observer, Stream, Subscription};
