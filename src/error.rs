//! Error types shared by streams and components.

use thiserror::Error;

/// Error carried on a stream's error channel.
///
/// Once delivered, the subscription that observed it is closed; nothing
/// upstream is restarted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// A reducer refused to produce a next state.
    #[error("reducer failed: {message}")]
    Reducer { message: String },

    /// A producer (event source, store bridge, custom stream) failed.
    #[error("stream producer failed: {message}")]
    Producer { message: String },

    /// A component sink failed while being consumed.
    #[error("sink '{sink}' failed: {message}")]
    Sink { sink: &'static str, message: String },
}

impl StreamError {
    pub fn reducer(message: impl Into<String>) -> Self {
        StreamError::Reducer {
            message: message.into(),
        }
    }

    pub fn producer(message: impl Into<String>) -> Self {
        StreamError::Producer {
            message: message.into(),
        }
    }
}

/// Errors raised while building a component.
#[derive(Debug, Error)]
pub enum ComponentError {
    /// The render function failed while producing its sinks. The instance
    /// never mounts.
    #[error("component '{component}' failed to render its sinks: {reason}")]
    Render { component: String, reason: String },
}
