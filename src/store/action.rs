/// Anything a component's action sink can dispatch into an
/// [`AppStore`](super::AppStore).
pub trait Action: 'static {}
