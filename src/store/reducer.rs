use super::action::Action;
use super::state::StoreState;

/// Folds dispatched actions into the next [`AppStore`](super::AppStore) state.
///
/// `reduce` runs inside `dispatch`, before any listener is told about the
/// change. Listeners only hear about it when the returned state differs from
/// the one passed in.
pub trait StoreReducer {
    type State: StoreState;
    type Action: Action;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
