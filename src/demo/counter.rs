//! Store-backed counter badge.

use std::rc::Rc;

use streamview::store::{Action, StoreReducer, StoreState};
use streamview::{AppStore, ComponentFromStream, EventChannel, Sinks, Stream, ViewContext};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CounterState {
    pub count: i64,
}

impl StoreState for CounterState {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    Increment,
    Decrement,
    Reset,
}

impl Action for CounterAction {}

pub struct CounterReducer;

impl StoreReducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            CounterAction::Increment => CounterState {
                count: state.count + 1,
            },
            CounterAction::Decrement => CounterState {
                count: state.count - 1,
            },
            CounterAction::Reset => CounterState::default(),
        }
    }
}

pub type CounterStore = AppStore<CounterReducer>;

#[derive(Debug, Clone, PartialEq)]
pub struct BadgeProps {
    pub label: String,
}

pub struct CounterBadge {
    pub component: ComponentFromStream<BadgeProps, CounterStore, String>,
    pub clicks: EventChannel<CounterAction>,
}

pub fn counter_badge(
    ctx: &ViewContext,
    store: Rc<CounterStore>,
    props: Rc<BadgeProps>,
) -> CounterBadge {
    let clicks = EventChannel::new();
    let actions = clicks.stream();
    let component = ComponentFromStream::new("CounterBadge", ctx, store, props, |props, state| {
        let count = state.select(|state: CounterState| state.count);
        let output = Stream::combine_latest(props, count).map(
            |(props, count): (Rc<BadgeProps>, i64)| {
                format!("<badge>{}: {}</badge>", props.label, count)
            },
        );
        Sinks::new(output).with_action(actions)
    });
    CounterBadge { component, clicks }
}
