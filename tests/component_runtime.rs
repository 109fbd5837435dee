mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{context, handle, CounterAction, CounterStore, SpyElement};
use streamview::{
    Component, ComponentError, ComponentFromStream, ComponentWithState, EventChannel, Lifecycle,
    Reducer, ScrollBehavior, ScrollRequest, Sinks, StateSinks, Store, Stream, StreamError,
    ViewContext,
};

struct Label {
    text: String,
}

fn label(text: &str) -> Rc<Label> {
    Rc::new(Label {
        text: text.to_string(),
    })
}

fn tagged(props: Stream<Rc<Label>>) -> Stream<String> {
    props.map(|props: Rc<Label>| format!("<tag>{}</tag>", props.text))
}

/// Mount renders the initial props; new props re-render; the same props do not.
#[test]
fn test_props_drive_rendered_output() {
    let (_root, ctx) = context();
    let redraws = Rc::new(Cell::new(0));
    let counter = Rc::clone(&redraws);
    let ctx = ctx.with_redraw(move || counter.set(counter.get() + 1));
    let store = Rc::new(CounterStore::default());
    let a = label("A");

    let mut component =
        ComponentFromStream::new("tag", &ctx, store, Rc::clone(&a), |props, _state| tagged(props));
    assert_eq!(component.render(), None);
    assert_eq!(component.lifecycle(), Lifecycle::Constructed);

    component.mount();
    assert_eq!(component.render().as_deref(), Some("<tag>A</tag>"));

    component.update(Rc::clone(&a));
    assert_eq!(redraws.get(), 1);

    component.update(label("B"));
    assert_eq!(component.render().as_deref(), Some("<tag>B</tag>"));
    assert_eq!(redraws.get(), 2);
}

/// Every distinct props allocation is pushed exactly once.
#[test]
fn test_props_push_count_matches_distinct_updates() {
    let (_root, ctx) = context();
    let pushes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pushes);
    let first = label("x");
    let second = label("x");

    let mut component = ComponentFromStream::new(
        "counting",
        &ctx,
        Rc::new(CounterStore::default()),
        Rc::clone(&first),
        move |props: Stream<Rc<Label>>, _state| {
            let counter = Rc::clone(&counter);
            props.map(move |props| {
                counter.set(counter.get() + 1);
                props.text.clone()
            })
        },
    );
    component.mount();
    component.update(Rc::clone(&first));
    component.update(Rc::clone(&second));
    component.update(Rc::clone(&second));
    component.update(Rc::clone(&first));

    assert_eq!(pushes.get(), 3);
}

/// Props handed over before mount are the ones the first render sees.
#[test]
fn test_update_before_mount_is_recorded() {
    let (_root, ctx) = context();
    let mut component = ComponentFromStream::new(
        "early",
        &ctx,
        Rc::new(CounterStore::default()),
        label("A"),
        |props, _state| tagged(props),
    );

    component.update(label("B"));
    assert_eq!(component.render(), None);

    component.mount();
    assert_eq!(component.render().as_deref(), Some("<tag>B</tag>"));
}

/// The action sink dispatches to the store and the store state flows back in.
#[test]
fn test_actions_round_trip_through_the_store() {
    let (_root, ctx) = context();
    let store = Rc::new(CounterStore::default());
    let clicks = EventChannel::new();
    let actions = clicks.stream();

    let mut component = ComponentFromStream::new(
        "counter",
        &ctx,
        Rc::clone(&store),
        label("count"),
        move |props: Stream<Rc<Label>>, state| {
            let output = Stream::combine_latest(props, state).map(
                |(props, state): (Rc<Label>, common::Counter)| {
                    format!("{}={}", props.text, state.value)
                },
            );
            Sinks::new(output).with_action(actions)
        },
    );
    component.mount();
    assert_eq!(component.render().as_deref(), Some("count=0"));

    clicks.emit(CounterAction::Add(2));
    clicks.emit(CounterAction::Add(3));

    assert_eq!(store.get_state().value, 5);
    assert_eq!(component.render().as_deref(), Some("count=5"));
}

/// Actions emitted in response to the initial props are dispatched, because
/// every sink is subscribed before the props are pushed.
#[test]
fn test_sinks_are_wired_before_initial_props() {
    let (_root, ctx) = context();
    let store = Rc::new(CounterStore::default());

    let mut component = ComponentFromStream::new(
        "eager",
        &ctx,
        Rc::clone(&store),
        label("boot"),
        |props: Stream<Rc<Label>>, _state| {
            let action = props.map(|_| CounterAction::Set(42));
            Sinks::new(Stream::of(["idle".to_string()])).with_action(action)
        },
    );
    component.mount();

    assert_eq!(store.get_state().value, 42);
}

/// Scroll requests go to the named element, or to the root by default.
#[test]
fn test_scroll_requests_reach_elements() {
    let (root, ctx) = context();
    let legacy = SpyElement::legacy();
    let requests = EventChannel::new();
    let scroll = requests.stream();

    let mut component = ComponentFromStream::new(
        "scroller",
        &ctx,
        Rc::new(CounterStore::default()),
        label("list"),
        move |props, _state| Sinks::new(tagged(props)).with_scroll(scroll),
    );
    component.mount();

    requests.emit(ScrollRequest::to_top(10.0));
    requests.emit(ScrollRequest::to_top(20.0).behavior(ScrollBehavior::Smooth));
    requests.emit(ScrollRequest::to_top(5.0).left(3.0).on(handle(&legacy)));

    assert_eq!(
        root.calls(),
        vec![
            "scroll_to top=10 left=None Auto",
            "scroll_to top=20 left=None Smooth",
        ]
    );
    assert_eq!(legacy.calls(), vec!["scroll_top=5", "scroll_left=3"]);
}

/// The configured default behavior applies when a request leaves it unset.
#[test]
fn test_scroll_uses_configured_default_behavior() {
    let root = SpyElement::native();
    let mut config = streamview::config::RuntimeConfig::default();
    config.scroll.default_behavior = ScrollBehavior::Smooth;
    let ctx = ViewContext::new(handle(&root)).with_config(config);

    let mut component = ComponentFromStream::new(
        "smooth",
        &ctx,
        Rc::new(CounterStore::default()),
        label("list"),
        |props: Stream<Rc<Label>>, _state| {
            let scroll = props.map(|_| ScrollRequest::to_top(0.0));
            Sinks::new(tagged(Stream::never())).with_scroll(scroll)
        },
    );
    component.mount();

    assert_eq!(root.calls(), vec!["scroll_to top=0 left=None Smooth"]);
}

/// After unmount nothing reaches the store, the elements or the output.
#[test]
fn test_unmount_disables_every_effect() {
    let (root, ctx) = context();
    let store = Rc::new(CounterStore::default());
    let target = SpyElement::native();
    let events = EventChannel::new();
    let (output, action, scroll) = (
        events.stream().map(|n: i32| n.to_string()),
        events.stream().map(CounterAction::Set),
        events.stream().map(|n: i32| ScrollRequest::to_top(f64::from(n))),
    );
    let focus_target = handle(&target);
    let focus = events.stream().map(move |_: i32| focus_target.clone());

    let mut component = ComponentFromStream::new(
        "teardown",
        &ctx,
        Rc::clone(&store),
        label("x"),
        move |_props, _state| {
            Sinks::new(output)
                .with_action(action)
                .with_scroll(scroll)
                .with_focus(focus)
        },
    );
    component.mount();
    events.emit(1);
    assert_eq!(component.render().as_deref(), Some("1"));
    assert_eq!(store.get_state().value, 1);

    component.unmount();
    assert_eq!(component.lifecycle(), Lifecycle::Unmounted);
    assert_eq!(events.subscriber_count(), 0);
    assert_eq!(store.listener_count(), 0);

    events.emit(2);
    component.update(label("y"));

    assert_eq!(component.render().as_deref(), Some("1"));
    assert_eq!(store.get_state().value, 1);
    assert_eq!(root.calls().len(), 1);
    assert_eq!(target.calls(), vec!["focus"]);
}

/// A second unmount and a mount after unmount are ignored.
#[test]
fn test_lifecycle_misuse_is_ignored() {
    let (_root, ctx) = context();
    let mut component = ComponentFromStream::new(
        "twice",
        &ctx,
        Rc::new(CounterStore::default()),
        label("A"),
        |props, _state| tagged(props),
    );
    component.mount();
    component.mount();
    assert_eq!(component.render().as_deref(), Some("<tag>A</tag>"));

    component.unmount();
    component.unmount();
    component.mount();

    assert_eq!(component.lifecycle(), Lifecycle::Unmounted);
}

/// Unmounting a component that never mounted leaves it mountable.
#[test]
fn test_unmount_before_mount_is_ignored() {
    let (_root, ctx) = context();
    let mut component = ComponentFromStream::new(
        "unborn",
        &ctx,
        Rc::new(CounterStore::default()),
        label("A"),
        |props, _state| tagged(props),
    );

    component.unmount();
    assert_eq!(component.lifecycle(), Lifecycle::Constructed);

    component.mount();
    assert_eq!(component.render().as_deref(), Some("<tag>A</tag>"));
}

/// A render function that fails yields an error naming the component.
#[test]
fn test_failing_render_function_is_reported() {
    let (_root, ctx) = context();
    let result = ComponentFromStream::try_new(
        "broken",
        &ctx,
        Rc::new(CounterStore::default()),
        label("A"),
        |_props, _state| -> Result<Stream<String>, String> { Err("missing template".to_string()) },
    );

    match result {
        Err(ComponentError::Render { component, reason }) => {
            assert_eq!(component, "broken");
            assert_eq!(reason, "missing template");
        }
        Err(other) => panic!("unexpected error {other:?}"),
        Ok(_) => panic!("render should fail"),
    }
}

/// An erroring sink ends alone; the other sinks keep working.
#[test]
fn test_sink_error_is_isolated() {
    let (_root, ctx) = context();
    let store = Rc::new(CounterStore::default());
    let events = EventChannel::new();
    let output = events.stream().map(|n: i32| n.to_string());
    let action = events.stream().try_map(|n: i32| {
        if n < 0 {
            Err(StreamError::producer("negative"))
        } else {
            Ok(CounterAction::Set(n))
        }
    });

    let mut component = ComponentFromStream::new(
        "partial",
        &ctx,
        Rc::clone(&store),
        label("x"),
        move |_props, _state| Sinks::new(output).with_action(action),
    );
    component.mount();

    events.emit(1);
    events.emit(-1);
    events.emit(7);

    assert_eq!(store.get_state().value, 1);
    assert_eq!(component.render().as_deref(), Some("7"));
}

// -- Self-contained components ------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
struct Toggle {
    title: String,
    open: bool,
}

/// Local state folds props and UI reducers, and renders from the state.
#[test]
fn test_component_with_state_folds_reducers() {
    let (_root, ctx) = context();
    let clicks = EventChannel::new();
    let click_stream = clicks.stream();

    let mut component = ComponentWithState::new(
        "toggle",
        &ctx,
        Toggle::default(),
        label("Menu"),
        move |state: Stream<Toggle>, props: Stream<Rc<Label>>| {
            let from_props = props.map(|props: Rc<Label>| {
                Reducer::new(move |state: Toggle| Toggle {
                    title: props.text.clone(),
                    ..state
                })
            });
            let from_clicks = click_stream.map(|_: ()| {
                Reducer::new(|state: Toggle| Toggle {
                    open: !state.open,
                    ..state
                })
            });
            let output = state.map(|state: Toggle| {
                format!("{} [{}]", state.title, if state.open { "open" } else { "closed" })
            });
            StateSinks::new(output).with_reducer(Stream::merge(vec![from_props, from_clicks]))
        },
    );
    component.mount();
    assert_eq!(component.render().as_deref(), Some("Menu [closed]"));

    clicks.emit(());
    assert_eq!(component.render().as_deref(), Some("Menu [open]"));

    component.update(label("File"));
    assert_eq!(component.render().as_deref(), Some("File [open]"));

    component.unmount();
    clicks.emit(());
    assert_eq!(component.render().as_deref(), Some("File [open]"));
    assert_eq!(clicks.subscriber_count(), 0);
}

/// Without a reducer sink the local state never moves.
#[test]
fn test_component_with_state_without_reducer() {
    let (_root, ctx) = context();

    let mut component = ComponentWithState::new(
        "static",
        &ctx,
        7u8,
        label("A"),
        |state: Stream<u8>, props: Stream<Rc<Label>>| {
            Stream::merge(vec![tagged(props), state.map(|s: u8| s.to_string())])
        },
    );
    component.mount();

    assert_eq!(component.render().as_deref(), Some("<tag>A</tag>"));
}

/// The self-contained variant reports render failures like the store-backed one.
#[test]
fn test_component_with_state_try_new_failure() {
    let (_root, ctx) = context();
    let result = ComponentWithState::try_new(
        "broken",
        &ctx,
        0u8,
        label("A"),
        |_state, _props| -> Result<StateSinks<String, u8>, &'static str> { Err("no view") },
    );

    assert!(matches!(
        result,
        Err(ComponentError::Render { ref reason, .. }) if reason == "no view"
    ));
}
