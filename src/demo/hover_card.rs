//! Self-contained hover card: a title that unfolds into hoverable rows.

use std::rc::Rc;

use streamview::adapters::{child_reducer, condition_reducer, Discriminant};
use streamview::{
    lens, ComponentWithState, Effect, ElementHandle, EventChannel, Reducer, RefTracker,
    ScrollRequest, StateSinks, Stream, Transition, ViewContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTag {
    Closed,
    Open,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Panel {
    #[default]
    Closed,
    Open {
        hovered: Option<usize>,
    },
}

impl Discriminant for Panel {
    type Tag = PanelTag;

    fn condition(&self) -> PanelTag {
        match self {
            Panel::Closed => PanelTag::Closed,
            Panel::Open { .. } => PanelTag::Open,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardState {
    pub title: String,
    pub rows: Vec<String>,
    pub panel: Panel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardProps {
    pub title: String,
    pub rows: Vec<String>,
}

pub struct HoverCard {
    pub component: ComponentWithState<CardProps, CardState, String>,
    pub toggles: EventChannel<()>,
    pub hovers: EventChannel<usize>,
    pub anchor: RefTracker<ElementHandle>,
}

pub fn hover_card(ctx: &ViewContext, props: Rc<CardProps>) -> HoverCard {
    let toggles = EventChannel::new();
    let hovers = EventChannel::new();
    let anchor = RefTracker::new();
    let scrolls = EventChannel::new();

    let toggle_events = toggles.clone();
    let hover_events = hovers.clone();
    let anchor_refs = anchor.clone();
    let render = move |state: Stream<CardState>, props: Stream<Rc<CardProps>>| {
        let from_props = props.map(|props: Rc<CardProps>| {
            Reducer::new(move |state: CardState| CardState {
                title: props.title.clone(),
                rows: props.rows.clone(),
                ..state
            })
        });

        // Opening scrolls the page back to the top once the panel is shown.
        let scroll_requests = scrolls.clone();
        let toggling = toggle_events.stream().map(move |()| {
            let scroll_requests = scroll_requests.clone();
            Reducer::with_effect(move |panel: Panel| match panel {
                Panel::Closed => {
                    let scroll_requests = scroll_requests.clone();
                    Transition::with_effect(
                        Panel::Open { hovered: None },
                        Effect::new(move || scroll_requests.emit(ScrollRequest::to_top(0.0))),
                    )
                }
                Panel::Open { .. } => Transition::new(Panel::Closed),
            })
        });
        let hovering = hover_events
            .stream()
            .map(|row: usize| Reducer::new(move |_: Panel| Panel::Open { hovered: Some(row) }));

        let panel = lens!(CardState, panel);
        let reducer = Stream::merge(vec![
            from_props,
            child_reducer(panel.clone(), &toggling),
            child_reducer(panel, &condition_reducer(PanelTag::Open, &hovering)),
        ]);

        let focus = state
            .select(|state: CardState| state.panel.condition() == PanelTag::Open)
            .filter(|open| *open)
            .switch_map(move |_| anchor_refs.stream().take(1));

        StateSinks::new(state.map(|state: CardState| render_card(&state)))
            .with_reducer(reducer)
            .with_scroll(scrolls.stream())
            .with_focus(focus)
    };
    let component = ComponentWithState::new("HoverCard", ctx, CardState::default(), props, render);

    HoverCard {
        component,
        toggles,
        hovers,
        anchor,
    }
}

fn render_card(state: &CardState) -> String {
    match &state.panel {
        Panel::Closed => format!("<card title=\"{}\">[+]</card>", state.title),
        Panel::Open { hovered } => {
            let rows: Vec<String> = state
                .rows
                .iter()
                .enumerate()
                .map(|(index, row)| {
                    if *hovered == Some(index) {
                        format!("<row hovered>{row}</row>")
                    } else {
                        format!("<row>{row}</row>")
                    }
                })
                .collect();
            format!("<card title=\"{}\">{}</card>", state.title, rows.join(""))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::text_element::TextElement;
    use streamview::Component;

    fn props() -> Rc<CardProps> {
        Rc::new(CardProps {
            title: "Revenue".to_string(),
            rows: vec!["Q1".to_string(), "Q2".to_string()],
        })
    }

    #[test]
    fn opening_scrolls_root_and_focuses_anchor() {
        let root = Rc::new(TextElement::new("root", true));
        let anchor = Rc::new(TextElement::new("anchor", true));
        let ctx = ViewContext::new(ElementHandle::from_rc(root.clone()));
        let mut card = hover_card(&ctx, props());
        card.anchor.update(Some(ElementHandle::from_rc(anchor.clone())));

        card.component.mount();
        assert_eq!(
            card.component.render().as_deref(),
            Some("<card title=\"Revenue\">[+]</card>")
        );

        card.toggles.emit(());
        assert_eq!(root.scroll_count(), 1);
        assert!(anchor.is_focused());

        card.hovers.emit(1);
        assert_eq!(
            card.component.render().as_deref(),
            Some("<card title=\"Revenue\"><row>Q1</row><row hovered>Q2</row></card>")
        );
        card.component.unmount();
    }

    #[test]
    fn hovering_a_closed_card_changes_nothing() {
        let ctx = ViewContext::new(ElementHandle::new(TextElement::new("root", false)));
        let mut card = hover_card(&ctx, props());
        card.component.mount();

        card.hovers.emit(0);

        assert_eq!(
            card.component.render().as_deref(),
            Some("<card title=\"Revenue\">[+]</card>")
        );
        card.component.unmount();
    }
}
