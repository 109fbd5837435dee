mod demo;

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use streamview::config::RuntimeConfig;
use streamview::logging::init_tracing;
use streamview::{Component, ElementHandle, ViewContext};

use crate::demo::counter::{counter_badge, BadgeProps, CounterAction, CounterStore};
use crate::demo::hover_card::{hover_card, CardProps};
use crate::demo::text_element::TextElement;

/// Drives the demo components through a scripted session and prints every
/// rendered frame.
#[derive(Debug, Parser)]
#[command(name = "streamview-demo", version)]
struct Args {
    /// Config file (default: <config_dir>/streamview/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// How many increments to click on the counter badge.
    #[arg(long, default_value_t = 3)]
    clicks: u32,

    /// Log at debug level regardless of the configured filter.
    #[arg(long)]
    verbose: bool,
}

fn show<C: Component<Output = String>>(step: &str, component: &C) {
    match component.render() {
        Some(frame) => println!("{step:>12} | {frame}"),
        None => println!("{step:>12} | (nothing rendered)"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RuntimeConfig::load_from(path),
        None => RuntimeConfig::load(),
    }
    .context("loading runtime configuration")?;

    let filter = if args.verbose {
        "debug".to_string()
    } else {
        config.diagnostics.log_filter.clone()
    };
    init_tracing(&filter);

    let root = Rc::new(TextElement::new("root", true));
    let anchor = Rc::new(TextElement::new("anchor", false));
    let redraws = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&redraws);
    let ctx = ViewContext::new(ElementHandle::from_rc(root.clone()))
        .with_redraw(move || counter.set(counter.get() + 1))
        .with_config(config);

    let store = Rc::new(CounterStore::default());
    let mut badge = counter_badge(
        &ctx,
        Rc::clone(&store),
        Rc::new(BadgeProps {
            label: "clicks".to_string(),
        }),
    );
    let mut card = hover_card(
        &ctx,
        Rc::new(CardProps {
            title: "Sessions".to_string(),
            rows: vec!["Mobile".to_string(), "Desktop".to_string(), "Tablet".to_string()],
        }),
    );
    card.anchor.update(Some(ElementHandle::from_rc(anchor.clone())));

    badge.component.mount();
    card.component.mount();
    show("mount", &badge.component);
    show("mount", &card.component);

    for _ in 0..args.clicks {
        badge.clicks.emit(CounterAction::Increment);
        show("increment", &badge.component);
    }
    badge.clicks.emit(CounterAction::Decrement);
    show("decrement", &badge.component);

    badge.component.update(Rc::new(BadgeProps {
        label: "total".to_string(),
    }));
    show("relabel", &badge.component);

    card.hovers.emit(0);
    show("hover closed", &card.component);
    card.toggles.emit(());
    show("open", &card.component);
    card.hovers.emit(1);
    show("hover", &card.component);
    card.toggles.emit(());
    show("close", &card.component);

    badge.clicks.emit(CounterAction::Reset);
    show("reset", &badge.component);

    badge.component.unmount();
    card.component.unmount();

    println!("{}", root.describe());
    println!("{}", anchor.describe());
    println!("redraws: {}", redraws.get());
    Ok(())
}
