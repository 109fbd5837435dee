use std::cell::Cell;

use streamview::{Element, ScrollToOptions};

/// In-memory element that records scroll offsets and focus.
pub struct TextElement {
    name: &'static str,
    native_scroll: bool,
    scroll_top: Cell<f64>,
    scroll_left: Cell<f64>,
    focused: Cell<bool>,
    scrolls: Cell<usize>,
}

impl TextElement {
    pub fn new(name: &'static str, native_scroll: bool) -> Self {
        Self {
            name,
            native_scroll,
            scroll_top: Cell::new(0.0),
            scroll_left: Cell::new(0.0),
            focused: Cell::new(false),
            scrolls: Cell::new(0),
        }
    }

    pub fn scroll_count(&self) -> usize {
        self.scrolls.get()
    }

    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    pub fn describe(&self) -> String {
        format!(
            "{} scroll=({}, {}) scrolls={} focused={}",
            self.name,
            self.scroll_top.get(),
            self.scroll_left.get(),
            self.scroll_count(),
            self.is_focused()
        )
    }
}

impl Element for TextElement {
    fn supports_scroll_to(&self) -> bool {
        self.native_scroll
    }

    fn scroll_to(&self, options: &ScrollToOptions) {
        tracing::info!(
            element = self.name,
            top = options.top,
            behavior = ?options.behavior,
            "scroll_to"
        );
        self.scrolls.set(self.scrolls.get() + 1);
        self.scroll_top.set(options.top);
        if let Some(left) = options.left {
            self.scroll_left.set(left);
        }
    }

    fn set_scroll_top(&self, top: f64) {
        self.scrolls.set(self.scrolls.get() + 1);
        self.scroll_top.set(top);
    }

    fn set_scroll_left(&self, left: f64) {
        self.scroll_left.set(left);
    }

    fn focus(&self) {
        tracing::info!(element = self.name, "focus");
        self.focused.set(true);
    }
}
