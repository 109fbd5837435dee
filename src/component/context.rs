use std::fmt;
use std::rc::Rc;

use crate::config::RuntimeConfig;
use crate::element::ElementHandle;

/// What every component gets from the host at construction.
///
/// Stands in for ambient lookup: the host builds one context at its root
/// and hands clones down explicitly.
#[derive(Clone)]
pub struct ViewContext {
    root: ElementHandle,
    redraw: Rc<dyn Fn()>,
    config: Rc<RuntimeConfig>,
}

impl ViewContext {
    /// Context scrolling `root` by default, with no redraw hook and default
    /// configuration.
    pub fn new(root: ElementHandle) -> Self {
        Self {
            root,
            redraw: Rc::new(|| {}),
            config: Rc::new(RuntimeConfig::default()),
        }
    }

    /// Hook called after each new rendered output is retained.
    pub fn with_redraw(mut self, redraw: impl Fn() + 'static) -> Self {
        self.redraw = Rc::new(redraw);
        self
    }

    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = Rc::new(config);
        self
    }

    /// Fallback target of scroll requests that name no element.
    pub fn root(&self) -> &ElementHandle {
        &self.root
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub(crate) fn request_redraw(&self) {
        (self.redraw)()
    }
}

impl fmt::Debug for ViewContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContext")
            .field("root", &self.root)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
