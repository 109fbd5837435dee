//! Element handles and the imperative effects run against them.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// The host tree's view of one element.
pub trait Element {
    /// Whether `scroll_to` is natively available. When it is not, scrolling
    /// falls back to assigning offsets directly.
    fn supports_scroll_to(&self) -> bool {
        true
    }

    fn scroll_to(&self, options: &ScrollToOptions);

    fn set_scroll_top(&self, top: f64);

    fn set_scroll_left(&self, left: f64);

    fn focus(&self);
}

/// Shared handle to a host element, compared by identity.
#[derive(Clone)]
pub struct ElementHandle(Rc<dyn Element>);

impl ElementHandle {
    pub fn new(element: impl Element + 'static) -> Self {
        Self(Rc::new(element))
    }

    pub fn from_rc(element: Rc<dyn Element>) -> Self {
        Self(element)
    }

    pub fn same(&self, other: &ElementHandle) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl Deref for ElementHandle {
    type Target = dyn Element;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementHandle({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// A scroll the component asks the runtime to perform.
///
/// `element` defaults to the root element of the [`ViewContext`](crate::component::ViewContext).
#[derive(Debug, Clone, Default)]
pub struct ScrollRequest {
    pub element: Option<ElementHandle>,
    pub top: f64,
    pub left: Option<f64>,
    pub behavior: Option<ScrollBehavior>,
}

impl ScrollRequest {
    pub fn to_top(top: f64) -> Self {
        Self {
            top,
            ..Self::default()
        }
    }

    pub fn on(mut self, element: ElementHandle) -> Self {
        self.element = Some(element);
        self
    }

    pub fn left(mut self, left: f64) -> Self {
        self.left = Some(left);
        self
    }

    pub fn behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.behavior = Some(behavior);
        self
    }
}

/// Arguments of a native `scroll_to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollToOptions {
    pub top: f64,
    pub left: Option<f64>,
    pub behavior: ScrollBehavior,
}

/// Performs `request` against its element, or `root` when none is named.
pub fn scroll(request: &ScrollRequest, root: &ElementHandle, default_behavior: ScrollBehavior) {
    let element = request.element.as_ref().unwrap_or(root);
    if !element.supports_scroll_to() {
        element.set_scroll_top(request.top);
        if let Some(left) = request.left {
            element.set_scroll_left(left);
        }
        return;
    }
    element.scroll_to(&ScrollToOptions {
        top: request.top,
        left: request.left,
        behavior: request.behavior.unwrap_or(default_behavior),
    });
}
