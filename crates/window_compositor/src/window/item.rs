//! Window items
//!
//! Items are opaque payload: the manager stores and replaces them but never
//! lays them out or hit-tests them.

use std::fmt;
use std::sync::Arc;

use super::Color;
use crate::foundation::math::V2i;

/// Action attached to a window item
pub trait WindowAction: Send + Sync {
    /// Run the action
    fn invoke(&self);
}

impl<F> WindowAction for F
where
    F: Fn() + Send + Sync,
{
    fn invoke(&self) {
        self();
    }
}

/// A labelled element inside a window, in window-local coordinates
#[derive(Clone)]
pub struct WindowItem {
    /// Label text
    pub text: String,

    /// Size in pixels
    pub size: V2i,

    /// Position relative to the window's top-left
    pub position: V2i,

    /// Normal color
    pub color: Color,

    /// Color while hovered
    pub hover_color: Color,

    /// Color while activated
    pub action_color: Color,

    /// Callback run when the item is activated
    pub action: Option<Arc<dyn WindowAction>>,
}

impl WindowItem {
    /// Create an item with white text and no action
    pub fn new(text: impl Into<String>, position: V2i, size: V2i) -> Self {
        Self {
            text: text.into(),
            size,
            position,
            color: Color::WHITE,
            hover_color: Color::rgb(200, 200, 200),
            action_color: Color::rgb(128, 128, 255),
            action: None,
        }
    }

    /// Attach an action, builder style
    #[must_use]
    pub fn with_action(mut self, action: impl WindowAction + 'static) -> Self {
        self.action = Some(Arc::new(action));
        self
    }

    /// Run the action if there is one; returns whether anything ran
    pub fn invoke(&self) -> bool {
        self.action.as_ref().map_or(false, |action| {
            action.invoke();
            true
        })
    }
}

impl fmt::Debug for WindowItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowItem")
            .field("text", &self.text)
            .field("size", &self.size)
            .field("position", &self.position)
            .field("color", &self.color)
            .field("hover_color", &self.hover_color)
            .field("action_color", &self.action_color)
            .field("action", &self.action.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_invoke_runs_closure() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let item = WindowItem::new("OK", V2i::new(4, 4), V2i::new(40, 16))
            .with_action(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        assert!(item.invoke());
        assert!(item.clone().invoke());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invoke_without_action() {
        let item = WindowItem::new("label", V2i::zeros(), V2i::new(10, 10));
        assert!(!item.invoke());
        assert!(format!("{item:?}").contains("action: false"));
    }
}
