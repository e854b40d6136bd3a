//! Stored state of one window

use crate::backend::RenderBackend;
use crate::foundation::math::V2i;
use crate::window::{WindowConfig, WindowItem};
use super::WindowInfo;

/// A registered window
///
/// Owned exclusively by the registry; the surface lives and dies with it.
#[derive(Debug)]
pub(crate) struct WindowRecord<S> {
    pub id: String,
    pub config: WindowConfig,
    pub position: V2i,
    pub size: V2i,
    pub items: Vec<WindowItem>,
    pub surface: S,
    pub open: bool,
    // Reserved for input routing; the compositor ignores it
    pub focused: bool,
    pub dirty: bool,
}

impl<S> WindowRecord<S> {
    pub fn new(id: String, config: WindowConfig, size: V2i, surface: S) -> Self {
        Self {
            id,
            position: config.start_position,
            config,
            size,
            items: Vec::new(),
            surface,
            open: false,
            focused: false,
            dirty: true,
        }
    }

    pub fn info(&self) -> WindowInfo {
        WindowInfo {
            id: self.id.clone(),
            title: self.config.title.clone(),
            position: self.position,
            size: self.size,
            open: self.open,
            focused: self.focused,
            dirty: self.dirty,
            item_count: self.items.len(),
        }
    }

    /// Refill the cached surface with the configured background
    pub fn regenerate_cache<B>(&mut self, backend: &mut B)
    where
        B: RenderBackend<Surface = S>,
    {
        self.fill_background(backend);
        self.dirty = false;
    }

    /// Background fill only; the dirty flag is left to the caller
    pub fn fill_background<B>(&mut self, backend: &mut B)
    where
        B: RenderBackend<Surface = S>,
    {
        backend.fill(&mut self.surface, self.config.bg_color);
    }
}
