//! Window Manager
//!
//! Registry of named windows plus the open list that fixes their draw order.
//! Every operation, including [`WindowManager::draw_frame`], runs under one
//! lock, so each is atomic with respect to all the others.

pub(crate) mod record;


use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, trace};
use thiserror::Error;

use crate::backend::{BackendError, RenderBackend};
use crate::compositor;
use crate::config::CompositorSettings;
use crate::foundation::math::V2i;
use crate::window::{WindowConfig, WindowItem};
use record::WindowRecord;

/// Errors returned by window operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// No window is registered under this id
    #[error("unable to find window '{0}'")]
    NotFound(String),

    /// The backend could not allocate the window's draw cache
    #[error("unable to create draw cache for window '{id}'")]
    SurfaceAllocation {
        /// Window id
        id: String,
        /// Backend failure
        #[source]
        source: BackendError,
    },

    /// The window exists but has no item at this index
    #[error("window '{id}' has no item at index {index}")]
    ItemNotFound {
        /// Window id
        id: String,
        /// Requested index
        index: usize,
    },
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Snapshot of a window's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Window id
    pub id: String,
    /// Configured title
    pub title: String,
    /// Top-left position
    pub position: V2i,
    /// Outer size, title bar included
    pub size: V2i,
    /// In the open list
    pub open: bool,
    /// Focus flag (not acted upon by the compositor)
    pub focused: bool,
    /// Cached surface is stale
    pub dirty: bool,
    /// Number of items
    pub item_count: usize,
}

/// Everything guarded by the manager's lock
struct WindowState<B: RenderBackend> {
    backend: B,
    windows: HashMap<String, WindowRecord<B::Surface>>,
    /// Ids of open windows, back to front
    open: Vec<String>,
}

impl<B: RenderBackend> WindowState<B> {
    fn record_mut(&mut self, id: &str) -> WindowResult<&mut WindowRecord<B::Surface>> {
        self.windows
            .get_mut(id)
            .ok_or_else(|| WindowError::NotFound(id.to_string()))
    }

    fn remove_from_open_list(&mut self, id: &str) {
        self.open.retain(|open_id| open_id != id);
    }
}

/// Central window registry and compositor
///
/// Owns the render backend so window surfaces can be allocated and drawn
/// under the same lock as the registry.
pub struct WindowManager<B: RenderBackend> {
    settings: CompositorSettings,
    state: Mutex<WindowState<B>>,
}

impl<B: RenderBackend> WindowManager<B> {
    /// Create a manager drawing through `backend`
    pub fn new(backend: B, settings: CompositorSettings) -> Self {
        Self {
            settings,
            state: Mutex::new(WindowState {
                backend,
                windows: HashMap::new(),
                open: Vec::new(),
            }),
        }
    }

    /// Compositor settings
    pub const fn settings(&self) -> &CompositorSettings {
        &self.settings
    }

    // A caller closure that panics under the lock leaves every record in a
    // consistent state (at worst dirty), so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, WindowState<B>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a window, replacing any window with the same id
    ///
    /// The window's size is its configured start size plus the title-bar
    /// height when it has a title bar. It starts closed and dirty. A replaced
    /// window is dropped from the open list.
    ///
    /// # Errors
    /// [`WindowError::SurfaceAllocation`] when the backend rejects the size;
    /// the registry is left untouched.
    pub fn add_window(&self, id: impl Into<String>, config: WindowConfig) -> WindowResult<()> {
        let id = id.into();
        let size = config.window_size(self.settings.title_bar_height);

        let mut state = self.lock();
        let mut surface = state
            .backend
            .create_surface(size)
            .map_err(|source| WindowError::SurfaceAllocation { id: id.clone(), source })?;
        state.backend.fill(&mut surface, config.bg_color);

        let record = WindowRecord::new(id.clone(), config, size, surface);
        if state.windows.insert(id.clone(), record).is_some() {
            state.remove_from_open_list(&id);
            debug!("Replaced window '{}' ({}x{})", id, size.x, size.y);
        } else {
            debug!("Added window '{}' ({}x{})", id, size.x, size.y);
        }
        Ok(())
    }

    /// Remove a window and its cached surface
    ///
    /// # Errors
    /// [`WindowError::NotFound`] for unknown ids.
    pub fn delete_window(&self, id: &str) -> WindowResult<()> {
        let mut state = self.lock();
        if state.windows.remove(id).is_none() {
            return Err(WindowError::NotFound(id.to_string()));
        }
        state.remove_from_open_list(id);
        debug!("Deleted window '{}'", id);
        Ok(())
    }

    /// Replace a window's configuration and mark it dirty
    ///
    /// Position, size and the cached surface are left as they are.
    ///
    /// # Errors
    /// [`WindowError::NotFound`] for unknown ids.
    pub fn update_window(&self, id: &str, config: WindowConfig) -> WindowResult<()> {
        let mut state = self.lock();
        let record = state.record_mut(id)?;
        record.config = config;
        record.dirty = true;
        trace!("Updated config of window '{}'", id);
        Ok(())
    }

    /// Replace a window's items and mark it dirty
    ///
    /// # Errors
    /// [`WindowError::NotFound`] for unknown ids.
    pub fn update_window_items(&self, id: &str, items: Vec<WindowItem>) -> WindowResult<()> {
        let mut state = self.lock();
        let record = state.record_mut(id)?;
        record.items = items;
        record.dirty = true;
        trace!("Updated items of window '{}' ({} items)", id, record.items.len());
        Ok(())
    }

    /// Show a window on top of every other open window
    ///
    /// Opening an open window does nothing.
    ///
    /// # Errors
    /// [`WindowError::NotFound`] for unknown ids.
    pub fn open_window(&self, id: &str) -> WindowResult<()> {
        let mut state = self.lock();
        let record = state.record_mut(id)?;
        if record.open {
            return Ok(());
        }
        record.open = true;
        if !state.open.iter().any(|open_id| open_id == id) {
            state.open.push(id.to_string());
        }
        debug!("Opened window '{}'", id);
        Ok(())
    }

    /// Hide a window
    ///
    /// Closing a closed window does nothing.
    ///
    /// # Errors
    /// [`WindowError::NotFound`] for unknown ids.
    pub fn close_window(&self, id: &str) -> WindowResult<()> {
        let mut state = self.lock();
        let record = state.record_mut(id)?;
        if !record.open {
            return Ok(());
        }
        record.open = false;
        state.remove_from_open_list(id);
        debug!("Closed window '{}'", id);
        Ok(())
    }

    /// Composite every open window onto `target`, back to front
    ///
    /// Dirty windows have their cache regenerated first. Never fails.
    pub fn draw_frame(&self, target: &mut B::Surface) {
        let mut guard = self.lock();
        let WindowState { backend, windows, open } = &mut *guard;

        for id in open.iter() {
            let Some(record) = windows.get_mut(id) else {
                continue;
            };
            if record.dirty {
                record.regenerate_cache(backend);
                trace!("Regenerated cache of window '{}'", id);
            }
            compositor::composite_window(backend, target, record, &self.settings);
        }
        trace!("Composited {} windows", open.len());
    }

    /// Regenerate a window's cache and let `painter` draw its content
    ///
    /// The surface is refilled with the background color before `painter`
    /// runs, and the window is no longer dirty afterwards. The painter runs
    /// under the manager's lock and must not call back into the manager.
    ///
    /// # Errors
    /// [`WindowError::NotFound`] for unknown ids.
    pub fn redraw_window<F>(&self, id: &str, painter: F) -> WindowResult<()>
    where
        F: FnOnce(&mut B, &mut B::Surface, &[WindowItem]),
    {
        let mut guard = self.lock();
        let WindowState { backend, windows, .. } = &mut *guard;
        let record = windows
            .get_mut(id)
            .ok_or_else(|| WindowError::NotFound(id.to_string()))?;

        // Stays dirty until the painter returns, so a panicking painter
        // leaves the cache to be regenerated by the next frame.
        record.dirty = true;
        record.fill_background(backend);
        painter(backend, &mut record.surface, &record.items);
        record.dirty = false;
        trace!("Redrew window '{}'", id);
        Ok(())
    }

    /// Run the action of item `index` in window `id`
    ///
    /// The action runs after the lock is released, so it may call back into
    /// the manager. Returns whether the item had an action.
    ///
    /// # Errors
    /// [`WindowError::NotFound`] for unknown ids and
    /// [`WindowError::ItemNotFound`] for out-of-range indices.
    pub fn invoke_item_action(&self, id: &str, index: usize) -> WindowResult<bool> {
        let action = {
            let mut state = self.lock();
            let record = state.record_mut(id)?;
            let item = record.items.get(index).ok_or_else(|| WindowError::ItemNotFound {
                id: id.to_string(),
                index,
            })?;
            item.action.clone()
        };

        Ok(action.map_or(false, |action| {
            action.invoke();
            true
        }))
    }

    /// Snapshot of one window
    pub fn window(&self, id: &str) -> Option<WindowInfo> {
        self.lock().windows.get(id).map(WindowRecord::info)
    }

    /// Whether a window is registered
    pub fn contains(&self, id: &str) -> bool {
        self.lock().windows.contains_key(id)
    }

    /// Number of registered windows
    pub fn len(&self) -> usize {
        self.lock().windows.len()
    }

    /// Whether no windows are registered
    pub fn is_empty(&self) -> bool {
        self.lock().windows.is_empty()
    }

    /// Ids of open windows in draw order, back to front
    pub fn open_windows(&self) -> Vec<String> {
        self.lock().open.clone()
    }

    /// Ids of all registered windows, sorted
    pub fn window_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.lock().windows.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Run `f` with exclusive access to the backend
    pub fn with_backend<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(&mut self.lock().backend)
    }
}

impl<B: RenderBackend + Default> Default for WindowManager<B> {
    fn default() -> Self {
        Self::new(B::default(), CompositorSettings::default())
    }
}
