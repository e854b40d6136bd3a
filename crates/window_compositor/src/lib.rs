//! # Window Compositor
//!
//! An immediate-mode window registry and compositor that sits between an
//! application and a host rendering surface.
//!
//! ## Features
//!
//! - **Window Registry**: named windows with geometry, cached surfaces and item lists
//! - **Z-Order**: an open list drawn back-to-front, raised by close-then-open
//! - **Compositor**: per-frame blit of every open window plus title-bar chrome
//! - **Vector Glyphs**: the close "X" is a stroked, tessellated path
//! - **Pluggable Backends**: CPU software rasteriser and a recording backend
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use window_compositor::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = WindowManager::new(SoftwareBackend::new(), CompositorSettings::default());
//!
//!     let config = WindowConfig {
//!         title: "Inventory".to_string(),
//!         start_position: V2i::new(40, 40),
//!         start_size: V2i::new(200, 120),
//!         ..WindowConfig::default()
//!     };
//!     manager.add_window("inventory", config)?;
//!     manager.open_window("inventory")?;
//!
//!     let mut frame = SoftwareBackend::new_target(640, 480);
//!     manager.draw_frame(&mut frame);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod backend;
pub mod backends;
pub mod vector;
pub mod window;
pub mod manager;
pub mod compositor;

pub use backend::{BackendError, DrawTrianglesOptions, FillRule, RenderBackend};
pub use config::{CompositorSettings, Config, ConfigError};
pub use manager::{WindowError, WindowInfo, WindowManager, WindowResult};
pub use window::{Color, WindowAction, WindowConfig, WindowFlags, WindowItem};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        backend::{DrawTrianglesOptions, FillRule, RenderBackend},
        backends::{DrawCommand, RecordingBackend, SoftwareBackend},
        config::{CompositorSettings, Config},
        foundation::math::{V2i, Vec2, Vec4},
        manager::{WindowError, WindowInfo, WindowManager, WindowResult},
        vector::{LineCap, LineJoin, Path, StrokeOptions, Vertex},
        window::{Color, WindowAction, WindowConfig, WindowFlags, WindowItem},
    };
}
