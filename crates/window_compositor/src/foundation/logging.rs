//! Logging utilities

pub use log::{debug, info, warn, error, trace};

/// Initialize logging for tests, ignoring repeated initialization
pub fn try_init() {
    let _ = env_logger::builder().is_test(true).try_init();
}
