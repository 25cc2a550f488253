pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod frame;
pub mod gltf_engine;
pub mod math;
pub mod overlay;
pub mod session;
pub mod traits;
pub mod winit_adapter;

pub use error::ViewerError;
pub use gltf_engine::GltfEngine;
pub use overlay::{DragController, WindowBounds, WindowOffset};
pub use session::{Format, Lifecycle, ViewerSession, IBL_INTENSITY};

use std::sync::Once;

static INIT: Once = Once::new();

/// One-time process-wide initialization (currently: installing the logger).
/// Idempotent; every entry point may call it.
pub fn ensure_initialized() {
    INIT.call_once(|| {
        // try_init so embedders that already installed a logger keep theirs
        let _ = env_logger::Builder::from_default_env().try_init();
    });
}
