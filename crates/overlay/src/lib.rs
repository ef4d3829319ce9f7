//! Overlay module for RegionSnap
//!
//! Provides the click-through selection overlay, the global pointer hook that
//! drives it, and the selection logic behind both.

#[cfg(windows)]
mod hook;
pub mod keys;
#[cfg(windows)]
pub mod render;
pub mod scene;
pub mod selection;
#[cfg(windows)]
pub mod window;

pub use keys::KeyAction;
pub use scene::{OverlayScene, PointerEvent, PointerOutcome};
pub use selection::{Selection, SelectionState};
#[cfg(windows)]
pub use window::{OverlayHandle, OverlayWindow};

use capture_gdi::Rect;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("Overlay thread error: {0}")]
    Thread(#[from] std::io::Error),

    #[error("Overlay startup failed: {0}")]
    Startup(String),
}

pub type OverlayResult<T> = Result<T, OverlayError>;

/// Receives every rectangle committed by a finished drag.
///
/// Called on the overlay thread, from inside the pointer hook.
pub trait RegionSink: Send + Sync {
    fn commit(&self, rect: Rect);
}
