use thiserror::Error;

use crate::geometry::Size;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to resize window to {width}x{height}: {reason}")]
    Resize {
        width: u32,
        height: u32,
        reason: String,
    },
    #[error("failed to set swap interval: {0}")]
    SwapInterval(String),
    #[error("failed to create UI context: {0}")]
    UiContext(String),
}

/// Structural operations on the native window and its UI rendering context.
///
/// These must only run between frames: never from inside a render pass.
pub trait Host {
    fn resize_window(&mut self, size: Size) -> Result<(), HostError>;

    /// Disposes the current UI rendering context and builds a new one bound to the
    /// window at its current size.
    fn recreate_ui_context(&mut self) -> Result<(), HostError>;

    fn set_vsync(&mut self, enabled: bool) -> Result<(), HostError>;
}
