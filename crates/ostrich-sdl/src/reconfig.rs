use std::path::PathBuf;

use log::{debug, error, info, warn};
use ostrich_core::{Button, VideoSource};

use crate::host::{Host, HostError};
use crate::window_config::WindowConfig;

/// One-shot intents recorded by the UI during a render pass.
///
/// Cleared before every pass; whatever the user clicked that frame is handed to
/// the app once the pass has finished.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FrameRequests {
    pub pending_scale: Option<u32>,
    pub toggle_vsync: bool,
    pub exit: bool,
    pub open_rom: Option<PathBuf>,
    pub rebind: Option<Button>,
    pub cancel_rebind: bool,
    pub dismiss_notice: bool,
}

impl FrameRequests {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Later requests in the same pass replace earlier ones.
    pub fn request_scale(&mut self, scale: u32) {
        self.pending_scale = Some(scale);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Update,
    Render,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Applied {
    Nothing,
    Rescaled { from: u32, to: u32 },
    /// The host refused the change; the previous scale is still in effect.
    Reverted { requested: u32 },
}

/// Serialises structural window changes against the render loop.
///
/// Scale changes requested while rendering are parked in a single slot and applied by
/// the next update pass, at most one per tick. The window is resized before the UI
/// context is torn down and rebuilt, so only one context exists at any time.
#[derive(Debug, Default)]
pub struct ReconfigController {
    phase: Phase,
    pending_scale: Option<u32>,
    save_requested: bool,
    exit_requested: bool,
}

impl ReconfigController {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn begin_render(&mut self) {
        debug_assert_ne!(self.phase, Phase::Render, "render pass re-entered");
        self.phase = Phase::Render;
    }

    pub fn end_render(&mut self) {
        self.phase = Phase::Idle;
    }

    pub fn request_scale(&mut self, scale: u32) {
        self.pending_scale = Some(scale);
    }

    #[cfg(test)]
    pub fn pending_scale(&self) -> Option<u32> {
        self.pending_scale
    }

    pub fn request_save(&mut self) {
        self.save_requested = true;
    }

    /// Returns whether a save was requested since the last call, clearing the request.
    pub fn take_save_request(&mut self) -> bool {
        std::mem::take(&mut self.save_requested)
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Vsync only flips the swap interval, which is safe outside a structural change.
    pub fn toggle_vsync(&mut self, cfg: &mut WindowConfig, host: &mut dyn Host) {
        let enabled = !cfg.vsync();
        match host.set_vsync(enabled) {
            Ok(()) => {
                cfg.set_vsync(enabled);
                self.save_requested = true;
                debug!("vsync {}", if enabled { "on" } else { "off" });
            }
            Err(e) => warn!("{e}; vsync stays {}", cfg.vsync()),
        }
    }

    /// Update-pass entry point: applies the parked scale change, if any.
    ///
    /// A refused resize reverts to the previous scale and keeps the current UI context.
    /// A failed context rebuild resizes back and rebuilds once more; only if that also
    /// fails is the error returned.
    pub fn apply_pending(
        &mut self,
        cfg: &mut WindowConfig,
        screen: &dyn VideoSource,
        host: &mut dyn Host,
    ) -> Result<Applied, HostError> {
        if self.phase == Phase::Render {
            warn!("structural change attempted during render; deferring");
            return Ok(Applied::Nothing);
        }

        let Some(target) = self.pending_scale.take() else {
            return Ok(Applied::Nothing);
        };

        self.phase = Phase::Update;
        let result = self.rescale(target, cfg, screen, host);
        self.phase = Phase::Idle;
        result
    }

    fn rescale(
        &mut self,
        target: u32,
        cfg: &mut WindowConfig,
        screen: &dyn VideoSource,
        host: &mut dyn Host,
    ) -> Result<Applied, HostError> {
        let previous = cfg.scale();
        if !cfg.set_scale(i64::from(target)) {
            return Ok(Applied::Nothing);
        }

        let size = cfg.window_size(screen);
        if let Err(e) = host.resize_window(size) {
            warn!("{e}; keeping scale {previous}x");
            cfg.set_scale(i64::from(previous));
            return Ok(Applied::Reverted { requested: target });
        }

        if let Err(e) = host.recreate_ui_context() {
            warn!("{e}; restoring scale {previous}x");
            cfg.set_scale(i64::from(previous));
            host.resize_window(cfg.window_size(screen))?;
            host.recreate_ui_context().inspect_err(|e| {
                error!("UI context could not be restored: {e}");
            })?;
            return Ok(Applied::Reverted { requested: target });
        }

        if let Err(e) = host.set_vsync(cfg.vsync()) {
            warn!("{e}");
        }

        self.save_requested = true;
        info!(
            "window scale {previous}x -> {target}x ({}x{})",
            size.width, size.height
        );
        Ok(Applied::Rescaled {
            from: previous,
            to: target,
        })
    }
}
