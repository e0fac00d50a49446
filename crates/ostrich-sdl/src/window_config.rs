use ostrich_core::VideoSource;

use crate::geometry::{self, Rect, Size};

pub const DEFAULT_SCALE: u32 = 3;

/// Largest accepted scale; keeps the derived window size well inside `u32`.
pub const MAX_SCALE: u32 = 16;

/// Height reserved above the padded content area for the menu bar.
pub const MENU_BAR_RESERVE_PX: u32 = 18;

/// Blank border around the content area, standing in for the bezel around real screens.
pub const PADDING_PX: u32 = 16;

/// Runtime window configuration owned by the frontend.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WindowConfig {
    scale: u32,
    vsync: bool,
    padding_px: u32,
    menu_reserve_px: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            vsync: true,
            padding_px: PADDING_PX,
            menu_reserve_px: MENU_BAR_RESERVE_PX,
        }
    }
}

impl WindowConfig {
    pub fn new(scale: i64, vsync: bool) -> Self {
        let mut cfg = Self {
            vsync,
            ..Self::default()
        };
        cfg.set_scale(scale);
        cfg
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Integer scale of the content area. Values outside `1..=MAX_SCALE` and unchanged
    /// values are ignored; returns whether the scale changed.
    pub fn set_scale(&mut self, scale: i64) -> bool {
        match u32::try_from(scale) {
            Ok(s) if (1..=MAX_SCALE).contains(&s) && s != self.scale => {
                self.scale = s;
                true
            }
            _ => false,
        }
    }

    pub fn vsync(&self) -> bool {
        self.vsync
    }

    pub fn set_vsync(&mut self, enabled: bool) {
        self.vsync = enabled;
    }

    pub fn window_size(&self, screen: &dyn VideoSource) -> Size {
        geometry::window_size(
            screen.native_size(),
            self.scale,
            self.padding_px,
            self.menu_reserve_px,
        )
    }

    pub fn content_area(&self, framebuffer: Size) -> Rect {
        geometry::content_area(framebuffer, self.padding_px, self.menu_reserve_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ostrich_core::video::LcdScreen;

    #[test]
    fn defaults_match_settings_defaults() {
        let cfg = WindowConfig::default();
        assert_eq!(cfg.scale(), 3);
        assert!(cfg.vsync());
        assert_eq!(cfg.window_size(&LcdScreen), Size::new(512, 482));
    }

    #[test]
    fn zero_and_negative_scale_are_ignored() {
        let mut cfg = WindowConfig::default();
        assert!(!cfg.set_scale(0));
        assert!(!cfg.set_scale(-4));
        assert_eq!(cfg.scale(), 3);
    }

    #[test]
    fn same_scale_is_a_no_op() {
        let mut cfg = WindowConfig::default();
        assert!(!cfg.set_scale(3));
        assert!(cfg.set_scale(5));
        assert_eq!(cfg.scale(), 5);
    }

    #[test]
    fn out_of_range_scale_is_ignored() {
        let mut cfg = WindowConfig::default();
        assert!(!cfg.set_scale(i64::from(u32::MAX) + 1));
        assert!(!cfg.set_scale(30_000_000));
        assert!(!cfg.set_scale(i64::from(MAX_SCALE) + 1));
        assert_eq!(cfg.scale(), 3);

        assert!(cfg.set_scale(i64::from(MAX_SCALE)));
        assert_eq!(cfg.scale(), MAX_SCALE);
    }

    #[test]
    fn oversized_stored_scale_falls_back_to_default() {
        let cfg = WindowConfig::new(30_000_000, true);
        assert_eq!(cfg.scale(), DEFAULT_SCALE);
        assert_eq!(cfg.window_size(&LcdScreen), Size::new(512, 482));
    }

    #[test]
    fn new_falls_back_to_default_scale_for_invalid_input() {
        assert_eq!(WindowConfig::new(0, false).scale(), DEFAULT_SCALE);
        assert_eq!(WindowConfig::new(2, false).scale(), 2);
        assert!(!WindowConfig::new(2, false).vsync());
    }
}
