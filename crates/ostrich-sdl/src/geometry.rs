/// Width × height in physical pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Rectangle in framebuffer coordinates, bottom-left origin as glViewport/glScissor expect.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Full window size for a native resolution at an integer scale, including the padding
/// around the content area and the menu bar reserved above it. Saturates at `u32::MAX`.
pub fn window_size(native: (u32, u32), scale: u32, padding: u32, menu_reserve: u32) -> Size {
    let (w, h) = native;
    let border = padding.saturating_mul(2);
    Size::new(
        w.saturating_mul(scale).saturating_add(border),
        h.saturating_mul(scale)
            .saturating_add(border)
            .saturating_add(menu_reserve),
    )
}

/// Area the emulated video is drawn into. Clamps to zero when the framebuffer is
/// smaller than the padding and menu reserve.
pub fn content_area(framebuffer: Size, padding: u32, menu_reserve: u32) -> Rect {
    Rect {
        x: padding as i32,
        y: padding as i32,
        width: framebuffer.width.saturating_sub(padding.saturating_mul(2)),
        height: framebuffer
            .height
            .saturating_sub(padding.saturating_mul(2))
            .saturating_sub(menu_reserve),
    }
}
