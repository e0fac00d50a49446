pub const LCD_WIDTH: u32 = 160;
pub const LCD_HEIGHT: u32 = 144;

/// Video output surface of a machine.
///
/// Presentation-agnostic: the reported size is the exact pixel dimensions of the
/// machine's framebuffer before any scaling, padding or post-processing.
pub trait VideoSource {
    /// Native framebuffer width in pixels.
    fn width(&self) -> u32;

    /// Native framebuffer height in pixels.
    fn height(&self) -> u32;

    fn native_size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}

/// The DMG LCD. Only the resolution is modelled.
#[derive(Debug, Default, Clone, Copy)]
pub struct LcdScreen;

impl VideoSource for LcdScreen {
    fn width(&self) -> u32 {
        LCD_WIDTH
    }

    fn height(&self) -> u32 {
        LCD_HEIGHT
    }
}
