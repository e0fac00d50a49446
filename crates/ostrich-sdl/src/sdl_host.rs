use std::time::Instant;

use egui_sdl2_gl::painter::Painter;
use egui_sdl2_gl::{with_sdl2, DpiScaling, EguiStateHandler, ShaderVersion};
use log::debug;
use sdl2::event::Event;
use sdl2::video::{GLContext, GLProfile, SwapInterval, Window};

use crate::geometry::Size;
use crate::host::{Host, HostError};
use crate::window_config::WindowConfig;

const PADDING_COLOR: [f32; 3] = [0.45, 0.55, 0.60];
const CONTENT_COLOR: [f32; 3] = [0.15, 0.15, 0.15];

/// egui state bound to the window at the size it had when this was built.
struct UiContext {
    ctx: egui::Context,
    painter: Painter,
    state: EguiStateHandler,
}

impl UiContext {
    fn new(window: &Window) -> Self {
        let (painter, state) = with_sdl2(window, ShaderVersion::Default, DpiScaling::Default);
        Self {
            ctx: egui::Context::default(),
            painter,
            state,
        }
    }
}

pub struct SdlHost {
    window: Window,
    gl_ctx: GLContext,
    ui: Option<UiContext>,
    start: Instant,
}

impl SdlHost {
    pub fn new(
        video: &sdl2::VideoSubsystem,
        title: &str,
        size: Size,
        vsync: bool,
    ) -> Result<Self, String> {
        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video
            .window(title, size.width, size.height)
            .position_centered()
            .allow_highdpi()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;

        let gl_ctx = window.gl_create_context()?;
        gl::load_with(|name| video.gl_get_proc_address(name) as *const _);

        let ui = UiContext::new(&window);
        let mut host = Self {
            window,
            gl_ctx,
            ui: Some(ui),
            start: Instant::now(),
        };
        host.set_vsync(vsync).map_err(|e| e.to_string())?;
        host.framebuffer_resized();
        Ok(host)
    }

    pub fn process_event(&mut self, event: &Event) {
        if let Some(ui) = self.ui.as_mut() {
            ui.state
                .process_input(&self.window, event.clone(), &mut ui.painter);
        }
    }

    /// Framebuffer-resize phase: keep the GL viewport covering the whole drawable.
    pub fn framebuffer_resized(&mut self) {
        let (w, h) = self.window.drawable_size();
        debug!("framebuffer {w}x{h}");
        unsafe {
            gl::Viewport(0, 0, w as i32, h as i32);
        }
    }

    /// Render phase: clear padding and content area, run the UI, present.
    ///
    /// `draw` may run more than once if egui asks for another pass.
    pub fn render(&mut self, cfg: &WindowConfig, draw: impl FnMut(&egui::Context)) {
        let Some(ui) = self.ui.as_mut() else {
            return;
        };

        let (fb_w, fb_h) = self.window.drawable_size();
        let area = cfg.content_area(Size::new(fb_w, fb_h));
        unsafe {
            gl::Viewport(0, 0, fb_w as i32, fb_h as i32);
            clear(PADDING_COLOR);

            gl::Viewport(area.x, area.y, area.width as i32, area.height as i32);
            gl::Enable(gl::SCISSOR_TEST);
            gl::Scissor(area.x, area.y, area.width as i32, area.height as i32);
            clear(CONTENT_COLOR);
            gl::Disable(gl::SCISSOR_TEST);

            gl::Viewport(0, 0, fb_w as i32, fb_h as i32);
        }

        let raw_input = std::mem::take(&mut ui.state.input);
        let full_output = ui.ctx.run(raw_input, draw);
        ui.state
            .process_output(&self.window, &full_output.platform_output);

        let clipped = ui
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        ui.painter
            .paint_jobs(None, full_output.textures_delta, clipped);
        self.window.gl_swap_window();

        ui.state.input = egui::RawInput {
            screen_rect: Some(ui.painter.screen_rect),
            time: Some(self.start.elapsed().as_secs_f64()),
            ..Default::default()
        };
        ui.state
            .input
            .viewports
            .entry(egui::ViewportId::ROOT)
            .or_default()
            .native_pixels_per_point = Some(ui.painter.pixels_per_point);
    }
}

unsafe fn clear([r, g, b]: [f32; 3]) {
    gl::ClearColor(r, g, b, 1.0);
    gl::Clear(gl::COLOR_BUFFER_BIT);
}

impl Host for SdlHost {
    fn resize_window(&mut self, size: Size) -> Result<(), HostError> {
        self.window
            .set_size(size.width, size.height)
            .map_err(|e| HostError::Resize {
                width: size.width,
                height: size.height,
                reason: e.to_string(),
            })?;
        self.framebuffer_resized();
        Ok(())
    }

    fn recreate_ui_context(&mut self) -> Result<(), HostError> {
        // Old painter releases its GL objects before the new one allocates.
        self.ui = None;
        self.window
            .gl_make_current(&self.gl_ctx)
            .map_err(HostError::UiContext)?;
        self.ui = Some(UiContext::new(&self.window));
        Ok(())
    }

    fn set_vsync(&mut self, enabled: bool) -> Result<(), HostError> {
        let interval = if enabled {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        self.window
            .subsystem()
            .gl_set_swap_interval(interval)
            .map_err(HostError::SwapInterval)
    }
}
