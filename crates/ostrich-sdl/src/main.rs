mod app;
mod bindings;
mod geometry;
mod host;
mod keyboard;
mod rebind;
mod reconfig;
mod sdl_host;
mod settings;
mod ui;
mod window_config;

use std::path::PathBuf;

use log::{debug, error, info, warn};
use ostrich_core::gameboy::GameBoy;
use sdl2::event::{Event, WindowEvent};
use sdl2::EventPump;

use crate::app::App;
use crate::reconfig::{Applied, FrameRequests};
use crate::sdl_host::SdlHost;
use crate::settings::SettingsStore;
use crate::ui::MenuUi;

const WINDOW_TITLE: &str = "Ostrich";

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let store = match SettingsStore::in_config_dir() {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("{e}; settings will not be persisted");
            None
        }
    };
    let settings = store
        .as_ref()
        .map(SettingsStore::load)
        .unwrap_or_default();
    let mut app = App::new(Box::new(GameBoy::new()), settings, store);

    let sdl = sdl2::init()?;
    let video = sdl.video()?;
    let size = app.window_config().window_size(app.emulator().screen());
    info!(
        "opening {}x{} window at scale {}",
        size.width,
        size.height,
        app.window_config().scale()
    );
    let mut host = SdlHost::new(&video, WINDOW_TITLE, size, app.window_config().vsync())?;
    let mut event_pump = sdl.event_pump()?;

    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        app.open_rom_or_notify(path);
    }

    let result = run(&mut app, &mut host, &mut event_pump);
    app.closing();
    result
}

fn run(app: &mut App, host: &mut SdlHost, event_pump: &mut EventPump) -> Result<(), String> {
    let mut menu = MenuUi::new();
    let mut requests = FrameRequests::default();

    loop {
        for event in event_pump.poll_iter() {
            host.process_event(&event);

            match event {
                Event::Quit { .. } => app.request_exit(),
                Event::KeyDown {
                    keycode: Some(key),
                    ..
                } => app.key_down(key),
                Event::KeyUp {
                    keycode: Some(key),
                    ..
                } => app.key_up(key),
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => host.framebuffer_resized(),
                _ => {}
            }
        }
        if app.exit_requested() {
            break;
        }

        match app.update(host) {
            Ok(Applied::Rescaled { from, to }) => debug!("rescaled {from}x -> {to}x"),
            Ok(Applied::Reverted { requested }) => debug!("scale {requested}x not applied"),
            Ok(Applied::Nothing) => {}
            Err(e) => {
                error!("{e}");
                return Err(e.to_string());
            }
        }

        requests.reset();
        app.begin_render();
        {
            let view = app.view();
            host.render(app.window_config(), |ctx| {
                menu.draw(ctx, &view, &mut requests)
            });
        }
        app.apply_frame_requests(&requests, host);

        if app.exit_requested() {
            break;
        }
    }

    info!("exiting");
    Ok(())
}
