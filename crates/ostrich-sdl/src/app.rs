use std::path::{Path, PathBuf};

use log::{info, warn};
use ostrich_core::{Button, Emulator, InputState, RomLoadError};
use sdl2::keyboard::Keycode;
use thiserror::Error;

use crate::bindings::BindingMap;
use crate::host::{Host, HostError};
use crate::keyboard::KeyboardBridge;
use crate::rebind::RebindSession;
use crate::reconfig::{Applied, FrameRequests, ReconfigController};
use crate::settings::{Settings, SettingsStore};
use crate::window_config::WindowConfig;

#[derive(Debug, Error)]
pub enum RomOpenError {
    #[error("failed to read ROM {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid ROM: {0}")]
    Rejected(#[from] RomLoadError),
}

/// Read-only snapshot handed to the UI layer while it draws.
pub struct UiView<'a> {
    pub scale: u32,
    pub vsync: bool,
    pub bindings: &'a BindingMap,
    pub awaiting_key: Option<Button>,
    pub input: &'a dyn InputState,
    pub rom_title: Option<String>,
    pub rom_directory: Option<&'a Path>,
    pub notice: Option<&'a str>,
}

/// Everything the frontend owns, threaded explicitly through each loop phase.
pub struct App {
    emulator: Box<dyn Emulator>,
    window: WindowConfig,
    bindings: BindingMap,
    keyboard: KeyboardBridge,
    rebind: RebindSession,
    controller: ReconfigController,
    settings: Settings,
    store: Option<SettingsStore>,
    notice: Option<String>,
}

impl App {
    pub fn new(
        emulator: Box<dyn Emulator>,
        settings: Settings,
        store: Option<SettingsStore>,
    ) -> Self {
        let window = WindowConfig::new(settings.window.scale, settings.window.vsync_enabled);
        let bindings = BindingMap::from_names(&settings.input.button_to_key);
        Self {
            emulator,
            window,
            bindings,
            keyboard: KeyboardBridge::new(),
            rebind: RebindSession::new(),
            controller: ReconfigController::new(),
            settings,
            store,
            notice: None,
        }
    }

    pub fn emulator(&self) -> &dyn Emulator {
        self.emulator.as_ref()
    }

    pub fn window_config(&self) -> &WindowConfig {
        &self.window
    }

    #[cfg(test)]
    pub fn bindings(&self) -> &BindingMap {
        &self.bindings
    }

    #[cfg(test)]
    pub fn rebind(&self) -> &RebindSession {
        &self.rebind
    }

    #[cfg(test)]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[cfg(test)]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn exit_requested(&self) -> bool {
        self.controller.exit_requested()
    }

    pub fn request_exit(&mut self) {
        self.controller.request_exit();
    }

    pub fn key_down(&mut self, key: Keycode) {
        self.keyboard.key_down(key, &self.bindings, self.emulator.input());
    }

    pub fn key_up(&mut self, key: Keycode) {
        self.keyboard.key_up(key, &self.bindings, self.emulator.input());
    }

    /// Update phase: commit a captured rebind, apply the parked structural change and
    /// persist settings if anything asked for it.
    pub fn update(&mut self, host: &mut dyn Host) -> Result<Applied, HostError> {
        if self
            .rebind
            .poll(&mut self.keyboard, &mut self.bindings)
            .is_some()
        {
            self.controller.request_save();
        }

        let applied = self
            .controller
            .apply_pending(&mut self.window, self.emulator.screen(), host)?;

        if self.controller.take_save_request() {
            self.save_settings();
        }
        Ok(applied)
    }

    /// Marks the start of a render pass. Nothing structural may happen until
    /// [`apply_frame_requests`](Self::apply_frame_requests).
    pub fn begin_render(&mut self) {
        self.controller.begin_render();
    }

    pub fn view(&self) -> UiView<'_> {
        UiView {
            scale: self.window.scale(),
            vsync: self.window.vsync(),
            bindings: &self.bindings,
            awaiting_key: self.rebind.awaiting(),
            input: self.emulator.input_state(),
            rom_title: self.emulator.rom().map(|rom| rom.title()),
            rom_directory: self.settings.rom_directory.as_deref(),
            notice: self.notice.as_deref(),
        }
    }

    /// End of the render pass: route what the UI recorded. Scale changes are only
    /// parked here; the next [`update`](Self::update) applies them.
    pub fn apply_frame_requests(&mut self, requests: &FrameRequests, host: &mut dyn Host) {
        self.controller.end_render();

        if requests.exit {
            self.controller.request_exit();
        }
        if let Some(scale) = requests.pending_scale {
            self.controller.request_scale(scale);
        }
        if requests.toggle_vsync {
            self.controller.toggle_vsync(&mut self.window, host);
        }
        if requests.cancel_rebind {
            self.rebind.cancel(&mut self.keyboard);
        }
        if let Some(button) = requests.rebind {
            self.rebind.begin(button, &mut self.keyboard);
        }
        if requests.dismiss_notice {
            self.notice = None;
        }
        if let Some(path) = &requests.open_rom {
            self.open_rom_or_notify(path.clone());
        }
    }

    /// Like [`open_rom`](Self::open_rom), but a failure becomes a user-facing notice.
    pub fn open_rom_or_notify(&mut self, path: PathBuf) {
        if let Err(e) = self.open_rom(path) {
            warn!("{e}");
            self.notice = Some(e.to_string());
        }
    }

    pub fn open_rom(&mut self, path: PathBuf) -> Result<(), RomOpenError> {
        let bytes = std::fs::read(&path).map_err(|source| RomOpenError::Read {
            path: path.clone(),
            source,
        })?;
        let dir = path.parent().map(Path::to_path_buf);

        self.emulator.load_rom(bytes, path.clone())?;
        info!("loaded {}", path.display());

        if let Some(dir) = dir.filter(|d| !d.as_os_str().is_empty()) {
            if self.settings.rom_directory.as_ref() != Some(&dir) {
                self.settings.rom_directory = Some(dir);
                self.controller.request_save();
            }
        }
        self.notice = None;
        Ok(())
    }

    /// Closing phase.
    pub fn closing(&mut self) {
        self.save_settings();
    }

    fn sync_settings(&mut self) {
        self.settings.window.scale = i64::from(self.window.scale());
        self.settings.window.vsync_enabled = self.window.vsync();
        self.settings.input.button_to_key = self.bindings.to_names();
    }

    fn save_settings(&mut self) {
        self.sync_settings();
        let Some(store) = &self.store else {
            return;
        };
        match store.save(&self.settings) {
            Ok(()) => info!("saved settings to {}", store.path().display()),
            Err(e) => warn!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::RecordingHost;
    use ostrich_core::gameboy::GameBoy;
    use ostrich_core::MIN_ROM_LEN;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ostrich_app_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn app_with_store(dir: &Path) -> App {
        let store = SettingsStore::new(dir.join("config.toml"));
        App::new(Box::new(GameBoy::new()), store.load(), Some(store))
    }

    fn render_pass(
        app: &mut App,
        host: &mut RecordingHost,
        draw: impl FnOnce(&mut FrameRequests),
    ) {
        let mut requests = FrameRequests::default();
        app.begin_render();
        draw(&mut requests);
        app.apply_frame_requests(&requests, host);
    }

    #[test]
    fn settings_seed_runtime_state() {
        let mut settings = Settings::default();
        settings.window.scale = -2;
        settings.window.vsync_enabled = false;
        settings
            .input
            .button_to_key
            .insert("Start".to_string(), "Space".to_string());

        let app = App::new(Box::new(GameBoy::new()), settings, None);

        assert_eq!(app.window_config().scale(), 3);
        assert!(!app.window_config().vsync());
        assert_eq!(app.bindings().key(Button::Start), Keycode::Space);
    }

    #[test]
    fn keys_reach_the_machine_through_bindings() {
        let mut app = App::new(Box::new(GameBoy::new()), Settings::default(), None);

        app.key_down(Keycode::Return);
        assert!(app.view().input.is_pressed(Button::Start));
        app.key_up(Keycode::Return);
        assert!(!app.view().input.is_pressed(Button::Start));
    }

    #[test]
    fn scale_requested_while_rendering_applies_on_next_update() {
        let mut app = App::new(Box::new(GameBoy::new()), Settings::default(), None);
        let mut host = RecordingHost::default();

        render_pass(&mut app, &mut host, |req| {
            req.request_scale(3);
            req.request_scale(5);
        });
        assert_eq!(app.window_config().scale(), 3);
        assert!(host.calls.is_empty());

        let applied = app.update(&mut host).unwrap();
        assert_eq!(applied, Applied::Rescaled { from: 3, to: 5 });
        assert_eq!(app.window_config().scale(), 5);
        assert_eq!(host.recreations(), 1);

        app.update(&mut host).unwrap();
        assert_eq!(host.recreations(), 1);
    }

    #[test]
    fn rebind_commits_on_next_key_and_is_persisted() {
        let dir = scratch_dir("rebind");
        let mut app = app_with_store(&dir);
        let mut host = RecordingHost::default();

        render_pass(&mut app, &mut host, |req| req.rebind = Some(Button::B));
        assert_eq!(app.rebind().awaiting(), Some(Button::B));

        app.key_down(Keycode::Q);
        app.update(&mut host).unwrap();

        assert_eq!(app.rebind().awaiting(), None);
        assert_eq!(app.bindings().key(Button::B), Keycode::Q);

        let saved = SettingsStore::new(dir.join("config.toml")).try_load().unwrap();
        assert_eq!(saved.input.button_to_key["B"], "Q");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn cancelled_rebind_keeps_binding() {
        let mut app = App::new(Box::new(GameBoy::new()), Settings::default(), None);
        let mut host = RecordingHost::default();

        render_pass(&mut app, &mut host, |req| req.rebind = Some(Button::A));
        render_pass(&mut app, &mut host, |req| req.cancel_rebind = true);
        app.key_down(Keycode::Q);
        app.update(&mut host).unwrap();

        assert_eq!(app.bindings().key(Button::A), Keycode::Z);
    }

    #[test]
    fn vsync_toggle_is_immediate() {
        let mut app = App::new(Box::new(GameBoy::new()), Settings::default(), None);
        let mut host = RecordingHost::default();

        render_pass(&mut app, &mut host, |req| req.toggle_vsync = true);

        assert!(!app.window_config().vsync());
        assert!(!app.view().vsync);
    }

    #[test]
    fn exit_request_is_latched() {
        let mut app = App::new(Box::new(GameBoy::new()), Settings::default(), None);
        let mut host = RecordingHost::default();

        assert!(!app.exit_requested());
        render_pass(&mut app, &mut host, |req| req.exit = true);
        assert!(app.exit_requested());
    }

    #[test]
    fn short_rom_is_reported_and_not_loaded() {
        let dir = scratch_dir("short_rom");
        let rom_path = dir.join("short.gb");
        std::fs::write(&rom_path, vec![0u8; MIN_ROM_LEN - 1]).unwrap();

        let mut app = App::new(Box::new(GameBoy::new()), Settings::default(), None);
        let mut host = RecordingHost::default();
        render_pass(&mut app, &mut host, |req| req.open_rom = Some(rom_path.clone()));

        assert!(app.emulator().rom().is_none());
        assert!(app.notice().is_some());
        assert_eq!(app.settings().rom_directory, None);

        render_pass(&mut app, &mut host, |req| req.dismiss_notice = true);
        assert!(app.notice().is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_rom_file_is_a_read_error() {
        let mut app = App::new(Box::new(GameBoy::new()), Settings::default(), None);
        let result = app.open_rom(PathBuf::from("/definitely/not/here.gb"));
        assert!(matches!(result, Err(RomOpenError::Read { .. })));
    }

    #[test]
    fn loaded_rom_remembers_its_directory() {
        let dir = scratch_dir("good_rom");
        let rom_path = dir.join("game.gb");
        std::fs::write(&rom_path, vec![0u8; MIN_ROM_LEN]).unwrap();

        let mut app = app_with_store(&dir);
        let mut host = RecordingHost::default();
        app.open_rom(rom_path.clone()).unwrap();
        app.update(&mut host).unwrap();

        let rom = app.emulator().rom().unwrap();
        assert_eq!(rom.path(), rom_path.as_path());
        assert_eq!(rom.bytes().len(), MIN_ROM_LEN);
        assert_eq!(app.settings().rom_directory.as_deref(), Some(dir.as_path()));

        let saved = SettingsStore::new(dir.join("config.toml")).try_load().unwrap();
        assert_eq!(saved.rom_directory.as_deref(), Some(dir.as_path()));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn closing_writes_current_state() {
        let dir = scratch_dir("closing");
        let mut app = app_with_store(&dir);
        let mut host = RecordingHost::default();

        render_pass(&mut app, &mut host, |req| req.request_scale(4));
        app.update(&mut host).unwrap();
        app.closing();

        let reopened = app_with_store(&dir);
        assert_eq!(reopened.window_config().scale(), 4);
        assert_eq!(reopened.bindings(), &BindingMap::default());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
