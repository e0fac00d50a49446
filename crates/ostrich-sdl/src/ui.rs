use std::path::{Path, PathBuf};

use egui::{Align2, Context, TopBottomPanel, Window};
use ostrich_core::{Button, InputState};

use crate::app::UiView;
use crate::reconfig::FrameRequests;

pub const SCALE_CHOICES: [u32; 4] = [2, 3, 4, 5];

const BUTTON_GROUPS: [&[Button]; 3] = [
    &[Button::Up, Button::Down, Button::Left, Button::Right],
    &[Button::A, Button::B],
    &[Button::Start, Button::Select],
];

/// Menu layer. Holds only widget state; everything the user asks for goes into
/// [`FrameRequests`] and is acted on after the pass.
pub struct MenuUi {
    controls_open: bool,
    input_open: bool,
    rom_dialog_open: bool,
    rom_path: String,
}

impl Default for MenuUi {
    fn default() -> Self {
        Self {
            controls_open: false,
            input_open: true,
            rom_dialog_open: false,
            rom_path: String::new(),
        }
    }
}

impl MenuUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&mut self, ctx: &Context, view: &UiView<'_>, requests: &mut FrameRequests) {
        self.main_menu_bar(ctx, view, requests);
        self.open_rom_dialog(ctx, view, requests);
        self.controls_window(ctx, view, requests);
        self.input_window(ctx, view);
        notice_window(ctx, view, requests);
    }

    fn main_menu_bar(&mut self, ctx: &Context, view: &UiView<'_>, requests: &mut FrameRequests) {
        TopBottomPanel::top("menu_top").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open ROM...").clicked() {
                        self.rom_dialog_open = true;
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        requests.exit = true;
                        ui.close();
                    }
                });

                ui.menu_button("Emulator", |ui| {
                    ui.menu_button("Scale", |ui| {
                        for scale in SCALE_CHOICES {
                            if ui.radio(view.scale == scale, format!("{scale}x")).clicked() {
                                requests.request_scale(scale);
                                ui.close();
                            }
                        }
                    });

                    let mut vsync = view.vsync;
                    if ui.checkbox(&mut vsync, "VSync").changed() {
                        requests.toggle_vsync = true;
                    }

                    ui.separator();
                    if ui.button("Controls...").clicked() {
                        self.controls_open = true;
                        ui.close();
                    }
                    ui.checkbox(&mut self.input_open, "Input display");
                });
            });
        });
    }

    fn open_rom_dialog(&mut self, ctx: &Context, view: &UiView<'_>, requests: &mut FrameRequests) {
        if !self.rom_dialog_open {
            return;
        }

        let mut open = true;
        let mut done = false;
        let rom_path = &mut self.rom_path;
        Window::new("Open ROM")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("ROM Path:");
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(rom_path);
                    if ui.button("Browse...").clicked() {
                        if let Some(path) = pick_rom(rom_path, view.rom_directory) {
                            *rom_path = path.display().to_string();
                        }
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("Open").clicked() {
                        let typed = rom_path.trim();
                        if !typed.is_empty() {
                            requests.open_rom = Some(PathBuf::from(typed));
                        }
                        done = true;
                    }
                    if ui.button("Cancel").clicked() {
                        done = true;
                    }
                });
            });
        self.rom_dialog_open = open && !done;
    }

    fn controls_window(&mut self, ctx: &Context, view: &UiView<'_>, requests: &mut FrameRequests) {
        if !self.controls_open {
            return;
        }

        let mut open = true;
        Window::new("Controls")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Click Rebind, then press a key.");
                for group in BUTTON_GROUPS {
                    ui.separator();
                    for &button in group {
                        rebind_row(ui, view, button, requests);
                    }
                }

                if let Some(button) = view.awaiting_key {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label(format!("Waiting for key for: {button}"));
                        if ui.small_button("Cancel").clicked() {
                            requests.cancel_rebind = true;
                        }
                    });
                }
            });

        if !open && view.awaiting_key.is_some() {
            requests.cancel_rebind = true;
        }
        self.controls_open = open;
    }

    fn input_window(&mut self, ctx: &Context, view: &UiView<'_>) {
        Window::new("Input")
            .open(&mut self.input_open)
            .resizable(false)
            .default_pos([24.0, 48.0])
            .frame(egui::Frame::window(&ctx.style()).multiply_with_opacity(0.8))
            .show(ctx, |ui| {
                if let Some(title) = view.rom_title.as_deref().filter(|t| !t.is_empty()) {
                    ui.label(format!("ROM: {title}"));
                }
                ui.horizontal(|ui| {
                    ui.label("Pressed:");
                    ui.label(pressed_label(view));
                });
            });
    }
}

fn rebind_row(ui: &mut egui::Ui, view: &UiView<'_>, button: Button, requests: &mut FrameRequests) {
    ui.horizontal(|ui| {
        ui.monospace(format!(
            "{:<6} : {}",
            button.name(),
            view.bindings.key(button).name()
        ));
        if view.awaiting_key == Some(button) {
            ui.add_enabled(false, egui::Button::new("Press key..."));
        } else if ui.button("Rebind").clicked() {
            requests.rebind = Some(button);
        }
    });
}

fn notice_window(ctx: &Context, view: &UiView<'_>, requests: &mut FrameRequests) {
    let Some(notice) = view.notice else {
        return;
    };
    Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(notice);
            if ui.button("OK").clicked() {
                requests.dismiss_notice = true;
            }
        });
}

fn pressed_label(view: &UiView<'_>) -> String {
    let pressed: Vec<&str> = Button::ALL
        .into_iter()
        .filter(|b| view.input.is_pressed(*b))
        .map(Button::name)
        .collect();
    if pressed.is_empty() {
        "(none)".to_string()
    } else {
        pressed.join(" ")
    }
}

fn pick_rom(typed: &str, remembered: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().add_filter("Game Boy ROM", &["gb", "gbc"]);
    if let Some(dir) = browse_start_dir(typed, remembered) {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}

/// Where the file picker opens: next to the typed ROM if it exists, else the last
/// ROM directory, else the home directory.
fn browse_start_dir(typed: &str, remembered: Option<&Path>) -> Option<PathBuf> {
    let typed = Path::new(typed.trim());
    if typed.is_file() {
        if let Some(parent) = typed.parent() {
            return Some(parent.to_path_buf());
        }
    }
    remembered
        .filter(|dir| dir.is_dir())
        .map(Path::to_path_buf)
        .or_else(dirs::home_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::BindingMap;
    use ostrich_core::gameboy::Joypad;
    use ostrich_core::InputSink;

    fn view<'a>(bindings: &'a BindingMap, pad: &'a Joypad) -> UiView<'a> {
        UiView {
            scale: 3,
            vsync: true,
            bindings,
            awaiting_key: None,
            input: pad,
            rom_title: None,
            rom_directory: None,
            notice: None,
        }
    }

    #[test]
    fn pressed_label_lists_buttons_in_order() {
        let bindings = BindingMap::default();
        let mut pad = Joypad::new();
        assert_eq!(pressed_label(&view(&bindings, &pad)), "(none)");

        pad.set_button(Button::Start, true);
        pad.set_button(Button::Left, true);
        assert_eq!(pressed_label(&view(&bindings, &pad)), "Left Start");
    }

    #[test]
    fn browse_starts_next_to_typed_rom() {
        let dir = std::env::temp_dir().join("ostrich_ui_browse");
        std::fs::create_dir_all(&dir).unwrap();
        let rom = dir.join("game.gb");
        std::fs::write(&rom, [0u8; 4]).unwrap();

        let start = browse_start_dir(rom.to_str().unwrap(), None);
        assert_eq!(start.as_deref(), Some(dir.as_path()));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn browse_falls_back_to_remembered_directory() {
        let dir = std::env::temp_dir().join("ostrich_ui_remembered");
        std::fs::create_dir_all(&dir).unwrap();

        let start = browse_start_dir("no/such/file.gb", Some(&dir));
        assert_eq!(start.as_deref(), Some(dir.as_path()));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn browse_ignores_stale_remembered_directory() {
        let stale = Path::new("/no/longer/here");
        assert_eq!(browse_start_dir("", Some(stale)), dirs::home_dir());
    }
}
