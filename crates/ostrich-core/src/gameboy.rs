use std::path::PathBuf;

use crate::emulator::Emulator;
use crate::input::{Button, ButtonState, InputSink, InputState};
use crate::rom::{Rom, RomLoadError};
use crate::video::{LcdScreen, VideoSource};

/// Joypad button store. Passes transitions straight through; nothing reads it yet
/// except [`InputState`] observers.
#[derive(Debug, Default, Clone)]
pub struct Joypad {
    state: ButtonState,
}

impl Joypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }
}

impl InputSink for Joypad {
    #[inline]
    fn set_button(&mut self, button: Button, pressed: bool) {
        self.state.set_button(button, pressed);
    }
}

impl InputState for Joypad {
    #[inline]
    fn is_pressed(&self, button: Button) -> bool {
        self.state.is_pressed(button)
    }
}

#[derive(Debug, Default)]
pub struct GameBoy {
    pub screen: LcdScreen,
    pub joypad: Joypad,
    rom: Option<Rom>,
}

impl GameBoy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Emulator for GameBoy {
    fn screen(&self) -> &dyn VideoSource {
        &self.screen
    }

    fn input(&mut self) -> &mut dyn InputSink {
        &mut self.joypad
    }

    fn input_state(&self) -> &dyn InputState {
        &self.joypad
    }

    fn load_rom(&mut self, bytes: Vec<u8>, path: PathBuf) -> Result<(), RomLoadError> {
        self.rom = Some(Rom::new(bytes, path)?);
        Ok(())
    }

    fn rom(&self) -> Option<&Rom> {
        self.rom.as_ref()
    }
}
