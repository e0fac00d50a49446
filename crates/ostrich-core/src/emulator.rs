use std::path::PathBuf;

use crate::input::{InputSink, InputState};
use crate::rom::{Rom, RomLoadError};
use crate::video::VideoSource;

/// Machine-agnostic interface for an emulated system.
///
/// The frontend talks to a machine only through these capabilities and must not assume
/// any hardware characteristics beyond what they expose.
pub trait Emulator {
    /// Video output, presentation-agnostic.
    fn screen(&self) -> &dyn VideoSource;

    /// Where the frontend sends button transitions.
    fn input(&mut self) -> &mut dyn InputSink;

    /// Live controller state, for observers such as an input display.
    fn input_state(&self) -> &dyn InputState;

    /// Hand a ROM image to the machine. Payloads too small to hold a header are rejected
    /// and leave any previously loaded ROM in place.
    fn load_rom(&mut self, bytes: Vec<u8>, path: PathBuf) -> Result<(), RomLoadError>;

    fn rom(&self) -> Option<&Rom>;
}
