//! Emulation boundary for the Ostrich frontend.
//!
//! The frontend programs against the capability traits in [`emulator`], [`input`] and
//! [`video`]; [`gameboy`] is the one machine currently wired up behind them.

pub mod emulator;
pub mod gameboy;
pub mod input;
pub mod rom;
pub mod video;

pub use emulator::Emulator;
pub use input::{Button, ButtonState, InputSink, InputState};
pub use rom::{Rom, RomLoadError, MIN_ROM_LEN};
pub use video::VideoSource;
