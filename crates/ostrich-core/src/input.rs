use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

/// Controller buttons common to the emulated systems, independent of any physical key.
///
/// The declaration order is the fixed enumeration order used wherever the frontend has to
/// pick one button among several (reverse key lookup, UI listing).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    Start,
    Select,
}

impl Button {
    pub const COUNT: usize = 8;

    pub const ALL: [Button; Self::COUNT] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::A,
        Self::B,
        Self::Start,
        Self::Select,
    ];

    /// Slot of this button in fixed-size per-button tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable name used in persisted settings.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::A => "A",
            Self::B => "B",
            Self::Start => "Start",
            Self::Select => "Select",
        }
    }

    const fn mask(self) -> ButtonState {
        match self {
            Self::Up => ButtonState::UP,
            Self::Down => ButtonState::DOWN,
            Self::Left => ButtonState::LEFT,
            Self::Right => ButtonState::RIGHT,
            Self::A => ButtonState::A,
            Self::B => ButtonState::B,
            Self::Start => ButtonState::START,
            Self::Select => ButtonState::SELECT,
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown button name: {0}")]
pub struct UnknownButton(pub String);

impl FromStr for Button {
    type Err = UnknownButton;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownButton(s.to_string()))
    }
}

bitflags! {
    /// Level-triggered pressed state, one bit per [`Button`]; 1 = pressed.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct ButtonState: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const A = 1 << 4;
        const B = 1 << 5;
        const START = 1 << 6;
        const SELECT = 1 << 7;
    }
}

impl ButtonState {
    #[inline]
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.set(button.mask(), pressed);
    }

    #[inline]
    pub fn is_pressed(&self, button: Button) -> bool {
        self.contains(button.mask())
    }
}

/// Receives button transitions from a frontend. The machine owns how these
/// affect its internal controller state.
pub trait InputSink {
    fn set_button(&mut self, button: Button, pressed: bool);
}

/// Read-only view of the live controller state.
pub trait InputState {
    fn is_pressed(&self, button: Button) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_order_matches_indices() {
        for (i, b) in Button::ALL.iter().enumerate() {
            assert_eq!(b.index(), i);
        }
        assert_eq!(Button::Up.index(), 0);
        assert_eq!(Button::Select.index(), Button::COUNT - 1);
    }

    #[test]
    fn names_parse_back_case_insensitively() {
        for b in Button::ALL {
            assert_eq!(b.name().parse::<Button>(), Ok(b));
        }
        assert_eq!("start".parse::<Button>(), Ok(Button::Start));
        assert_eq!(" SELECT ".parse::<Button>(), Ok(Button::Select));
        assert!("Turbo".parse::<Button>().is_err());
    }

    #[test]
    fn state_press_and_release_are_level_triggered() {
        let mut state = ButtonState::empty();

        state.set_button(Button::A, true);
        state.set_button(Button::A, true);
        assert!(state.is_pressed(Button::A));
        assert!(!state.is_pressed(Button::B));

        state.set_button(Button::A, false);
        assert!(!state.is_pressed(Button::A));
        assert_eq!(state, ButtonState::empty());
    }
}
