use log::{info, warn};
use ostrich_core::Button;
use sdl2::keyboard::Keycode;

use crate::bindings::BindingMap;
use crate::keyboard::KeyboardBridge;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RebindState {
    #[default]
    Idle,
    AwaitingKey(Button),
}

/// Interactive rebind: pick a button, then the next key-down becomes its binding.
///
/// Any key is accepted, including keys bound to other buttons.
#[derive(Debug, Default)]
pub struct RebindSession {
    state: RebindState,
}

impl RebindSession {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> RebindState {
        self.state
    }

    pub fn awaiting(&self) -> Option<Button> {
        match self.state {
            RebindState::Idle => None,
            RebindState::AwaitingKey(b) => Some(b),
        }
    }

    /// Starts waiting for a key for `button`, replacing any wait already in progress.
    pub fn begin(&mut self, button: Button, keyboard: &mut KeyboardBridge) {
        self.state = RebindState::AwaitingKey(button);
        keyboard.clear_last_key_down();
    }

    pub fn cancel(&mut self, keyboard: &mut KeyboardBridge) {
        self.state = RebindState::Idle;
        keyboard.clear_last_key_down();
    }

    /// Commits the captured key if one arrived since [`begin`](Self::begin).
    /// Returns the committed binding; the caller owns persisting it.
    pub fn poll(
        &mut self,
        keyboard: &mut KeyboardBridge,
        bindings: &mut BindingMap,
    ) -> Option<(Button, Keycode)> {
        let RebindState::AwaitingKey(button) = self.state else {
            return None;
        };
        let key = keyboard.last_key_down()?;

        bindings.rebind(button, key);
        self.state = RebindState::Idle;
        keyboard.clear_last_key_down();

        let name = key.name();
        if name.is_empty() {
            warn!("bound {button} to a key with no name; it will not survive a restart");
        } else {
            info!("bound {button} to {name}");
        }
        Some((button, key))
    }
}
