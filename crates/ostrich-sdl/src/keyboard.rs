use ostrich_core::InputSink;
use sdl2::keyboard::Keycode;

use crate::bindings::BindingMap;

/// Turns host key events into button transitions on the machine's input sink.
///
/// SDL merges every attached keyboard into one event stream, so any keyboard can drive
/// any button. Auto-repeat key-downs are forwarded as fresh presses; the sink is
/// level-triggered so they are harmless.
#[derive(Debug, Default)]
pub struct KeyboardBridge {
    last_key_down: Option<Keycode>,
}

impl KeyboardBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Keycode, bindings: &BindingMap, sink: &mut dyn InputSink) {
        self.last_key_down = Some(key);

        if let Some(button) = bindings.button_for(key) {
            sink.set_button(button, true);
        }
    }

    pub fn key_up(&self, key: Keycode, bindings: &BindingMap, sink: &mut dyn InputSink) {
        if let Some(button) = bindings.button_for(key) {
            sink.set_button(button, false);
        }
    }

    /// Most recent key-down, mapped or not. Used to capture keys while rebinding.
    pub fn last_key_down(&self) -> Option<Keycode> {
        self.last_key_down
    }

    pub fn clear_last_key_down(&mut self) {
        self.last_key_down = None;
    }
}
