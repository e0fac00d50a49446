use std::collections::BTreeMap;

use log::{info, warn};
use ostrich_core::Button;
use sdl2::keyboard::Keycode;

/// Hard-coded binding for a button, used for first runs and to back-fill
/// anything missing or unparsable in the settings file.
pub fn default_key(button: Button) -> Keycode {
    match button {
        Button::Up => Keycode::Up,
        Button::Down => Keycode::Down,
        Button::Left => Keycode::Left,
        Button::Right => Keycode::Right,
        Button::A => Keycode::Z,
        Button::B => Keycode::X,
        Button::Start => Keycode::Return,
        Button::Select => Keycode::Backspace,
    }
}

/// Button → key association. One slot per button, so every button is always bound.
///
/// Keys are not required to be unique; reverse lookup returns the first button in
/// [`Button::ALL`] order that uses the key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BindingMap {
    keys: [Keycode; Button::COUNT],
}

impl Default for BindingMap {
    fn default() -> Self {
        Self {
            keys: Button::ALL.map(default_key),
        }
    }
}

impl BindingMap {
    pub fn key(&self, button: Button) -> Keycode {
        self.keys[button.index()]
    }

    pub fn button_for(&self, key: Keycode) -> Option<Button> {
        Button::ALL
            .into_iter()
            .find(|b| self.keys[b.index()] == key)
    }

    /// Overwrites the button's key. Another button already using `key` keeps it.
    pub fn rebind(&mut self, button: Button, key: Keycode) {
        self.keys[button.index()] = key;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Button, Keycode)> + '_ {
        Button::ALL.into_iter().map(|b| (b, self.keys[b.index()]))
    }

    /// Builds a map from persisted `button name → key name` pairs. Unknown buttons and
    /// unparsable keys are skipped; every button left without a key gets its default.
    pub fn from_names(names: &BTreeMap<String, String>) -> Self {
        let mut parsed: [Option<Keycode>; Button::COUNT] = [None; Button::COUNT];

        for (button_name, key_name) in names {
            let Ok(button) = button_name.parse::<Button>() else {
                warn!("ignoring binding for unknown button {button_name:?}");
                continue;
            };
            match Keycode::from_name(key_name.trim()) {
                Some(key) => parsed[button.index()] = Some(key),
                None => warn!("ignoring unrecognised key {key_name:?} for {button}"),
            }
        }

        let mut map = Self::default();
        for button in Button::ALL {
            match parsed[button.index()] {
                Some(key) => map.rebind(button, key),
                None => info!(
                    "{button} bound to default key {}",
                    default_key(button).name()
                ),
            }
        }
        map
    }

    /// Persistable `button name → key name` pairs. Keys SDL has no name for are left
    /// out, so those buttons come back with their defaults on the next load.
    pub fn to_names(&self) -> BTreeMap<String, String> {
        self.iter()
            .filter_map(|(b, k)| named_entry(b, k.name()))
            .collect()
    }
}

fn named_entry(button: Button, key_name: String) -> Option<(String, String)> {
    if key_name.is_empty() {
        warn!("{button} is bound to a key with no name; not persisting it");
        return None;
    }
    Some((button.name().to_string(), key_name))
}
