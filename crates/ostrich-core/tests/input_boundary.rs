use ostrich_core::gameboy::GameBoy;
use ostrich_core::video::{LCD_HEIGHT, LCD_WIDTH};
use ostrich_core::{Button, Emulator};

#[test]
fn gameboy_reports_native_lcd_resolution() {
    let gb = GameBoy::new();
    assert_eq!(gb.screen().native_size(), (LCD_WIDTH, LCD_HEIGHT));
    assert_eq!(gb.screen().native_size(), (160, 144));
}

#[test]
fn every_button_has_its_own_slot() {
    let mut gb = GameBoy::new();

    for b in Button::ALL {
        gb.input().set_button(b, true);
        for other in Button::ALL {
            assert_eq!(gb.input_state().is_pressed(other), other == b, "{b} vs {other}");
        }
        gb.input().set_button(b, false);
    }
}

#[test]
fn repeated_presses_are_idempotent() {
    let mut gb = GameBoy::new();

    gb.input().set_button(Button::A, true);
    gb.input().set_button(Button::A, true);
    gb.input().set_button(Button::A, false);

    assert!(!gb.input_state().is_pressed(Button::A));
    assert!(gb.joypad.state().is_empty());
}
