use tren_control::Key;

use crate::system::inputs::Keypad;
use crate::system::CORE_CLOCK_HZ;

/// Scan the keypad until any key press registers, returning it.
pub fn scan_until_key_is_pressed(keypad: &mut Keypad) -> Key {
    loop {
        if let Some(key) = keypad.scan() {
            return key;
        }
        cortex_m::asm::delay(CORE_CLOCK_HZ / 1000);
    }
}

/// Scan the keypad until the given key is pressed, ignoring others.
pub fn scan_until_key(keypad: &mut Keypad, key: Key) {
    while scan_until_key_is_pressed(keypad) != key {}
}
