//! Pad-to-output mapping tables.
//!
//! All maps are indexed by board pad number (bit position in
//! [`TouchFrame::buttons`](crate::input::TouchFrame)).

use crate::input::PAD_COUNT;

/// The handful of HID keyboard usage codes the key maps need
/// (HID Usage Tables, Keyboard/Keypad page).
pub mod hid {
    pub const KEY_1: u8 = 0x1E;
    pub const KEY_2: u8 = 0x1F;
    pub const KEY_3: u8 = 0x20;
    pub const KEY_4: u8 = 0x21;
    pub const KEY_5: u8 = 0x22;
    pub const KEY_6: u8 = 0x23;
    pub const KEY_7: u8 = 0x24;
    pub const KEY_8: u8 = 0x25;

    pub const ENTER: u8 = 0x28;
    pub const ESCAPE: u8 = 0x29;
    pub const BACKSPACE: u8 = 0x2A;
    pub const SPACE: u8 = 0x2C;

    pub const RIGHT_ARROW: u8 = 0x4F;
    pub const LEFT_ARROW: u8 = 0x50;
    pub const DOWN_ARROW: u8 = 0x51;
    pub const UP_ARROW: u8 = 0x52;
}

/// Numeric key map: pads 1–8 type the digits `1`–`8`.
pub const NUMERIC_KEYS: [u8; PAD_COUNT] = [
    hid::KEY_1,
    hid::KEY_2,
    hid::KEY_3,
    hid::KEY_4,
    hid::KEY_5,
    hid::KEY_6,
    hid::KEY_7,
    hid::KEY_8,
];

/// Cursor key map: navigation cluster plus the editing keys.
pub const CURSOR_KEYS: [u8; PAD_COUNT] = [
    hid::UP_ARROW,
    hid::DOWN_ARROW,
    hid::LEFT_ARROW,
    hid::RIGHT_ARROW,
    hid::SPACE,
    hid::ENTER,
    hid::BACKSPACE,
    hid::ESCAPE,
];

/// MIDI note map: C major scale from middle C.
pub const MIDI_NOTES: [u8; PAD_COUNT] = [60, 62, 64, 65, 67, 69, 71, 72];
