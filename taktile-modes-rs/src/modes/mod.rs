//! Report modes: the touch-to-protocol state machine.
//!
//! A **mode** turns per-tick touch samples into output events for one USB
//! protocol. Exactly one mode is active at a time; the [`ModeSelector`]
//! owns the fixed set and handles activation transitions.
//!
//! # Architecture
//!
//! ```text
//! TouchFrame ─► ModeSelector::dispatch ─► active Mode::update
//!                                              │
//!                      edge detection (prev vs curr sample)
//!                                              │
//!                                              ▼
//!                            OutputQueue of Output events
//!              (KeyDown/KeyUp, Midi, Gamepad, Status lines)
//! ```
//!
//! The five variants, in selection order:
//!
//! | Index | Variant       | Protocol                          |
//! |-------|---------------|-----------------------------------|
//! | 0     | Status        | text line over the serial console |
//! | 1     | Numeric keys  | keyboard HID, keys `1`–`8`        |
//! | 2     | Cursor keys   | keyboard HID, navigation cluster  |
//! | 3     | MIDI          | note on/off + pitch bend or CC    |
//! | 4     | Gamepad       | two axis pairs + buttons + slider |
//!
//! Modes never touch hardware: they push [`Output`] values into a bounded
//! queue and the firmware routes them to the USB classes. That keeps every
//! behavior in this module testable on the host.

mod error;
mod event;
mod keymap;
mod mode;
mod selector;

pub use error::ModeError;
pub use event::{AxisReport, MidiPacket, Output, OutputQueue, StatusReport, OUTPUT_QUEUE_DEPTH};
pub use keymap::{hid, CURSOR_KEYS, MIDI_NOTES, NUMERIC_KEYS};
pub use mode::{Behavior, Mode};
pub use selector::ModeSelector;

pub use crate::input::PAD_COUNT;

/// Number of report mode variants.
pub const MODE_COUNT: usize = 5;
