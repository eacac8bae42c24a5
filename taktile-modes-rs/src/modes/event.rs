//! Output events emitted by the report modes.
//!
//! Events are plain values — the firmware's output router translates them
//! into USB class writes. One bounded [`OutputQueue`] is filled per tick
//! and drained completely before the next tick begins, so no event from
//! one tick can interleave with another's.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::settings::ReportFormat;

/// A 4-byte USB-MIDI event packet: cable/code-index byte followed by the
/// MIDI message bytes.
pub type MidiPacket = [u8; 4];

/// Maximum events a single tick can produce. The MIDI mode is the worst
/// case: eight note edges, one slider event, one flush.
pub const OUTPUT_QUEUE_DEPTH: usize = 16;

/// Per-tick event queue. A push onto a full queue drops the event —
/// tolerated, never an error.
pub type OutputQueue = Vec<Output, OUTPUT_QUEUE_DEPTH>;

/// One gamepad input report.
///
/// Axes are signed with 0 at center; `buttons` uses bits 0–3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisReport {
    pub x: i8,
    pub y: i8,
    pub z: i8,
    pub buttons: u8,
}

/// Snapshot rendered by the status-report mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusReport {
    pub buttons: u8,
    pub slider: Option<u8>,
}

impl StatusReport {
    /// Render the report as one console line (without line terminator).
    ///
    /// The `Pads` format is fixed-width: `> ` then one `X`/`_` per pad
    /// (bit 0 first), a space, and the slider value. An untouched slider
    /// renders as `-1` in every format.
    pub fn render(&self, format: ReportFormat) -> String<16> {
        let mut line = String::new();
        // The buffer is sized for the worst case; a formatting error is
        // unreachable, and an empty line is the harmless fallback.
        let _ = self.render_into(&mut line, format);
        line
    }

    fn render_into(&self, line: &mut String<16>, format: ReportFormat) -> core::fmt::Result {
        line.push_str("> ").map_err(|_| core::fmt::Error)?;
        match format {
            ReportFormat::Pads => {
                let mut b = self.buttons;
                for _ in 0..8 {
                    let ch = if b & 0x01 != 0 { 'X' } else { '_' };
                    line.push(ch).map_err(|_| core::fmt::Error)?;
                    b >>= 1;
                }
            }
            ReportFormat::Dec => write!(line, "{}", self.buttons)?,
            ReportFormat::Hex => write!(line, "{:X}", self.buttons)?,
        }
        let slider = self.slider.map_or(-1, i32::from);
        write!(line, " {}", slider)
    }
}

/// One output event. The firmware matches on the variant to pick the USB
/// class that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Output {
    /// Press a key (HID usage code). Held until the matching [`KeyUp`].
    ///
    /// [`KeyUp`]: Output::KeyUp
    KeyDown(u8),
    /// Release a key (HID usage code).
    KeyUp(u8),
    /// Queue a USB-MIDI event packet.
    Midi(MidiPacket),
    /// Push all queued MIDI packets to the host.
    MidiFlush,
    /// Send a gamepad input report.
    Gamepad(AxisReport),
    /// Emit a status line on the console.
    Status(StatusReport),
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_format_is_fixed_width() {
        let r = StatusReport {
            buttons: 0b0001_0011,
            slider: Some(127),
        };
        assert_eq!(r.render(ReportFormat::Pads).as_str(), "> XX__X___ 127");

        let r = StatusReport {
            buttons: 0,
            slider: Some(0),
        };
        assert_eq!(r.render(ReportFormat::Pads).as_str(), "> ________ 0");
    }

    #[test]
    fn absent_slider_renders_minus_one() {
        let r = StatusReport {
            buttons: 0xFF,
            slider: None,
        };
        assert_eq!(r.render(ReportFormat::Pads).as_str(), "> XXXXXXXX -1");
    }

    #[test]
    fn dec_and_hex_formats() {
        let r = StatusReport {
            buttons: 0x13,
            slider: Some(200),
        };
        assert_eq!(r.render(ReportFormat::Dec).as_str(), "> 19 200");
        assert_eq!(r.render(ReportFormat::Hex).as_str(), "> 13 200");
    }
}
