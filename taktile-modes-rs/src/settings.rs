//! Runtime settings snapshot.
//!
//! The console collaborator owns persistence (load at boot, save on
//! request); this type only holds the live values and enforces their
//! domains. Setters clamp or mask rather than fail — a garbled stored
//! value must never brick the device.
//!
//! The whole struct is `Copy` so the main tick can take a consistent
//! snapshot without holding a lock across any output work.

use crate::modes::MODE_COUNT;

/// How the status-report mode renders the pad bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportFormat {
    /// One character per pad: `X` touched, `_` idle.
    #[default]
    Pads,
    /// Decimal value of the bitmask.
    Dec,
    /// Hexadecimal value of the bitmask.
    Hex,
}

/// Live device settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    startup_mode: usize,
    led_tracking: bool,
    midi_channel: u8,
    midi_controller: u8,
    report_format: ReportFormat,
}

impl Settings {
    /// Factory defaults: status-report mode at power-on, LED tracking on,
    /// MIDI channel 1, slider on pitch bend.
    pub const fn new() -> Self {
        Self {
            startup_mode: 0,
            led_tracking: true,
            midi_channel: 0,
            midi_controller: 0,
            report_format: ReportFormat::Pads,
        }
    }

    // ── Getters ──────────────────────────────────────────────────────

    /// Mode activated at power-on, in `0..MODE_COUNT`.
    pub fn startup_mode(&self) -> usize {
        self.startup_mode
    }

    /// Whether the RGB LEDs mirror the touch state.
    pub fn led_tracking(&self) -> bool {
        self.led_tracking
    }

    /// MIDI channel, 0-based (wire value), always in `0..=15`.
    pub fn midi_channel(&self) -> u8 {
        self.midi_channel
    }

    /// MIDI controller number for the slider, in `0..=127`.
    /// 0 routes the slider to pitch bend instead of a controller.
    pub fn midi_controller(&self) -> u8 {
        self.midi_controller
    }

    /// Status-report rendering format.
    pub fn report_format(&self) -> ReportFormat {
        self.report_format
    }

    // ── Setters ──────────────────────────────────────────────────────

    /// Set the power-on mode, clamped into the valid mode range.
    pub fn set_startup_mode(&mut self, mode: usize) {
        self.startup_mode = if mode >= MODE_COUNT {
            MODE_COUNT - 1
        } else {
            mode
        };
    }

    pub fn set_led_tracking(&mut self, enabled: bool) {
        self.led_tracking = enabled;
    }

    /// Set the MIDI channel and slider controller. The channel is masked
    /// to 4 bits and the controller to 7, matching their wire domains.
    pub fn set_midi(&mut self, channel: u8, controller: u8) {
        self.midi_channel = channel & 0x0F;
        self.midi_controller = controller & 0x7F;
    }

    pub fn set_report_format(&mut self, format: ReportFormat) {
        self.report_format = format;
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::new();
        assert_eq!(s.startup_mode(), 0);
        assert!(s.led_tracking());
        assert_eq!(s.midi_channel(), 0);
        assert_eq!(s.midi_controller(), 0);
        assert_eq!(s.report_format(), ReportFormat::Pads);
    }

    #[test]
    fn startup_mode_clamps_to_last_mode() {
        let mut s = Settings::new();
        s.set_startup_mode(MODE_COUNT);
        assert_eq!(s.startup_mode(), MODE_COUNT - 1);
        s.set_startup_mode(usize::MAX);
        assert_eq!(s.startup_mode(), MODE_COUNT - 1);
        s.set_startup_mode(2);
        assert_eq!(s.startup_mode(), 2);
    }

    #[test]
    fn midi_values_are_masked() {
        let mut s = Settings::new();
        s.set_midi(0x1F, 0xFF);
        assert_eq!(s.midi_channel(), 0x0F);
        assert_eq!(s.midi_controller(), 0x7F);
        s.set_midi(3, 74);
        assert_eq!(s.midi_channel(), 3);
        assert_eq!(s.midi_controller(), 74);
    }
}
