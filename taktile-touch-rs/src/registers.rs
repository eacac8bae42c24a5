//! Register map for the AT42QT2120-family touch controller.
//!
//! The controller exposes a flat one-byte register address space. The
//! per-key tuning registers are laid out as three consecutive blocks
//! (detect threshold, key control, pulse/scale), one byte per key, with
//! the slider occupying keys 0–2 and the pads occupying keys 4–11 in
//! reverse board order (the `touch_pad` module owns that mapping).

// ---------------------------------------------------------------------------
// Device constants
// ---------------------------------------------------------------------------

/// Fixed 7-bit I2C address of the controller.
pub const DEFAULT_ADDRESS: u8 = 0x1C;

/// Number of capacitive pads wired to the controller.
pub const PAD_COUNT: usize = 8;

/// Highest register address accepted by the raw register accessors.
pub const REG_MAX: u8 = 99;

// ---------------------------------------------------------------------------
// Status registers
// ---------------------------------------------------------------------------

/// Detection status byte; followed by the two key-status bytes, so a
/// 3-byte burst read from here captures one coherent sample.
pub const REG_DETECTION_STATUS: u8 = 2;

/// Slider position (0–255), valid only while `DETECT_SDET` is set.
pub const REG_SLIDER_POSITION: u8 = 5;

/// Slider-detect bit in the detection status byte.
pub const DETECT_SDET: u8 = 1 << 1;

/// Calibrating bit in the detection status byte; clears when the
/// controller finishes a calibration cycle.
pub const DETECT_CALIBRATING: u8 = 1 << 7;

// ---------------------------------------------------------------------------
// Command registers
// ---------------------------------------------------------------------------

/// Writing any non-zero value starts a full recalibration.
pub const REG_CALIBRATE: u8 = 6;

/// Writing any non-zero value resets the device.
pub const REG_RESET: u8 = 7;

// ---------------------------------------------------------------------------
// Global configuration registers
// ---------------------------------------------------------------------------

pub const REG_LP_MODE: u8 = 8;
pub const REG_TTD: u8 = 9;
pub const REG_ATD: u8 = 10;
pub const REG_DETECTION_INTEGRATOR: u8 = 11;
pub const REG_TOUCH_RECAL_DELAY: u8 = 12;
pub const REG_DRIFT_HOLD_TIME: u8 = 13;
pub const REG_SLIDER_OPTIONS: u8 = 14;
pub const REG_CHARGE_TIME: u8 = 15;

/// Slider-options value enabling the slider (wheel mode off).
pub const SLIDER_ENABLE: u8 = 0x80;

// ---------------------------------------------------------------------------
// Per-key register blocks (one byte per key, 12 keys)
// ---------------------------------------------------------------------------

/// Detect threshold block base.
pub const REG_DTHR_BASE: u8 = 16;

/// Key control block base.
pub const REG_KEY_CTRL_BASE: u8 = 28;

/// Pulse/scale block base (pulse in the high nibble, scale in the low).
pub const REG_PULSE_SCALE_BASE: u8 = 40;

// ---------------------------------------------------------------------------
// Slider key assignment and defaults
// ---------------------------------------------------------------------------

/// First controller key belonging to the slider zone.
pub const SLIDER_KEY_START: u8 = 0;

/// Number of controller keys forming the slider zone.
pub const SLIDER_KEY_COUNT: u8 = 3;

/// Default detect threshold for the slider keys.
pub const SLIDER_DEFAULT_DTHR: u8 = 10;

/// Default pulse (high nibble) for the slider keys.
pub const SLIDER_DEFAULT_PULSE: u8 = 3;

/// Default scale (low nibble) for the slider keys.
pub const SLIDER_DEFAULT_SCALE: u8 = 4;
