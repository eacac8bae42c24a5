//! High-level interface for the capacitive touch controller.
//!
//! [`TouchPad`] wraps the low-level register bus with frame decoding,
//! board-order key mapping, bounded raw register access, and bulk
//! configuration transfer.

use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;

use taktile::input::TouchFrame;

use crate::bus::RegisterBus;
use crate::error::TouchError;
use crate::registers::{
    DETECT_CALIBRATING, DETECT_SDET, PAD_COUNT, REG_ATD, REG_CALIBRATE, REG_CHARGE_TIME,
    REG_DETECTION_INTEGRATOR, REG_DETECTION_STATUS, REG_DRIFT_HOLD_TIME, REG_DTHR_BASE,
    REG_KEY_CTRL_BASE, REG_LP_MODE, REG_MAX, REG_PULSE_SCALE_BASE, REG_RESET,
    REG_SLIDER_OPTIONS, REG_SLIDER_POSITION, REG_TOUCH_RECAL_DELAY, REG_TTD, SLIDER_DEFAULT_DTHR,
    SLIDER_DEFAULT_PULSE, SLIDER_DEFAULT_SCALE, SLIDER_ENABLE, SLIDER_KEY_COUNT, SLIDER_KEY_START,
};

/// Interval between calibration status polls.
const CALIBRATION_POLL: Duration = Duration::from_millis(1);

/// Tuning block mirrored to and from the controller.
///
/// The per-pad arrays are indexed by **board pad number**, not controller
/// key number — the driver applies the [`pad_to_key`] mapping on the wire.
/// The console collaborator moves this block around as an opaque blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    pub lp_mode: u8,
    pub ttd: u8,
    pub atd: u8,
    pub detection_integrator: u8,
    pub touch_recal_delay: u8,
    pub drift_hold_time: u8,
    pub charge_time: u8,

    pub slider_options: u8,
    pub slider_detect_threshold: u8,
    pub slider_pulse_scale: u8,

    pub key_detect_threshold: [u8; PAD_COUNT],
    pub key_control: [u8; PAD_COUNT],
    pub key_pulse_scale: [u8; PAD_COUNT],
}

/// High-level interface for the capacitive touch controller.
///
/// # Example
///
/// ```ignore
/// use captouch_driver::{TouchPad, DEFAULT_ADDRESS};
///
/// // `i2c` is any `embedded-hal-async` I2C implementation
/// let mut pad = TouchPad::new(i2c, DEFAULT_ADDRESS);
///
/// pad.configure().await.unwrap();
/// let frame = pad.read_frame().await.unwrap();
/// ```
pub struct TouchPad<I2C> {
    bus: RegisterBus<I2C>,
}

impl<I2C> TouchPad<I2C>
where
    I2C: I2c,
{
    /// Create a new touch controller interface.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (fixed at 0x1C on this part)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            bus: RegisterBus::new(i2c, address),
        }
    }

    // -----------------------------------------------------------------------
    // Sampling
    // -----------------------------------------------------------------------

    /// Read one touch frame.
    ///
    /// Burst-reads the detection status and both key status bytes in a
    /// single transaction so the frame is one coherent sample. The slider
    /// position is fetched only while the controller reports a slider
    /// touch; its raw value grows toward the connector, so it is inverted
    /// to board orientation here.
    ///
    /// # Errors
    /// * [`TouchError::I2c`] on communication failure.
    pub async fn read_frame(&mut self) -> Result<TouchFrame, TouchError<I2C::Error>> {
        let mut status = [0u8; 3];
        self.bus.read(REG_DETECTION_STATUS, &mut status).await?;

        let slider = if status[0] & DETECT_SDET != 0 {
            let raw = self.bus.read_u8(REG_SLIDER_POSITION).await?;
            Some(255 - raw)
        } else {
            None
        };

        Ok(TouchFrame {
            buttons: key_bits(status[1], status[2]),
            slider,
        })
    }

    // -----------------------------------------------------------------------
    // Device control
    // -----------------------------------------------------------------------

    /// Program the power-on configuration: enable the slider and write
    /// the slider keys' default thresholds. Call once after reset, before
    /// the first [`read_frame()`](Self::read_frame).
    pub async fn configure(&mut self) -> Result<(), TouchError<I2C::Error>> {
        self.bus.write_u8(REG_SLIDER_OPTIONS, SLIDER_ENABLE).await?;

        for key in SLIDER_KEY_START..SLIDER_KEY_START + SLIDER_KEY_COUNT {
            self.bus
                .write_u8(REG_DTHR_BASE + key, SLIDER_DEFAULT_DTHR)
                .await?;
            self.bus
                .write_u8(
                    REG_PULSE_SCALE_BASE + key,
                    (SLIDER_DEFAULT_PULSE << 4) | SLIDER_DEFAULT_SCALE,
                )
                .await?;
        }
        Ok(())
    }

    /// Trigger a software reset. The controller drops off the bus for
    /// ~200 ms afterwards; the caller owns that settling delay.
    pub async fn reset(&mut self) -> Result<(), TouchError<I2C::Error>> {
        self.bus.write_u8(REG_RESET, 0xFF).await
    }

    /// Start a full recalibration and wait for it to finish.
    ///
    /// The wait polls the calibrating status bit, yielding to the
    /// executor between polls — other tasks keep running while the
    /// controller settles (typically tens of milliseconds).
    ///
    /// # Errors
    /// Returns the first I2C error encountered; the controller keeps
    /// calibrating on its own either way.
    pub async fn recalibrate(&mut self) -> Result<(), TouchError<I2C::Error>> {
        self.bus.write_u8(REG_CALIBRATE, 0xFF).await?;
        Timer::after(Duration::from_millis(2)).await;

        while self.bus.read_u8(REG_DETECTION_STATUS).await? & DETECT_CALIBRATING != 0 {
            Timer::after(CALIBRATION_POLL).await;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Raw register access
    // -----------------------------------------------------------------------

    /// Read a raw register, bounds-checked.
    ///
    /// # Errors
    /// * [`TouchError::InvalidRegister`] if `register > 99`
    /// * [`TouchError::I2c`] on communication failure
    pub async fn read_register(&mut self, register: u8) -> Result<u8, TouchError<I2C::Error>> {
        if register > REG_MAX {
            return Err(TouchError::InvalidRegister);
        }
        self.bus.read_u8(register).await
    }

    /// Write a raw register, bounds-checked.
    ///
    /// # Errors
    /// * [`TouchError::InvalidRegister`] if `register > 99`
    /// * [`TouchError::I2c`] on communication failure
    pub async fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), TouchError<I2C::Error>> {
        if register > REG_MAX {
            return Err(TouchError::InvalidRegister);
        }
        self.bus.write_u8(register, value).await
    }

    // -----------------------------------------------------------------------
    // Bulk configuration
    // -----------------------------------------------------------------------

    /// Read the full tuning block, translating per-key registers into
    /// board pad order.
    pub async fn read_config(&mut self) -> Result<TouchConfig, TouchError<I2C::Error>> {
        let mut config = TouchConfig {
            lp_mode: self.bus.read_u8(REG_LP_MODE).await?,
            ttd: self.bus.read_u8(REG_TTD).await?,
            atd: self.bus.read_u8(REG_ATD).await?,
            detection_integrator: self.bus.read_u8(REG_DETECTION_INTEGRATOR).await?,
            touch_recal_delay: self.bus.read_u8(REG_TOUCH_RECAL_DELAY).await?,
            drift_hold_time: self.bus.read_u8(REG_DRIFT_HOLD_TIME).await?,
            charge_time: self.bus.read_u8(REG_CHARGE_TIME).await?,
            slider_options: self.bus.read_u8(REG_SLIDER_OPTIONS).await?,
            slider_detect_threshold: self.bus.read_u8(REG_DTHR_BASE + SLIDER_KEY_START).await?,
            slider_pulse_scale: self
                .bus
                .read_u8(REG_PULSE_SCALE_BASE + SLIDER_KEY_START)
                .await?,
            key_detect_threshold: [0; PAD_COUNT],
            key_control: [0; PAD_COUNT],
            key_pulse_scale: [0; PAD_COUNT],
        };

        for pad in 0..PAD_COUNT {
            let key = pad_to_key(pad as u8);
            config.key_detect_threshold[pad] = self.bus.read_u8(REG_DTHR_BASE + key).await?;
            config.key_control[pad] = self.bus.read_u8(REG_KEY_CTRL_BASE + key).await?;
            config.key_pulse_scale[pad] = self.bus.read_u8(REG_PULSE_SCALE_BASE + key).await?;
        }

        Ok(config)
    }

    /// Write the full tuning block, translating board pad order back
    /// into per-key registers. All slider keys share the block's single
    /// slider threshold and pulse/scale values.
    pub async fn write_config(
        &mut self,
        config: &TouchConfig,
    ) -> Result<(), TouchError<I2C::Error>> {
        self.bus.write_u8(REG_LP_MODE, config.lp_mode).await?;
        self.bus.write_u8(REG_TTD, config.ttd).await?;
        self.bus.write_u8(REG_ATD, config.atd).await?;
        self.bus
            .write_u8(REG_DETECTION_INTEGRATOR, config.detection_integrator)
            .await?;
        self.bus
            .write_u8(REG_TOUCH_RECAL_DELAY, config.touch_recal_delay)
            .await?;
        self.bus
            .write_u8(REG_DRIFT_HOLD_TIME, config.drift_hold_time)
            .await?;
        self.bus.write_u8(REG_CHARGE_TIME, config.charge_time).await?;
        self.bus
            .write_u8(REG_SLIDER_OPTIONS, config.slider_options)
            .await?;

        for key in SLIDER_KEY_START..SLIDER_KEY_START + SLIDER_KEY_COUNT {
            self.bus
                .write_u8(REG_DTHR_BASE + key, config.slider_detect_threshold)
                .await?;
            self.bus
                .write_u8(REG_PULSE_SCALE_BASE + key, config.slider_pulse_scale)
                .await?;
        }

        for pad in 0..PAD_COUNT {
            let key = pad_to_key(pad as u8);
            self.bus
                .write_u8(REG_DTHR_BASE + key, config.key_detect_threshold[pad])
                .await?;
            self.bus
                .write_u8(REG_KEY_CTRL_BASE + key, config.key_control[pad])
                .await?;
            self.bus
                .write_u8(REG_PULSE_SCALE_BASE + key, config.key_pulse_scale[pad])
                .await?;
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Pure decode helpers
// ---------------------------------------------------------------------------

/// Map a board pad number to its controller key number. The pads are
/// routed to keys 11 down to 4 on the PCB.
pub(crate) fn pad_to_key(pad: u8) -> u8 {
    11 - pad
}

/// Assemble the pad bitmask from the two key status bytes.
///
/// The pads live in keys 4–11, so the mask is the top nibble of the
/// first byte joined with the second byte, then bit-reversed into board
/// order (key 11 = board pad 0).
pub(crate) fn key_bits(status1: u8, status2: u8) -> u8 {
    reverse_byte((status1 >> 4) | (status2 << 4))
}

fn reverse_byte(mut byte: u8) -> u8 {
    let mut reversed = 0;
    for _ in 0..8 {
        reversed <<= 1;
        reversed |= byte & 1;
        byte >>= 1;
    }
    reversed
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_byte_mirrors_bits() {
        assert_eq!(reverse_byte(0b0000_0001), 0b1000_0000);
        assert_eq!(reverse_byte(0b1010_0000), 0b0000_0101);
        assert_eq!(reverse_byte(0xFF), 0xFF);
        assert_eq!(reverse_byte(0x00), 0x00);
    }

    #[test]
    fn pad_to_key_covers_keys_eleven_down_to_four() {
        assert_eq!(pad_to_key(0), 11);
        assert_eq!(pad_to_key(7), 4);
    }

    #[test]
    fn key_bits_assembles_board_order() {
        // Key 4 touched (lowest pad key) → board pad 7.
        assert_eq!(key_bits(0b0001_0000, 0), 0b1000_0000);
        // Key 11 touched (highest pad key) → board pad 0.
        assert_eq!(key_bits(0, 0b0000_1000), 0b0000_0001);
        // All pads touched.
        assert_eq!(key_bits(0xF0, 0x0F), 0xFF);
    }
}
