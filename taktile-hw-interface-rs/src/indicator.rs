//! Discrete mode indicator LEDs.

use embassy_rp::gpio::Output;

use taktile::modes::MODE_COUNT;

/// One LED per report mode; exactly the active mode's LED is lit.
pub struct ModeIndicator {
    leds: [Output<'static>; MODE_COUNT],
}

impl ModeIndicator {
    pub fn new(leds: [Output<'static>; MODE_COUNT]) -> Self {
        Self { leds }
    }

    /// Light the LED for `index` and extinguish the rest.
    /// Fire-and-forget; an out-of-range index just turns everything off.
    pub fn set_active_mode(&mut self, index: usize) {
        for (i, led) in self.leds.iter_mut().enumerate() {
            if i == index {
                led.set_high();
            } else {
                led.set_low();
            }
        }
    }
}
