//! Touch surface sample types.

/// Number of capacitive pads on the touch surface.
pub const PAD_COUNT: usize = 8;

/// One sample of the capacitive touch surface.
///
/// Produced once per main-loop tick by the touch controller driver and
/// consumed by the active report mode. Immutable once read — edge
/// detection happens inside the modes, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchFrame {
    /// One bit per pad, bit 0 = board pad 0. Bit order follows the board
    /// silkscreen, not the controller's key numbering — the driver
    /// performs that mapping.
    pub buttons: u8,
    /// Slider position, `None` while the slider zone is untouched.
    pub slider: Option<u8>,
}

impl TouchFrame {
    /// A frame with nothing touched.
    pub const IDLE: TouchFrame = TouchFrame {
        buttons: 0,
        slider: None,
    };
}

impl Default for TouchFrame {
    fn default() -> Self {
        Self::IDLE
    }
}
