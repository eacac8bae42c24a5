//! SPI transport for the LED chain.
//!
//! [`LedStrip`] owns the SPI peripheral and knows how to shift one
//! [`TransmitFrame`] out. It carries no pixel state of its own — the
//! [`LedEngine`](crate::LedEngine) decides *what* and *when* to send.

use embedded_hal_async::spi::SpiBus;

use crate::error::LedError;
use crate::frame::TransmitFrame;

/// Async SPI writer for an APA102-style chain.
///
/// The chain has no chip select and no read path: the devices latch
/// whatever is clocked past them, so a transmit is a single bus write.
pub struct LedStrip<SPI> {
    spi: SPI,
}

impl<SPI> LedStrip<SPI>
where
    SPI: SpiBus<u8>,
{
    /// Create a new chain transport.
    ///
    /// # Arguments
    /// * `spi` — SPI peripheral (takes ownership for exclusive access).
    ///   Only the clock and data-out lines are wired to the chain.
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Shift one frame out to the chain.
    ///
    /// Completes when the bus transfer finishes; the devices have latched
    /// their new colors by then.
    ///
    /// # Errors
    /// * [`LedError::Spi`] on a bus-level failure.
    pub async fn transmit(&mut self, frame: &TransmitFrame) -> Result<(), LedError<SPI::Error>> {
        self.spi.write(frame.as_bytes()).await?;
        self.spi.flush().await?;
        Ok(())
    }
}
