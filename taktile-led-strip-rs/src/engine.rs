//! Transmission engine: the Idle/Busy/BusyDirty state machine.
//!
//! [`LedEngine`] owns the logical [`PixelBuffer`] and decides when a
//! transmit frame may be shifted out. The contract:
//!
//! - at most one transaction is ever in flight;
//! - a flush requested while a transaction is running is never lost —
//!   it is deferred and restarted from the *latest* buffer contents when
//!   the running transaction completes;
//! - flushes requested and superseded before their transaction could
//!   start are coalesced: only the newest buffer state reaches the
//!   hardware.
//!
//! The two transition methods, [`request_flush()`](LedEngine::request_flush)
//! and [`transfer_complete()`](LedEngine::transfer_complete), are the
//! entire state surface. The hardware task calls them around real SPI
//! transfers; the unit tests call them with no hardware at all.

use crate::frame::{PixelBuffer, Rgb, TransmitFrame};

/// Transmission status of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxState {
    /// No transaction outstanding.
    Idle,
    /// A frame is being shifted out.
    Busy,
    /// A frame is being shifted out and a newer flush is pending.
    BusyDirty,
}

/// Pixel buffer plus transmission state machine.
pub struct LedEngine {
    buffer: PixelBuffer,
    state: TxState,
}

impl LedEngine {
    pub const fn new() -> Self {
        Self {
            buffer: PixelBuffer::new(),
            state: TxState::Idle,
        }
    }

    // ── Buffer access ────────────────────────────────────────────────

    /// Set one pixel by logical index (out of range: silent no-op).
    /// Takes effect on the next flush.
    pub fn set_pixel(&mut self, index: usize, color: Rgb) {
        self.buffer.set(index, color);
    }

    pub fn set_all(&mut self, color: Rgb) {
        self.buffer.set_all(color);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.buffer.get(index)
    }

    pub fn state(&self) -> TxState {
        self.state
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Request that the current buffer contents reach the hardware.
    ///
    /// Returns the frame to start transmitting if the engine was idle;
    /// otherwise notes the request as dirty and returns `None`. Never
    /// blocks, never fails.
    pub fn request_flush(&mut self) -> Option<TransmitFrame> {
        match self.state {
            TxState::Idle => {
                self.state = TxState::Busy;
                Some(self.buffer.snapshot())
            }
            TxState::Busy | TxState::BusyDirty => {
                self.state = TxState::BusyDirty;
                None
            }
        }
    }

    /// Signal that the in-flight transaction finished.
    ///
    /// If a flush arrived meanwhile, returns a fresh snapshot of the
    /// *current* buffer (not the one that was just sent) to transmit
    /// next; otherwise the engine returns to idle. A spurious completion
    /// while idle is ignored.
    pub fn transfer_complete(&mut self) -> Option<TransmitFrame> {
        match self.state {
            TxState::BusyDirty => {
                self.state = TxState::Busy;
                Some(self.buffer.snapshot())
            }
            TxState::Busy => {
                self.state = TxState::Idle;
                None
            }
            TxState::Idle => None,
        }
    }
}

impl Default for LedEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
