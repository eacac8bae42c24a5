//! Shared strip handle and the flush task.
//!
//! [`StripHandle`] is the firmware-facing surface: synchronous, never
//! blocking, callable from any task. It wraps the [`LedEngine`] in a
//! critical-section mutex — the scoped equivalent of masking the
//! transfer interrupt around a state inspection — and hands frames to
//! [`strip_flush_task`] through a [`Signal`].
//!
//! Because [`LedEngine::request_flush`] returns a frame at most once per
//! Idle→Busy transition, at most one frame is ever signalled before the
//! task consumes it; the signal's replace-on-overwrite semantics are
//! never exercised.
//!
//! [`Signal`]: embassy_sync::signal::Signal

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::spi::SpiBus;

use crate::driver::LedStrip;
use crate::engine::LedEngine;
use crate::frame::{Rgb, TransmitFrame};

/// Shared, lock-briefly handle onto the transmission engine.
///
/// `const`-constructible so it can live in a `static`:
///
/// ```ignore
/// static STRIP: StripHandle = StripHandle::new();
/// ```
pub struct StripHandle {
    engine: Mutex<CriticalSectionRawMutex, RefCell<LedEngine>>,
    pending: Signal<CriticalSectionRawMutex, TransmitFrame>,
}

impl StripHandle {
    pub const fn new() -> Self {
        Self {
            engine: Mutex::new(RefCell::new(LedEngine::new())),
            pending: Signal::new(),
        }
    }

    /// Set one pixel by logical index (out of range: silent no-op).
    /// Nothing reaches the hardware until [`flush()`](Self::flush).
    pub fn set_pixel(&self, index: usize, color: Rgb) {
        self.engine.lock(|e| e.borrow_mut().set_pixel(index, color));
    }

    /// Set every pixel to `color`.
    pub fn set_all(&self, color: Rgb) {
        self.engine.lock(|e| e.borrow_mut().set_all(color));
    }

    /// Turn every pixel off.
    pub fn clear(&self) {
        self.engine.lock(|e| e.borrow_mut().clear());
    }

    /// Request that the current buffer contents reach the hardware.
    ///
    /// Returns immediately in every state. If a transmission is already
    /// running the request is coalesced into it (the engine restarts
    /// with the newest contents on completion).
    pub fn flush(&self) {
        let frame = self.engine.lock(|e| e.borrow_mut().request_flush());
        if let Some(frame) = frame {
            self.pending.signal(frame);
        }
    }

    /// Feed the completion back into the engine; returns the next frame
    /// to transmit, if a flush arrived mid-transaction.
    fn complete(&self) -> Option<TransmitFrame> {
        self.engine.lock(|e| e.borrow_mut().transfer_complete())
    }
}

impl Default for StripHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Transmission loop.
///
/// This is a regular `async fn` — **not** an Embassy `#[task]`. Callers
/// should create a thin, concrete task wrapper that calls this function,
/// since Embassy tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn led_task(strip: LedStrip<MySpiType>, handle: &'static StripHandle) {
///     strip_flush_task(strip, handle).await;
/// }
/// ```
///
/// Each iteration waits for a flush, shifts frames until the engine
/// settles back to idle, and never holds the engine lock across a bus
/// transfer. A bus error is logged and treated as a completed transfer —
/// the next flush transmits a consistent frame again.
pub async fn strip_flush_task<SPI>(mut strip: LedStrip<SPI>, handle: &'static StripHandle)
where
    SPI: SpiBus<u8>,
{
    loop {
        let mut frame = handle.pending.wait().await;
        loop {
            if let Err(_e) = strip.transmit(&frame).await {
                #[cfg(feature = "defmt")]
                defmt::error!("LED chain transmit failed: {}", _e);
            }
            match handle.complete() {
                Some(next) => frame = next,
                None => break,
            }
        }
    }
}
