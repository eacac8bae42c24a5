//! Non-blocking driver for an APA102-style RGB LED chain using Embassy.
//!
//! This crate provides [`LedEngine`], the pixel buffer and
//! Idle/Busy/BusyDirty transmission state machine, [`LedStrip`], the SPI
//! transport, and [`strip_flush_task`] with its [`StripHandle`], the
//! shared non-blocking surface the rest of the firmware talks to.
//!
//! # Quick Start
//!
//! ```ignore
//! use taktile_led_strip_rs::{strip_flush_task, LedStrip, Rgb, StripHandle};
//!
//! static STRIP: StripHandle = StripHandle::new();
//!
//! // In your Embassy main:
//! let strip = LedStrip::new(spi);
//! spawner.spawn(led_task(strip, &STRIP)).unwrap();
//!
//! // From anywhere, without blocking:
//! STRIP.set_pixel(0, Rgb::new(16, 0, 0));
//! STRIP.flush();
//!
//! // Thin task wrapper (Embassy tasks cannot be generic):
//! #[embassy_executor::task]
//! async fn led_task(strip: LedStrip<MySpiType>, handle: &'static StripHandle) {
//!     strip_flush_task(strip, handle).await;
//! }
//! ```
//!
//! # Guarantees
//!
//! At most one frame is in flight at a time; a flush during a
//! transmission is deferred, not dropped; the hardware always ends up
//! showing the buffer contents as of the most recent flush, though
//! intermediate states between coalesced flushes may never be shown.
//!
//! # Crate Features
//!
//! - **`defmt`** *(default)* — structured logging via [`defmt`].
//! - **`task`** — the Embassy flush task and [`StripHandle`].
//!
//! [`StripHandle`]: strip_task::StripHandle
//! [`strip_flush_task`]: strip_task::strip_flush_task

#![no_std]

pub mod driver;
pub mod engine;
pub mod error;
pub mod frame;
#[cfg(feature = "task")]
pub mod strip_task;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use driver::LedStrip;
pub use engine::{LedEngine, TxState};
pub use error::LedError;
pub use frame::{PixelBuffer, Rgb, TransmitFrame, FRAME_LEN, LED_COUNT};
#[cfg(feature = "task")]
pub use strip_task::{strip_flush_task, StripHandle};
