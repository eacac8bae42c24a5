//! Async driver for the AT42QT2120-family capacitive touch controller.
//!
//! This crate provides an Embassy-compatible async I2C driver for the
//! touch controller behind the taktile pad surface: eight capacitive
//! pads plus a three-key linear slider.
//!
//! # Architecture
//!
//! The crate is split into two layers:
//!
//! - **`bus`** (crate-private) — Low-level register read/write primitives.
//! - **[`TouchPad`]** (public) — Frame decoding into board pad order,
//!   device control (configure, reset, recalibrate), bounded raw register
//!   access, and bulk [`TouchConfig`] transfer.
//!
//! # Quick start
//!
//! ```ignore
//! use captouch_driver::{TouchPad, DEFAULT_ADDRESS};
//!
//! // Construct with any `embedded-hal-async` I2C implementation
//! let mut pad = TouchPad::new(i2c, DEFAULT_ADDRESS);
//!
//! pad.configure().await?;
//! loop {
//!     let frame = pad.read_frame().await?;
//!     // frame.buttons — one bit per pad, board order
//!     // frame.slider  — Some(position) while touched
//! }
//! ```

#![no_std]

mod bus;
mod error;
pub mod registers;
mod touch_pad;

pub use error::TouchError;
pub use registers::{DEFAULT_ADDRESS, PAD_COUNT};
pub use touch_pad::{TouchConfig, TouchPad};
