//! Core input/output logic for the taktile touch controller.
//!
//! This crate holds everything about the device's behavior that does not
//! touch hardware: the touch frame and output event types, the button
//! debouncer, the report mode framework and its five variants, the mode
//! selector, and the runtime settings snapshot. The firmware crate feeds
//! it samples and drains its event queue; unit tests drive it the same
//! way on the host.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation anywhere — the per-tick event queue is a bounded
//! [`heapless::Vec`] and status lines render into a [`heapless::String`].
//! The optional `defmt` feature enables structured logging on embedded
//! targets.

#![no_std]

pub mod debounce;
pub mod input;
pub mod modes;
pub mod scale;
pub mod settings;
