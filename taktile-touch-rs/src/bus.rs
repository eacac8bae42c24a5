//! Low-level register access.
//!
//! The controller uses single-byte register addressing with a
//! repeated-start between the address write and the data read — plain
//! `write_read` on any `embedded-hal-async` I2C implementation.
//!
//! This module is crate-private — consumers interact with
//! [`TouchPad`](crate::TouchPad) in `touch_pad.rs` instead.

use embedded_hal_async::i2c::I2c;

use crate::error::TouchError;

/// Register read/write primitives over a shared-nothing I2C peripheral.
pub(crate) struct RegisterBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> RegisterBus<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Burst-read `buf.len()` bytes starting at `register`.
    pub async fn read(
        &mut self,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), TouchError<I2C::Error>> {
        self.i2c.write_read(self.address, &[register], buf).await?;
        Ok(())
    }

    /// Read a single register byte.
    pub async fn read_u8(&mut self, register: u8) -> Result<u8, TouchError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.read(register, &mut buf).await?;
        Ok(buf[0])
    }

    /// Write a single register byte.
    pub async fn write_u8(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), TouchError<I2C::Error>> {
        self.i2c.write(self.address, &[register, value]).await?;
        Ok(())
    }
}
