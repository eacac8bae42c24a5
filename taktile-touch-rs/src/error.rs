//! Error types for the touch controller driver.

use core::fmt;

/// Errors that can occur when communicating with the touch controller.
#[derive(Debug)]
pub enum TouchError<E> {
    /// Underlying I2C bus error.
    I2c(E),

    /// Register address out of the valid range (must be 0–99).
    InvalidRegister,
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for TouchError<E> {
    fn from(error: E) -> Self {
        TouchError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for TouchError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TouchError::I2c(e) => write!(f, "I2C error: {:?}", e),
            TouchError::InvalidRegister => write!(f, "Invalid register address (must be 0-99)"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for TouchError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            TouchError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            TouchError::InvalidRegister => defmt::write!(f, "Invalid register address"),
        }
    }
}
