//! Error types for the LED chain driver.

use core::fmt;

/// Errors that can occur while shifting a frame out to the chain.
#[derive(Debug)]
pub enum LedError<E> {
    /// Underlying SPI bus error.
    Spi(E),
}

// Allow ergonomic `?` propagation from raw SPI errors.
impl<E> From<E> for LedError<E> {
    fn from(error: E) -> Self {
        LedError::Spi(error)
    }
}

impl<E: fmt::Debug> fmt::Display for LedError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LedError::Spi(e) => write!(f, "SPI error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for LedError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            LedError::Spi(e) => defmt::write!(f, "SPI error: {}", e),
        }
    }
}
