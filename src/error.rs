//! Error types for norwp
//!
//! This module provides a no_std compatible error type used at the
//! status-register transport seam.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Register read or write could not complete
    SpiTransferFailed,
    /// Opcode is not supported by the chip or programmer
    ///
    /// Reading SR2 on a chip without a secondary status register
    /// reports this.
    OpcodeNotSupported,
    /// Chip model is not in the capability table
    ChipNotSupported,
    /// Operation timed out
    Timeout,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpiTransferFailed => write!(f, "SPI transfer failed"),
            Self::OpcodeNotSupported => write!(f, "opcode not supported"),
            Self::ChipNotSupported => write!(f, "flash chip not supported"),
            Self::Timeout => write!(f, "operation timed out"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
