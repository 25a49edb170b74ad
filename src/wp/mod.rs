//! Write protection control
//!
//! SPI flash chips latch their status register against modification through
//! the SRP0 bit (and, on dual-register families, the SRP1 lock bit in SR2).
//! This module drives the enable/disable protocol for the "hardware" mode:
//! read the register, flip SRP0, write, and verify the readback under the
//! chip's verification mask.
//!
//! Two things the protocol refuses to do:
//!
//! - enable protection on a chip whose SR2 reports SRP1 set, because the
//!   chip is already under a power-cycle or permanent lock and further
//!   writes may be irreversible or silently ignored
//! - retry a failed status register write, because re-issuing WRSR without
//!   operator awareness wears the register and can mask a hardware fault
//!
//! # Example
//!
//! ```ignore
//! use norwp::chip::find_chip;
//! use norwp::wp;
//!
//! let chip = find_chip("W25Q64").ok_or(norwp::Error::ChipNotSupported)?;
//! wp::enable(&mut regs, chip)?;
//! ```

mod ops;

pub use ops::*;
