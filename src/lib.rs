//! norwp - Hardware write-protection control for SPI NOR flash chips
//!
//! SPI NOR chips expose status-register write protection (the SRP0 bit plus
//! the BP/TB/SEC range selectors) through vendor-specific register layouts.
//! This crate drives the enable/disable protocol over those registers for a
//! known set of chip families, verifying every write against a chip-accurate
//! bit mask and refusing operations that could be irreversible.
//!
//! The raw register transport is deliberately out of scope: callers implement
//! [`registers::StatusRegisters`] on top of whatever programmer they own and
//! hand it to a [`flash::FlashContext`].
//!
//! # Example
//!
//! ```ignore
//! use norwp::flash::FlashContext;
//!
//! let mut ctx = FlashContext::resolve(my_transport, "W25Q64")?;
//! ctx.wp_enable()?;
//! ```
//!
//! # Features
//!
//! - `std` - Enable standard library support (fmap locator, suspend lock)
//! - `alloc` - Enable heap allocation (fmap parsing into region lists)
//! - `is_sync` - Compile the protocol as blocking calls instead of async

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
// Allow async fn in traits - we use maybe-async for dual sync/async support
#![allow(async_fn_in_trait)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod chip;
pub mod error;
pub mod flash;
#[cfg(feature = "alloc")]
pub mod layout;
#[cfg(feature = "std")]
pub mod power;
pub mod registers;
pub mod wp;

pub use error::{Error, Result};
