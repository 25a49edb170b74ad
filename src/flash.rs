//! Flash context - runtime state for write-protection operations

use crate::chip::{find_chip, WpCapability};
use crate::error::{Error, Result};
use crate::registers::StatusRegisters;
use crate::wp::{self, WpResult, WpStatus};
use maybe_async::maybe_async;

/// Runtime context for one addressed flash chip
///
/// Owns the status-register accessor for the chip together with its
/// resolved capability descriptor. Created at chip-detection time and
/// discarded at re-detection.
///
/// Exactly one operation may be in flight per context; the accessor is
/// assumed exclusively owned for each call's duration and no locking is
/// performed here.
#[derive(Debug)]
pub struct FlashContext<R> {
    regs: R,
    /// The resolved chip capability descriptor
    pub chip: &'static WpCapability,
}

impl<R: StatusRegisters> FlashContext<R> {
    /// Create a context for an already-resolved chip
    pub fn new(regs: R, chip: &'static WpCapability) -> Self {
        Self { regs, chip }
    }

    /// Create a context by resolving a detected model name
    pub fn resolve(regs: R, model: &str) -> Result<Self> {
        let chip = find_chip(model).ok_or(Error::ChipNotSupported)?;
        Ok(Self::new(regs, chip))
    }

    /// Enable hardware write protection
    #[maybe_async]
    pub async fn wp_enable(&mut self) -> WpResult {
        wp::enable(&mut self.regs, self.chip).await
    }

    /// Disable hardware write protection
    #[maybe_async]
    pub async fn wp_disable(&mut self) -> WpResult {
        wp::disable(&mut self.regs, self.chip).await
    }

    /// Read the current protection state
    #[maybe_async]
    pub async fn wp_status(&mut self) -> core::result::Result<WpStatus, wp::WpError> {
        wp::status(&mut self.regs, self.chip).await
    }

    /// Release the context and hand the accessor back
    pub fn into_inner(self) -> R {
        self.regs
    }
}
