//! Chip write-protection capability descriptors
//!
//! Every supported chip model gets one static [`WpCapability`] describing
//! where its write-protection bits live and which bits a post-write readback
//! must be checked against. Descriptors are built once at compile time and
//! looked up by model name; see [`database`].

mod database;

pub use database::{find_chip, is_chipname_duplicate, WP_CHIPS};

/// Register layout variant, selected once at chip-resolution time
///
/// The enable/disable protocol branches on this instead of re-testing
/// per-chip capability flags at every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum RegisterLayout {
    /// SR1 only; SRP0 at bit 7
    Single,
    /// SR1 plus SR2; SRP1 (power-cycle/permanent lock) at SR2 bit 0.
    /// Status writes must cover both registers in one WRSR sequence.
    Dual {
        /// CMP (range complement) sits at SR2 bit 6
        cmp_in_sr2: bool,
    },
    /// SR1 plus a separate configuration register holding TB at bit 3
    /// (RDCR 0x15, Macronix-style). Protocol-wise this behaves like
    /// `Single`: enable/disable never touch the configuration register.
    SeparateTb,
}

/// Write-protection capability descriptor for one chip model
///
/// The masks are transcribed from vendor documentation. An incorrect mask
/// causes false-positive or false-negative verification; nothing here can
/// detect that.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct WpCapability {
    /// Model name, the exact-match lookup key
    pub name: &'static str,
    /// Register layout variant
    pub layout: RegisterLayout,
    /// SR1 bits compared after a write to decide success
    ///
    /// A subset of the register: BUSY/WEL and other unrelated bits may
    /// legitimately differ between the written value and the readback.
    pub verify_mask: u8,
    /// SR1 bits that select the protected address range (BP/TB/SEC)
    pub range_mask: u8,
}

impl WpCapability {
    /// Whether the chip has a secondary status register
    pub const fn has_secondary_register(&self) -> bool {
        matches!(self.layout, RegisterLayout::Dual { .. })
    }

    /// Whether SR2 bit 6 is the CMP range-complement bit
    pub const fn sr2_bit6_is_cmp(&self) -> bool {
        matches!(self.layout, RegisterLayout::Dual { cmp_in_sr2: true })
    }

    /// Whether the TB bit lives in a separate configuration register
    pub const fn uses_separate_tb_register(&self) -> bool {
        matches!(self.layout, RegisterLayout::SeparateTb)
    }

    /// Whether configuration register bit 3 is the TB bit
    pub const fn config_bit3_is_tb(&self) -> bool {
        self.uses_separate_tb_register()
    }
}
