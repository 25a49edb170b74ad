//! Write protection operations
//!
//! The enable and disable protocols are deliberately asymmetric: enable
//! consults SR2 for the SRP1 lock and short-circuits when SRP0 is already
//! set; disable does neither. The asymmetry matches the hardware-qualified
//! behavior of the supported families and must not be "fixed" without
//! hardware confirmation.

use crate::chip::{RegisterLayout, WpCapability};
use crate::error::Error;
use crate::registers::{Sr1, Sr2, StatusRegisters};
use core::fmt;
use log::{debug, error};
use maybe_async::maybe_async;

/// Write protection failure
///
/// Deliberately opaque: transport failures, lock-guard failures, and
/// verification mismatches all collapse into this one type. The diagnostic
/// text is for humans; no stable per-cause code set is guaranteed, so
/// callers must treat every failure uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WpError {
    diagnostic: &'static str,
}

impl WpError {
    const fn new(diagnostic: &'static str) -> Self {
        Self { diagnostic }
    }

    /// Human-readable description of the failure
    pub const fn diagnostic(&self) -> &'static str {
        self.diagnostic
    }
}

impl fmt::Display for WpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "write protection operation failed: {}", self.diagnostic)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WpError {}

impl From<Error> for WpError {
    fn from(_: Error) -> Self {
        WpError::new("status register access failed")
    }
}

/// Result type for write protection operations
pub type WpResult = core::result::Result<(), WpError>;

/// Current protection state as read from the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct WpStatus {
    /// Raw SR1 value
    pub sr1: u8,
    /// Raw SR2 value, on chips that have one
    pub sr2: Option<u8>,
}

impl WpStatus {
    /// Whether status register write protection is currently engaged
    pub fn enabled(&self) -> bool {
        Sr1::from_bits_retain(self.sr1).contains(Sr1::SRP0)
            || self
                .sr2
                .is_some_and(|v| Sr2::from_bits_retain(v).contains(Sr2::SRP1))
    }
}

/// Read back SR1 and check the protection bits against the written target.
///
/// Masked, not exact-byte: BUSY, WEL and other unrelated bits may
/// legitimately differ from the written value.
#[maybe_async]
async fn verify<R: StatusRegisters + ?Sized>(
    regs: &mut R,
    chip: &WpCapability,
    target: u8,
) -> WpResult {
    let readback = regs.read_sr1().await?;
    debug!("{}: new status: {:#04x}", chip.name, readback);

    if (readback & chip.verify_mask) != (target & chip.verify_mask) {
        error!(
            "{}: expected={:#04x}, but actual={:#04x}, check mask={:#04x}",
            chip.name, target, readback, chip.verify_mask
        );
        return Err(WpError::new("status register verification mismatch"));
    }

    Ok(())
}

/// Enable hardware write protection by setting SRP0.
///
/// On dual-register chips, SR2 is checked first: SRP1 set means the chip is
/// already under a power-cycle or permanent lock, and the operation aborts
/// before any SR1 write. If SRP0 is already set, nothing is written.
#[maybe_async]
pub async fn enable<R: StatusRegisters + ?Sized>(regs: &mut R, chip: &WpCapability) -> WpResult {
    if chip.has_secondary_register() {
        let sr2 = regs.read_sr2().await?;
        debug!("{}: sr2: {:#04x}", chip.name, sr2);
        if Sr2::from_bits_retain(sr2).contains(Sr2::SRP1) {
            error!("{}: SRP1 set, must disconnect power to unlock", chip.name);
            return Err(WpError::new("power-cycle or permanent lock engaged"));
        }

        let sr1 = regs.read_sr1().await?;
        if sr1 | Sr1::SRP0.bits() == sr1 {
            debug!("{}: SRP0 already set, nothing to write", chip.name);
            return Ok(());
        }
    }

    // Fresh read: the short-circuit check above observed a different
    // protocol step and the register is the sole source of truth.
    let sr1 = regs.read_sr1().await?;
    let target = sr1 | Sr1::SRP0.bits();
    debug!("{}: old status: {:#04x}", chip.name, sr1);

    match chip.layout {
        RegisterLayout::Single | RegisterLayout::SeparateTb => {
            regs.write_sr1(target).await?;
        }
        RegisterLayout::Dual { .. } => {
            // The combined WRSR sequence rewrites both registers; SR2 is
            // carried through unchanged.
            let sr2 = regs.read_sr2().await?;
            regs.write_sr1_sr2(target, sr2).await?;
        }
    }

    verify(regs, chip, target).await
}

/// Disable hardware write protection by clearing SRP0.
///
/// Always a single-register SR1 write, even on dual-register chips, and SR2
/// is never consulted: a chip already under a power-cycle or permanent lock
/// silently ignores the write and surfaces here as a verification mismatch
/// instead of a lock-guard failure.
#[maybe_async]
pub async fn disable<R: StatusRegisters + ?Sized>(regs: &mut R, chip: &WpCapability) -> WpResult {
    let sr1 = regs.read_sr1().await?;
    let target = sr1 & !Sr1::SRP0.bits();
    debug!("{}: old status: {:#04x}", chip.name, sr1);

    regs.write_sr1(target).await?;

    verify(regs, chip, target).await
}

/// Read the current protection state without modifying anything
#[maybe_async]
pub async fn status<R: StatusRegisters + ?Sized>(
    regs: &mut R,
    chip: &WpCapability,
) -> Result<WpStatus, WpError> {
    let sr1 = regs.read_sr1().await?;
    let sr2 = if chip.has_secondary_register() {
        Some(regs.read_sr2().await?)
    } else {
        None
    };

    Ok(WpStatus { sr1, sr2 })
}

// The protocol tests drive the maybe-async functions synchronously.
#[cfg(all(test, feature = "is_sync"))]
mod tests {
    use super::*;
    use crate::chip::find_chip;
    use crate::error::Result;

    /// Bit-level chip model tracking every register operation
    struct MockRegisters {
        sr1: u8,
        sr2: Option<u8>,
        config: u8,
        /// Simulate a chip ignoring WRSR (hardware-protected or faulty)
        drop_writes: bool,
        /// Bits OR'd into every SR1 readback (BUSY/WEL churn)
        readback_noise: u8,
        /// Fail every transfer
        fail_transfers: bool,
        sr1_writes: usize,
        combined_writes: usize,
        sr2_reads: usize,
        config_reads: usize,
    }

    impl MockRegisters {
        fn new(sr1: u8, sr2: Option<u8>) -> Self {
            Self {
                sr1,
                sr2,
                config: 0,
                drop_writes: false,
                readback_noise: 0,
                fail_transfers: false,
                sr1_writes: 0,
                combined_writes: 0,
                sr2_reads: 0,
                config_reads: 0,
            }
        }

        fn total_sr1_writes(&self) -> usize {
            self.sr1_writes + self.combined_writes
        }
    }

    impl StatusRegisters for MockRegisters {
        fn read_sr1(&mut self) -> Result<u8> {
            if self.fail_transfers {
                return Err(Error::SpiTransferFailed);
            }
            Ok(self.sr1 | self.readback_noise)
        }

        fn write_sr1(&mut self, value: u8) -> Result<()> {
            if self.fail_transfers {
                return Err(Error::SpiTransferFailed);
            }
            self.sr1_writes += 1;
            if !self.drop_writes {
                // BUSY and WEL are not writable
                self.sr1 = value & 0xFC;
            }
            Ok(())
        }

        fn read_sr2(&mut self) -> Result<u8> {
            if self.fail_transfers {
                return Err(Error::SpiTransferFailed);
            }
            self.sr2_reads += 1;
            self.sr2.ok_or(Error::OpcodeNotSupported)
        }

        fn write_sr1_sr2(&mut self, sr1: u8, sr2: u8) -> Result<()> {
            if self.fail_transfers {
                return Err(Error::SpiTransferFailed);
            }
            self.combined_writes += 1;
            if !self.drop_writes {
                self.sr1 = sr1 & 0xFC;
                self.sr2 = Some(sr2);
            }
            Ok(())
        }

        fn read_config(&mut self) -> Result<u8> {
            self.config_reads += 1;
            Ok(self.config)
        }
    }

    #[test]
    fn enable_single_register_sets_srp0() {
        let chip = find_chip("EN25Q128").unwrap();
        let mut regs = MockRegisters::new(0x00, None);

        enable(&mut regs, chip).unwrap();

        assert_eq!(regs.sr1, 0x80);
        assert_eq!(regs.sr1_writes, 1);
        assert_eq!(regs.combined_writes, 0);
        assert_eq!(regs.sr2_reads, 0);
    }

    #[test]
    fn enable_fails_when_readback_mismatches() {
        // EN25Q128 with mask 0x9C: a readback of 0x00 against a target of
        // 0x80 differs under the mask and must fail
        let chip = find_chip("EN25Q128").unwrap();
        let mut regs = MockRegisters::new(0x00, None);
        regs.drop_writes = true;

        assert!(enable(&mut regs, chip).is_err());
        assert_eq!(regs.sr1_writes, 1);
    }

    #[test]
    fn enable_aborts_on_permanent_lock_without_writing() {
        let chip = find_chip("GD25Q256D").unwrap();
        let mut regs = MockRegisters::new(0x00, Some(0x01));

        assert!(enable(&mut regs, chip).is_err());
        assert_eq!(regs.total_sr1_writes(), 0);
    }

    #[test]
    fn enable_short_circuits_when_already_enabled() {
        let chip = find_chip("GD25Q256D").unwrap();
        let mut regs = MockRegisters::new(0x80, Some(0x00));

        enable(&mut regs, chip).unwrap();
        assert_eq!(regs.total_sr1_writes(), 0);
    }

    #[test]
    fn enable_dual_register_preserves_sr2() {
        let chip = find_chip("W25Q64").unwrap();
        // QE and CMP set; both must survive the combined write
        let mut regs = MockRegisters::new(0x14, Some(0x42));

        enable(&mut regs, chip).unwrap();

        assert_eq!(regs.sr1, 0x94);
        assert_eq!(regs.sr2, Some(0x42));
        assert_eq!(regs.combined_writes, 1);
        assert_eq!(regs.sr1_writes, 0);
    }

    #[test]
    fn enable_separate_tb_register_uses_plain_sr1_write() {
        let chip = find_chip("MX25L25635F").unwrap();
        let mut regs = MockRegisters::new(0x00, None);

        enable(&mut regs, chip).unwrap();

        assert_eq!(regs.sr1, 0x80);
        assert_eq!(regs.sr1_writes, 1);
        // enable/disable never touch the configuration register
        assert_eq!(regs.config_reads, 0);
    }

    #[test]
    fn disable_never_reads_sr2() {
        let chip = find_chip("GD25Q256D").unwrap();
        let mut regs = MockRegisters::new(0x80, Some(0x00));

        disable(&mut regs, chip).unwrap();

        assert_eq!(regs.sr1, 0x00);
        assert_eq!(regs.sr2_reads, 0);
        // plain SR1 write even though the chip has SR2
        assert_eq!(regs.sr1_writes, 1);
        assert_eq!(regs.combined_writes, 0);
    }

    #[test]
    fn disable_preserves_range_bits() {
        let chip = find_chip("EN25Q128").unwrap();
        let mut regs = MockRegisters::new(0x9C, None);

        disable(&mut regs, chip).unwrap();
        assert_eq!(regs.sr1, 0x1C);
    }

    #[test]
    fn enable_disable_round_trip() {
        let chip = find_chip("W25Q64").unwrap();
        let mut regs = MockRegisters::new(0x14, Some(0x02));

        enable(&mut regs, chip).unwrap();
        assert_eq!(regs.sr1 & 0x80, 0x80);

        disable(&mut regs, chip).unwrap();
        assert_eq!(regs.sr1, 0x14);
    }

    #[test]
    fn verify_is_masked_not_exact() {
        // BUSY/WEL churn in the readback must not fail verification
        let chip = find_chip("EN25Q128").unwrap();
        let mut regs = MockRegisters::new(0x00, None);
        regs.readback_noise = 0x03;

        enable(&mut regs, chip).unwrap();
    }

    #[test]
    fn transport_failure_is_opaque() {
        let chip = find_chip("EN25Q128").unwrap();
        let mut regs = MockRegisters::new(0x00, None);
        regs.fail_transfers = true;

        let err = enable(&mut regs, chip).unwrap_err();
        assert!(!err.diagnostic().is_empty());
        assert!(disable(&mut regs, chip).is_err());
    }

    #[test]
    fn status_reports_either_lock_bit() {
        let chip = find_chip("W25Q64").unwrap();

        let mut regs = MockRegisters::new(0x00, Some(0x00));
        assert!(!status(&mut regs, chip).unwrap().enabled());

        let mut regs = MockRegisters::new(0x80, Some(0x00));
        assert!(status(&mut regs, chip).unwrap().enabled());

        // SRP1 alone counts as enabled even with SRP0 clear
        let mut regs = MockRegisters::new(0x00, Some(0x01));
        assert!(status(&mut regs, chip).unwrap().enabled());
    }

    #[test]
    fn status_skips_sr2_on_single_register_chips() {
        let chip = find_chip("EN25Q128").unwrap();
        let mut regs = MockRegisters::new(0x80, None);

        let st = status(&mut regs, chip).unwrap();
        assert_eq!(st.sr2, None);
        assert!(st.enabled());
        assert_eq!(regs.sr2_reads, 0);
    }
}
