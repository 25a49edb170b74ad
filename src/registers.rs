//! Status register access
//!
//! The write-protect controller drives chips through the small set of
//! status-register commands defined here. The trait performs no
//! interpretation; each call is one blocking register round trip whose only
//! observable side effect is physical register state.
//!
//! Uses `maybe_async` to support both sync and async transports:
//! - With the `is_sync` feature: blocking/synchronous
//! - Without it: async (for WASM or async programmer stacks)

use crate::error::Result;
use bitflags::bitflags;
use maybe_async::maybe_async;

/// Status register opcodes
///
/// RDSR2 and RDCR are manufacturer conventions (Winbond, Macronix) rather
/// than JEDEC standards, but they are stable across the supported families.
pub mod opcodes {
    /// Write Enable - required before WRSR
    pub const WREN: u8 = 0x06;
    /// Read Status Register 1
    pub const RDSR: u8 = 0x05;
    /// Read Status Register 2 (W25Q-style)
    pub const RDSR2: u8 = 0x35;
    /// Read Configuration Register (MX25L-style)
    pub const RDCR: u8 = 0x15;
    /// Write Status Register
    ///
    /// With a second data byte this also writes SR2 on chips that support
    /// the combined form.
    pub const WRSR: u8 = 0x01;
}

bitflags! {
    /// Status register 1 bits (Winbond-style layout)
    ///
    /// BP/TB/SEC select the protected address range; SRP0 latches the
    /// status register against writes while the WP# pin is active.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Sr1: u8 {
        /// Write in progress
        const BUSY = 1 << 0;
        /// Write enable latch
        const WEL  = 1 << 1;
        /// Block protect 0
        const BP0  = 1 << 2;
        /// Block protect 1
        const BP1  = 1 << 3;
        /// Block protect 2
        const BP2  = 1 << 4;
        /// Top/bottom select (block protect 3 on 4-BP-bit chips)
        const TB   = 1 << 5;
        /// Sector/block granularity select
        const SEC  = 1 << 6;
        /// Status register protect 0
        const SRP0 = 1 << 7;
    }
}

bitflags! {
    /// Status register 2 bits (W25Q-style layout)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Sr2: u8 {
        /// Status register protect 1 - power-cycle/permanent lock
        const SRP1 = 1 << 0;
        /// Quad enable
        const QE   = 1 << 1;
        /// Complement bit - inverts the protected range
        const CMP  = 1 << 6;
    }
}

/// Top/bottom bit position in the auxiliary configuration register
/// (MX25L-style chips that keep TB outside SR1/SR2)
pub const CONFIG_TB: u8 = 1 << 3;

/// Status register access for one addressed chip
///
/// Implemented by the transport layer on top of a concrete programmer.
/// Callers must serialize access: exactly one operation may be in flight,
/// and no locking is performed here.
#[maybe_async(AFIT)]
pub trait StatusRegisters {
    /// Read the primary status register (RDSR 0x05)
    async fn read_sr1(&mut self) -> Result<u8>;

    /// Write the primary status register (WREN + WRSR)
    ///
    /// WRSR performs a self-timed erase; implementations wait for the
    /// write to complete before returning.
    async fn write_sr1(&mut self, value: u8) -> Result<()>;

    /// Read the secondary status register (RDSR2 0x35)
    ///
    /// Implementations for chips without SR2 fail with
    /// [`Error::OpcodeNotSupported`](crate::Error::OpcodeNotSupported).
    async fn read_sr2(&mut self) -> Result<u8>;

    /// Write SR1 and SR2 in a single two-byte WRSR sequence
    ///
    /// W25Q-family chips latch the second data byte into SR2 when /CS is
    /// held through both bytes; the whole sequence is one transport
    /// operation.
    async fn write_sr1_sr2(&mut self, sr1: u8, sr2: u8) -> Result<()>;

    /// Read the auxiliary configuration register (RDCR 0x15)
    ///
    /// Only meaningful on families that expose TB outside SR1/SR2.
    async fn read_config(&mut self) -> Result<u8>;
}
