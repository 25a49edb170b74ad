//! Static capability table and chip resolver
//!
//! Family assignments and masks come from vendor datasheets. Three layout
//! groups cover the supported models:
//!
//! - `Single`: one status register, SRP0 at bit 7, verified with the
//!   standard SRP0+BP mask
//! - `Dual`: W25Q-style SR1+SR2 pairs where SR2 carries the SRP1 lock bit
//!   and (usually) CMP
//! - `SeparateTb`: Macronix chips that keep TB in the configuration
//!   register instead of SR1/SR2

use super::{RegisterLayout, WpCapability};

// Verification masks: SRP0 plus the range-selector bits the family
// actually implements. BUSY and WEL are always excluded.
const MASK_STD: u8 = 0x9C; // SRP0 + BP2..BP0
const MASK_BP4: u8 = 0xBC; // SRP0 + BP3..BP0
const MASK_BP5: u8 = 0xFC; // SRP0 + BP4..BP0

const RANGE_STD: u8 = 0x7C; // SEC + TB + BP2..BP0
const RANGE_BP4: u8 = 0x3C; // BP3..BP0
const RANGE_BP3: u8 = 0x1C; // BP2..BP0

const fn single(name: &'static str, verify_mask: u8, range_mask: u8) -> WpCapability {
    WpCapability {
        name,
        layout: RegisterLayout::Single,
        verify_mask,
        range_mask,
    }
}

const fn dual(name: &'static str) -> WpCapability {
    WpCapability {
        name,
        layout: RegisterLayout::Dual { cmp_in_sr2: true },
        verify_mask: MASK_STD,
        range_mask: RANGE_STD,
    }
}

const fn separate_tb(name: &'static str) -> WpCapability {
    WpCapability {
        name,
        layout: RegisterLayout::SeparateTb,
        verify_mask: MASK_BP4,
        range_mask: RANGE_BP4,
    }
}

/// All chip models with known write-protection capabilities
pub static WP_CHIPS: &[WpCapability] = &[
    // Winbond, single-register W25X parts
    single("W25X10", MASK_STD, RANGE_STD),
    single("W25X20", MASK_STD, RANGE_STD),
    single("W25X40", MASK_STD, RANGE_STD),
    single("W25X80", MASK_STD, RANGE_STD),
    // Winbond W25Q parts with SR2
    dual("W25Q80"),
    dual("W25Q16"),
    dual("W25Q32"),
    dual("W25Q32JW"),
    dual("W25Q64"),
    dual("W25Q64JW"),
    dual("W25Q128"),
    dual("W25Q256"),
    dual("W25Q256JV"),
    // Eon
    single("EN25F40", MASK_STD, RANGE_STD),
    single("EN25Q40", MASK_STD, RANGE_STD),
    single("EN25Q80", MASK_STD, RANGE_STD),
    single("EN25Q32", MASK_STD, RANGE_STD),
    single("EN25Q64", MASK_STD, RANGE_STD),
    single("EN25Q128", MASK_STD, RANGE_STD),
    single("EN25QH128", MASK_STD, RANGE_STD),
    single("EN25S64", MASK_STD, RANGE_STD),
    // Macronix, small parts without SR2
    single("MX25L1005", MASK_STD, RANGE_STD),
    single("MX25L2005", MASK_STD, RANGE_STD),
    single("MX25L4005", MASK_STD, RANGE_STD),
    single("MX25L8005", MASK_STD, RANGE_STD),
    single("MX25L1605", MASK_STD, RANGE_STD),
    single("MX25L3205", MASK_STD, RANGE_STD),
    single("MX25U3235E", MASK_STD, RANGE_STD),
    single("MX25U6435E", MASK_STD, RANGE_STD),
    single("MX25L6405", MASK_BP4, RANGE_BP4),
    // Macronix parts with TB in the configuration register
    separate_tb("MX25L6495F"),
    separate_tb("MX25L25635F"),
    // MX25U12835E keeps TB in the configuration register too, but its
    // status writes go through the combined W25Q-style sequence
    dual("MX25U12835E"),
    // Micron/ST
    single("N25Q064", MASK_STD, RANGE_STD),
    // GigaDevice
    single("GD25LQ32", MASK_STD, RANGE_STD),
    single("GD25Q64", MASK_STD, RANGE_STD),
    single("GD25LQ64", MASK_STD, RANGE_STD),
    single("GD25Q128", MASK_STD, RANGE_STD),
    single("GD25Q32", MASK_BP5, RANGE_STD),
    single("GD25LQ128CD", MASK_BP5, RANGE_STD),
    dual("GD25Q256D"),
    // AMIC
    single("A25L040", MASK_STD, RANGE_STD),
    // Atmel
    dual("AT25SF128A"),
    dual("AT25SL128A"),
    // Spansion
    single("S25FS128S", MASK_STD, RANGE_BP3),
    single("S25FL256S", MASK_STD, RANGE_BP3),
];

/// Look up a chip's capability descriptor by exact model name
///
/// An unresolved name means the chip is unsupported; callers decide how
/// to report that.
pub fn find_chip(name: &str) -> Option<&'static WpCapability> {
    WP_CHIPS.iter().find(|c| c.name == name)
}

/// Curated duplicate-suppression list for autodetection
///
/// Some flash chip table entries share identical vendor/model
/// identification bytes. Autodetection must always resolve to a single
/// entry, so the known collisions are blocked by name here. This is a
/// finite, hand-maintained exception set, one entry per documented
/// hardware compatibility case - never pattern matching.
pub fn is_chipname_duplicate(name: &str) -> bool {
    // "GD25B128B/GD25Q128B" and "GD25Q127C/GD25Q128C" report the same
    // vendor and model IDs; only the C entry identifies the chips that
    // ship on boards we support.
    if name == "GD25B128B/GD25Q128B" {
        return true;
    }

    // The "MX25L12805D" entry shadows identification of the other
    // MX25L128.. chips, block it.
    if name == "MX25L12805D" {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact_match() {
        let chip = find_chip("EN25Q128").unwrap();
        assert_eq!(chip.verify_mask, 0x9C);
        assert!(!chip.has_secondary_register());

        assert!(find_chip("EN25Q12").is_none());
        assert!(find_chip("en25q128").is_none());
        assert!(find_chip("").is_none());
    }

    #[test]
    fn dual_register_families() {
        for name in ["W25Q64", "GD25Q256D", "AT25SF128A", "MX25U12835E"] {
            let chip = find_chip(name).unwrap();
            assert!(chip.has_secondary_register(), "{name} should have SR2");
        }
    }

    #[test]
    fn separate_tb_families() {
        for name in ["MX25L6495F", "MX25L25635F"] {
            let chip = find_chip(name).unwrap();
            assert!(chip.config_bit3_is_tb(), "{name} keeps TB in RDCR");
            assert!(!chip.has_secondary_register());
        }
    }

    #[test]
    fn duplicate_overrides_are_literal() {
        assert!(is_chipname_duplicate("GD25B128B/GD25Q128B"));
        assert!(is_chipname_duplicate("MX25L12805D"));
        // close-but-different names are not heuristically matched
        assert!(!is_chipname_duplicate("GD25Q128B"));
        assert!(!is_chipname_duplicate("MX25L12805"));
        assert!(!is_chipname_duplicate("GD25Q256D"));
    }

    #[test]
    fn table_has_no_duplicate_names() {
        for (i, a) in WP_CHIPS.iter().enumerate() {
            for b in &WP_CHIPS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn verify_masks_never_cover_busy_or_wel() {
        for chip in WP_CHIPS {
            assert_eq!(chip.verify_mask & 0x03, 0, "{}", chip.name);
            assert_ne!(chip.verify_mask & 0x80, 0, "{} must check SRP0", chip.name);
        }
    }
}
