//! FMAP (Flash Map) locating and parsing
//!
//! FMAP is a compact binary table of contents describing named regions
//! within a firmware image. The structure can be embedded anywhere in the
//! image, so locating it is a brute-force linear scan for the signature
//! followed by structural validation.
//!
//! There is no checksum. Arbitrary binary data can contain the signature
//! bytes by accident, so every structural check doubles as a false-positive
//! filter, and a failed validation resumes the scan at the next byte.

use alloc::format;
use alloc::string::{String, ToString};

use super::{Layout, LayoutError, Region};

/// FMAP signature: "__FMAP__"
const FMAP_SIGNATURE: &[u8; 8] = b"__FMAP__";

/// Maximum supported FMAP version
const FMAP_VER_MAJOR: u8 = 1;
const FMAP_VER_MINOR: u8 = 1;

/// Maximum length of name strings, including the terminating null
const FMAP_STRLEN: usize = 32;

/// Size of the FMAP header
const FMAP_HEADER_SIZE: usize = 56;

/// Size of one FMAP area record
const FMAP_AREA_SIZE: usize = 42;

/// FMAP area flags
pub mod flags {
    /// Area is static (preserved across updates)
    pub const STATIC: u16 = 1 << 0;
    /// Area is compressed
    #[allow(dead_code)]
    pub const COMPRESSED: u16 = 1 << 1;
    /// Area is read-only
    pub const RO: u16 = 1 << 2;
}

/// Validate the FMAP structure at the start of `data`
///
/// Structural checks only: signature, supported version, declared size
/// covering the header plus all area records, and a null-terminated
/// printable space-free name. Strings containing the signature bytes tend
/// to fail the version and name checks.
fn validate_fmap(data: &[u8]) -> bool {
    if data.len() < FMAP_HEADER_SIZE {
        return false;
    }

    if &data[0..8] != FMAP_SIGNATURE {
        return false;
    }

    if data[8] > FMAP_VER_MAJOR || data[9] > FMAP_VER_MINOR {
        return false;
    }

    // The declared flash address space must be at least as large as the
    // structure it claims to describe.
    let size = u32::from_le_bytes(data[18..22].try_into().unwrap()) as usize;
    let nareas = u16::from_le_bytes([data[54], data[55]]) as usize;
    let required = FMAP_HEADER_SIZE + nareas * FMAP_AREA_SIZE;
    if size < required {
        return false;
    }

    // The whole structure must also fit in the buffer being scanned.
    if data.len() < required {
        return false;
    }

    // The name is specified to be a null-terminated single-word string
    // without spaces.
    let name = &data[22..22 + FMAP_STRLEN];
    for (i, &b) in name.iter().enumerate() {
        if b == 0 {
            break;
        }
        if !b.is_ascii_graphic() {
            return false;
        }
        if i == FMAP_STRLEN - 1 {
            // printable all the way through: no terminator
            return false;
        }
    }

    true
}

/// Brute-force linear search for a valid FMAP in `data`
fn find_fmap(data: &[u8]) -> Option<usize> {
    if data.len() < FMAP_HEADER_SIZE {
        return None;
    }

    for offset in 0..=(data.len() - FMAP_HEADER_SIZE) {
        if &data[offset..offset + 8] == FMAP_SIGNATURE && validate_fmap(&data[offset..]) {
            return Some(offset);
        }
    }

    None
}

/// Check if data contains a structurally valid FMAP
pub fn has_fmap(data: &[u8]) -> bool {
    find_fmap(data).is_some()
}

/// Find the offset of a structurally valid FMAP in data
pub fn fmap_offset(data: &[u8]) -> Option<usize> {
    find_fmap(data)
}

/// Locate and parse the first valid FMAP in raw data
pub fn parse_fmap(data: &[u8]) -> Result<Layout, LayoutError> {
    let offset = find_fmap(data).ok_or(LayoutError::FmapNotFound)?;
    parse_fmap_at(data, offset)
}

/// Parse an FMAP at a specific offset
pub fn parse_fmap_at(data: &[u8], offset: usize) -> Result<Layout, LayoutError> {
    let fmap_data = data.get(offset..).ok_or(LayoutError::InvalidFmap)?;
    if !validate_fmap(fmap_data) {
        return Err(LayoutError::InvalidFmap);
    }

    let ver_major = fmap_data[8];
    let ver_minor = fmap_data[9];
    let name = parse_fmap_string(&fmap_data[22..54]);
    let nareas = u16::from_le_bytes([fmap_data[54], fmap_data[55]]) as usize;

    let mut layout = Layout::new();
    layout.name = Some(format!("FMAP: {} (v{}.{})", name, ver_major, ver_minor));

    for i in 0..nareas {
        let area_offset = FMAP_HEADER_SIZE + i * FMAP_AREA_SIZE;
        let area = &fmap_data[area_offset..area_offset + FMAP_AREA_SIZE];

        let start = u32::from_le_bytes(area[0..4].try_into().unwrap());
        let size = u32::from_le_bytes(area[4..8].try_into().unwrap());
        let area_flags = u16::from_le_bytes([area[40], area[41]]);

        if size == 0 {
            continue;
        }

        let mut region = Region::new(parse_fmap_string(&area[8..40]), start, start + size - 1);
        region.readonly = area_flags & (flags::STATIC | flags::RO) != 0;
        layout.add_region(region);
    }

    layout.sort_by_address();
    Ok(layout)
}

/// Parse a null-terminated FMAP string
fn parse_fmap_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).to_string()
}
