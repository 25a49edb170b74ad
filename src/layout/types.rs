//! Layout types

use alloc::string::String;
use alloc::vec::Vec;

/// A named region within a flash chip
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// Name of the region
    pub name: String,
    /// Start address (inclusive)
    pub start: u32,
    /// End address (inclusive)
    pub end: u32,
    /// Whether this region is read-only
    #[cfg_attr(feature = "std", serde(default))]
    pub readonly: bool,
}

impl Region {
    /// Create a new region
    pub fn new(name: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            readonly: false,
        }
    }

    /// Get the size of this region in bytes
    pub fn size(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Check if an address is within this region
    pub fn contains(&self, addr: u32) -> bool {
        addr >= self.start && addr <= self.end
    }
}

/// A flash memory layout containing named regions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Optional name for this layout
    pub name: Option<String>,
    /// Regions in this layout
    pub regions: Vec<Region>,
}

impl Layout {
    /// Create a new empty layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region to the layout
    pub fn add_region(&mut self, region: Region) {
        self.regions.push(region);
    }

    /// Find a region by name
    pub fn find_region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Sort regions by start address
    pub fn sort_by_address(&mut self) {
        self.regions.sort_by_key(|r| r.start);
    }
}

/// Errors that can occur when working with layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// No structurally valid FMAP found in the buffer
    FmapNotFound,
    /// The FMAP at the given offset failed structural validation
    InvalidFmap,
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FmapNotFound => write!(f, "no valid FMAP found"),
            Self::InvalidFmap => write!(f, "FMAP failed structural validation"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}
