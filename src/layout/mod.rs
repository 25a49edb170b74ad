//! Flash layout support
//!
//! Named-region descriptions of a firmware image, as produced by the FMAP
//! locator. Write-protection tooling uses these to report which regions a
//! protected range covers.

mod fmap;
mod types;

pub use fmap::{fmap_offset, has_fmap, parse_fmap, parse_fmap_at};
pub use types::*;
