//! Font face resolution
//!
//! Handles:
//! - Face enumeration (fontconfig)
//! - Catalog indexing (family, PostScript name, full name)
//! - Best-match selection with fallback family
//! - Alias resolution and style slot assignment

pub mod catalog;
pub mod error;
pub mod face;
pub mod fontconfig;
pub mod matcher;
pub mod resolver;

// Re-export for convenience (allow unused since these are library exports)
#[allow(unused_imports)]
pub use catalog::{list_fonts, shared_index, CatalogIndex, ListedFont, Selector};
#[allow(unused_imports)]
pub use error::{FontError, FontResult};
#[allow(unused_imports)]
pub use face::Face;
#[allow(unused_imports)]
pub use fontconfig::enumerate_faces;
#[allow(unused_imports)]
pub use matcher::{find_best_match, find_best_match_with, MatchOutcome};
#[allow(unused_imports)]
pub use resolver::{resolve_family, FontResolver, Slot, StyleSlots};
