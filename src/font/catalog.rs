//! Catalog index
//!
//! Lookup tables over the installed faces, keyed by lowercased family,
//! PostScript name and "family style". Built once per process and
//! read-only afterwards.

use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use super::error::FontResult;
use super::face::Face;

/// Which lookup table to search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Lowercased family name
    Family,
    /// Lowercased PostScript name
    PostScript,
    /// Lowercased "family style"
    Full,
}

/// Face lookup tables
///
/// Faces are stored once in enumeration order; each table maps a key to
/// positions in that list, preserving insertion order per key.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    faces: Vec<Face>,
    family_map: HashMap<String, Vec<usize>>,
    ps_map: HashMap<String, Vec<usize>>,
    full_map: HashMap<String, Vec<usize>>,
}

impl CatalogIndex {
    /// Build the index from faces in enumeration order
    pub fn build(faces: Vec<Face>) -> Self {
        let mut index = Self {
            faces: Vec::with_capacity(faces.len()),
            ..Default::default()
        };

        for face in faces {
            let pos = index.faces.len();
            let family = face.family.to_lowercase();
            let style = face.style.to_lowercase();
            let ps = face.postscript_name.to_lowercase();

            index
                .full_map
                .entry(format!("{} {}", family, style))
                .or_default()
                .push(pos);
            index.family_map.entry(family).or_default().push(pos);
            index.ps_map.entry(ps).or_default().push(pos);
            index.faces.push(face);
        }

        index
    }

    fn table(&self, selector: Selector) -> &HashMap<String, Vec<usize>> {
        match selector {
            Selector::Family => &self.family_map,
            Selector::PostScript => &self.ps_map,
            Selector::Full => &self.full_map,
        }
    }

    /// Faces stored under `key`, in enumeration order (empty if absent).
    /// `key` must already be lowercased.
    pub fn candidates(&self, selector: Selector, key: &str) -> Vec<&Face> {
        self.table(selector)
            .get(key)
            .map(|positions| positions.iter().map(|&i| &self.faces[i]).collect())
            .unwrap_or_default()
    }

    /// True if `key` is present in the selected table
    #[cfg(test)]
    pub fn contains(&self, selector: Selector, key: &str) -> bool {
        self.table(selector).contains_key(key)
    }

    /// All faces in enumeration order
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

static SHARED_INDEX: OnceLock<CatalogIndex> = OnceLock::new();
static BUILD_LOCK: Mutex<()> = Mutex::new(());

/// Process-wide index, built on first call with `enumerate`.
///
/// First builds are serialized: concurrent callers wait for the one build
/// in progress. A failed enumeration leaves the cache empty so a later call
/// can retry.
pub fn shared_index<F>(enumerate: F) -> FontResult<&'static CatalogIndex>
where
    F: FnOnce() -> FontResult<Vec<Face>>,
{
    if let Some(index) = SHARED_INDEX.get() {
        return Ok(index);
    }

    let _guard = BUILD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(index) = SHARED_INDEX.get() {
        return Ok(index);
    }

    let index = CatalogIndex::build(enumerate()?);
    if index.is_empty() {
        warn!("Font catalog is empty");
    } else {
        info!("Font catalog indexed: {} faces", index.len());
    }
    Ok(SHARED_INDEX.get_or_init(|| index))
}

/// User-facing listing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFont {
    pub family: String,
    pub full_name: String,
    pub postscript_name: String,
    pub is_monospace: bool,
}

/// Listing entries for every face with a non-empty family
pub fn list_fonts(index: &CatalogIndex) -> Vec<ListedFont> {
    index
        .faces()
        .iter()
        .filter(|f| !f.family.is_empty())
        .map(|f| ListedFont {
            family: f.family.clone(),
            full_name: f.full_name(),
            postscript_name: f.postscript_name.clone(),
            is_monospace: f.monospace,
        })
        .collect()
}
