//! Family alias resolution and style slot assignment

use log::{debug, info};

use super::catalog::CatalogIndex;
use super::error::FontResult;
use super::face::Face;
use super::matcher::{find_best_match, find_best_match_with, MatchOutcome};
use crate::config::FontConfig;
use crate::constants::{AUTO_ALIAS, DEFAULT_FALLBACK_FAMILY, MONOSPACE_ALIAS};

/// Resolve "auto" and "monospace" using the platform fallback family
pub fn resolve_family(requested: &str, main_family: &str, bold: bool, italic: bool) -> String {
    resolve_family_with(requested, main_family, bold, italic, DEFAULT_FALLBACK_FAMILY)
}

/// Resolve family aliases:
/// - "auto" on a bold/italic slot means the main family
/// - "monospace" (any case) means `fallback_family`
pub fn resolve_family_with(
    requested: &str,
    main_family: &str,
    bold: bool,
    italic: bool,
    fallback_family: &str,
) -> String {
    let family = if requested == AUTO_ALIAS && (bold || italic) {
        main_family
    } else {
        requested
    };
    if family.eq_ignore_ascii_case(MONOSPACE_ALIAS) {
        fallback_family.to_string()
    } else {
        family.to_string()
    }
}

/// Style slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Medium,
    Bold,
    Italic,
    BoldItalic,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Medium, Slot::Bold, Slot::Italic, Slot::BoldItalic];

    /// (bold, italic) flags for this slot
    pub fn flags(self) -> (bool, bool) {
        match self {
            Slot::Medium => (false, false),
            Slot::Bold => (true, false),
            Slot::Italic => (false, true),
            Slot::BoldItalic => (true, true),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Slot::Medium => "medium",
            Slot::Bold => "bold",
            Slot::Italic => "italic",
            Slot::BoldItalic => "bi",
        }
    }

    /// Configured family name for this slot
    fn configured(self, font: &FontConfig) -> &str {
        match self {
            Slot::Medium => &font.family,
            Slot::Bold => &font.bold_font,
            Slot::Italic => &font.italic_font,
            Slot::BoldItalic => &font.bold_italic_font,
        }
    }
}

/// Resolved faces for the four style slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSlots {
    pub medium: Face,
    pub bold: Face,
    pub italic: Face,
    pub bold_italic: Face,
}

impl StyleSlots {
    pub fn get(&self, slot: Slot) -> &Face {
        match slot {
            Slot::Medium => &self.medium,
            Slot::Bold => &self.bold,
            Slot::Italic => &self.italic,
            Slot::BoldItalic => &self.bold_italic,
        }
    }

    /// (slot, face) pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Face)> {
        Slot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }
}

/// Resolves configured families against a catalog
///
/// Remembers the medium face's family after `resolve_all` so ad-hoc
/// lookups resolve "auto" the same way the slots did.
pub struct FontResolver<'a> {
    index: &'a CatalogIndex,
    /// Configured fallback family; `None` uses the platform default
    fallback_family: Option<String>,
    main_family: Option<String>,
}

impl<'a> FontResolver<'a> {
    /// Empty `fallback_family` selects the platform default
    pub fn new(index: &'a CatalogIndex, fallback_family: &str) -> Self {
        let fallback_family = Some(fallback_family.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        Self {
            index,
            fallback_family,
            main_family: None,
        }
    }

    pub fn fallback_family(&self) -> &str {
        self.fallback_family.as_deref().unwrap_or(DEFAULT_FALLBACK_FAMILY)
    }

    /// Family of the resolved medium face, once `resolve_all` has run
    #[cfg(test)]
    pub fn main_family(&self) -> Option<&str> {
        self.main_family.as_deref()
    }

    /// Resolve aliases and match `requested` with explicit style flags.
    /// "auto" refers to the resolved main family (or `requested` before
    /// `resolve_all` has run).
    pub fn find(&self, requested: &str, bold: bool, italic: bool) -> FontResult<MatchOutcome> {
        let main_family = self.main_family.as_deref().unwrap_or(requested);
        self.find_with_main(requested, main_family, bold, italic)
    }

    fn find_with_main(
        &self,
        requested: &str,
        main_family: &str,
        bold: bool,
        italic: bool,
    ) -> FontResult<MatchOutcome> {
        let outcome = match &self.fallback_family {
            Some(fallback) => {
                let family = resolve_family_with(requested, main_family, bold, italic, fallback);
                find_best_match_with(&family, bold, italic, self.index, fallback)?
            }
            None => {
                let family = resolve_family(requested, main_family, bold, italic);
                find_best_match(&family, bold, italic, self.index)?
            }
        };
        debug!(
            "Resolved \"{}\" (bold={}, italic={}) -> {}",
            requested,
            bold,
            italic,
            outcome.face()
        );
        Ok(outcome)
    }

    /// Resolve all four slots from the font configuration
    pub fn resolve_all(&mut self, font: &FontConfig) -> FontResult<StyleSlots> {
        let mut resolve_slot = |slot: Slot| -> FontResult<Face> {
            let (bold, italic) = slot.flags();
            let face = self
                .find_with_main(slot.configured(font), &font.family, bold, italic)?
                .into_face();
            if slot == Slot::Medium {
                self.main_family = Some(face.family.clone());
            }
            Ok(face)
        };

        let slots = StyleSlots {
            medium: resolve_slot(Slot::Medium)?,
            bold: resolve_slot(Slot::Bold)?,
            italic: resolve_slot(Slot::Italic)?,
            bold_italic: resolve_slot(Slot::BoldItalic)?,
        };
        info!("Main font family: {}", slots.medium.family);
        Ok(slots)
    }

    /// Resolve a family typed at runtime (regular style).
    /// Returns the outcome and the chosen face's bold/italic flags.
    pub fn font_for_family(&self, family: &str) -> FontResult<(MatchOutcome, bool, bool)> {
        let outcome = self.find(family, false, false)?;
        let (bold, italic) = (outcome.face().bold, outcome.face().italic);
        Ok((outcome, bold, italic))
    }
}
