//! Face matching
//!
//! Exact PostScript / full-name lookup first, then family-level bi-style
//! matching, then the fallback family.

use log::warn;

use super::catalog::{CatalogIndex, Selector};
use super::error::{FontError, FontResult};
use super::face::Face;
use crate::constants::DEFAULT_FALLBACK_FAMILY;

/// Result of a successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Requested name matched a face or family in the catalog
    Found(Face),
    /// Requested family was absent; face comes from the fallback family
    UsedFallback(Face),
}

impl MatchOutcome {
    pub fn face(&self) -> &Face {
        match self {
            MatchOutcome::Found(face) | MatchOutcome::UsedFallback(face) => face,
        }
    }

    pub fn into_face(self) -> Face {
        match self {
            MatchOutcome::Found(face) | MatchOutcome::UsedFallback(face) => face,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, MatchOutcome::UsedFallback(_))
    }
}

/// Lowercase and collapse whitespace runs into single spaces
pub fn normalize_family(family: &str) -> String {
    let lower = family.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut in_space = false;
    for ch in lower.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

/// Rank for exact-phase candidates: (style match, monospace)
fn score(face: &Face, bold: bool, italic: bool) -> (u8, u8) {
    (face.has_style(bold, italic) as u8, face.monospace as u8)
}

/// Prefer the exact style, then regular, then the first face
pub fn bi_match<'a>(faces: &[&'a Face], bold: bool, italic: bool) -> Option<&'a Face> {
    [(bold, italic), (false, false)]
        .iter()
        .find_map(|&(b, i)| faces.iter().copied().find(|f| f.has_style(b, i)))
        .or_else(|| faces.first().copied())
}

/// Find the best face for `family` using the platform fallback family
pub fn find_best_match(
    family: &str,
    bold: bool,
    italic: bool,
    index: &CatalogIndex,
) -> FontResult<MatchOutcome> {
    find_best_match_with(family, bold, italic, index, DEFAULT_FALLBACK_FAMILY)
}

/// Find the best face for `family`, falling back to `fallback_family`
pub fn find_best_match_with(
    family: &str,
    bold: bool,
    italic: bool,
    index: &CatalogIndex,
    fallback_family: &str,
) -> FontResult<MatchOutcome> {
    let query = normalize_family(family);

    for selector in [Selector::PostScript, Selector::Full] {
        // max_by_key keeps the last of equal maxima, same as taking the
        // tail of a stable ascending sort
        let best = index
            .candidates(selector, &query)
            .into_iter()
            .max_by_key(|f| score(f, bold, italic));
        if let Some(face) = best {
            return Ok(MatchOutcome::Found(face.clone()));
        }
    }

    let family_faces = index.candidates(Selector::Family, &query);
    if let Some(face) = bi_match(&family_faces, bold, italic) {
        return Ok(MatchOutcome::Found(face.clone()));
    }

    warn!(
        "The font {} was not found, falling back to {}",
        family, fallback_family
    );
    let fallback_faces = index.candidates(Selector::Family, &normalize_family(fallback_family));
    bi_match(&fallback_faces, bold, italic)
        .map(|face| MatchOutcome::UsedFallback(face.clone()))
        .ok_or_else(|| FontError::MissingFallback {
            family: fallback_family.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};

    /// Records log output per test thread
    struct CaptureLogger;

    static RECORDS: Mutex<Vec<(ThreadId, Level, String)>> = Mutex::new(Vec::new());
    static LOGGER: CaptureLogger = CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            let mut records = RECORDS.lock().unwrap_or_else(|e| e.into_inner());
            records.push((thread::current().id(), record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    /// Run `f` and return the warnings it logged on this thread
    fn warnings_during<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);

        let id = thread::current().id();
        let result = f();

        let mut records = RECORDS.lock().unwrap_or_else(|e| e.into_inner());
        let mut warnings = Vec::new();
        records.retain(|(thread, level, message)| {
            if *thread != id {
                return true;
            }
            if *level == Level::Warn {
                warnings.push(message.clone());
            }
            false
        });
        (result, warnings)
    }

    fn menlo_catalog() -> CatalogIndex {
        CatalogIndex::build(vec![
            Face::new("Menlo", "Regular", "menlo-reg", false, false, true),
            Face::new("Menlo", "Bold", "menlo-bold", true, false, true),
        ])
    }

    fn fallback() -> &'static str {
        "Menlo"
    }

    #[test]
    fn test_normalize_family() {
        assert_eq!(normalize_family("  Fira\t\tCode  "), " fira code ");
        assert_eq!(normalize_family("Fira   Code"), "fira code");
        assert_eq!(normalize_family("MENLO"), "menlo");
    }

    #[test]
    fn test_regular_monospace_exact() {
        let index = menlo_catalog();
        let outcome = find_best_match_with("Menlo", false, false, &index, fallback()).unwrap();
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.face().postscript_name, "menlo-reg");
    }

    #[test]
    fn test_full_name_scenario() {
        // "menlo" is a family key only; bold flag selects menlo-bold
        let index = menlo_catalog();
        let outcome = find_best_match_with("menlo", true, false, &index, fallback()).unwrap();
        assert_eq!(outcome, MatchOutcome::Found(index.faces()[1].clone()));

        let outcome = find_best_match_with("Menlo  Bold", false, false, &index, fallback()).unwrap();
        assert_eq!(outcome.face().postscript_name, "menlo-bold");
    }

    #[test]
    fn test_postscript_name_wins() {
        let index = menlo_catalog();
        let outcome = find_best_match_with("MENLO-BOLD", false, true, &index, fallback()).unwrap();
        assert_eq!(outcome.face().postscript_name, "menlo-bold");
    }

    #[test]
    fn test_exact_ranking_prefers_style_then_monospace() {
        let index = CatalogIndex::build(vec![
            Face::new("X", "Regular", "x", false, false, true),
            Face::new("X", "Regular", "x", true, false, false),
            Face::new("X", "Regular", "x", true, false, true),
            Face::new("X", "Regular", "x", false, false, false),
        ]);
        let face = find_best_match_with("x", true, false, &index, "X").unwrap().into_face();
        assert!(face.bold && face.monospace);

        let face = find_best_match_with("x", false, false, &index, "X").unwrap().into_face();
        assert!(!face.bold && face.monospace);
    }

    #[test]
    fn test_exact_ties_pick_last_enumerated() {
        let index = CatalogIndex::build(vec![
            Face::new("X", "Regular", "x", false, false, true).with_path("/a"),
            Face::new("X", "Regular", "x", false, false, true).with_path("/b"),
        ]);
        let face = find_best_match_with("x", false, false, &index, "X").unwrap().into_face();
        assert_eq!(face.path.as_deref(), Some(std::path::Path::new("/b")));
    }

    #[test]
    fn test_missing_family_uses_fallback() {
        let index = menlo_catalog();
        let outcome =
            find_best_match_with("Nonexistent Font", true, false, &index, fallback()).unwrap();
        assert_eq!(
            outcome,
            MatchOutcome::UsedFallback(index.faces()[1].clone())
        );

        // No bold-italic face: regular is preferred
        let outcome =
            find_best_match_with("Nonexistent Font", true, true, &index, fallback()).unwrap();
        assert!(outcome.is_fallback());
        assert_eq!(outcome.face().postscript_name, "menlo-reg");
    }

    #[test]
    fn test_fallback_logs_warning() {
        let index = menlo_catalog();
        let (outcome, warnings) =
            warnings_during(|| find_best_match_with("Nonexistent Font", true, false, &index, fallback()));
        assert!(outcome.unwrap().is_fallback());
        assert_eq!(
            warnings,
            ["The font Nonexistent Font was not found, falling back to Menlo"]
        );
    }

    #[test]
    fn test_hits_do_not_warn() {
        let index = menlo_catalog();
        let (_, warnings) = warnings_during(|| {
            find_best_match_with("menlo-bold", false, false, &index, fallback()).unwrap();
            find_best_match_with("Menlo Regular", false, false, &index, fallback()).unwrap();
            find_best_match_with("MENLO", true, true, &index, fallback()).unwrap();
        });
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_fallback_first_face_when_no_regular() {
        let index = CatalogIndex::build(vec![
            Face::new("Menlo", "Bold", "menlo-bold", true, false, true),
            Face::new("Menlo", "Bold Italic", "menlo-bi", true, true, true),
        ]);
        let outcome = find_best_match_with("Nope", false, true, &index, fallback()).unwrap();
        assert_eq!(outcome.face().postscript_name, "menlo-bold");
    }

    #[test]
    fn test_family_bi_match_without_fallback() {
        let index = CatalogIndex::build(vec![
            Face::new("Menlo", "Regular", "menlo-reg", false, false, true),
            Face::new("Fira Code", "Light", "FiraCode-Light", false, false, true),
            Face::new("Fira Code", "Bold", "FiraCode-Bold", true, false, true),
        ]);
        let outcome = find_best_match_with("Fira  code", true, false, &index, fallback()).unwrap();
        assert_eq!(
            outcome,
            MatchOutcome::Found(index.faces()[2].clone())
        );
    }

    #[test]
    fn test_missing_fallback_is_fatal() {
        let index = CatalogIndex::build(vec![Face::new(
            "Fira Code", "Regular", "FiraCode-Regular", false, false, true,
        )]);
        let err = find_best_match_with("Nope", false, false, &index, "Menlo").unwrap_err();
        assert!(matches!(err, FontError::MissingFallback { ref family } if family == "Menlo"));
    }

    #[test]
    fn test_repeated_match_is_identical() {
        let index = menlo_catalog();
        let first = find_best_match_with("menlo", true, false, &index, fallback()).unwrap();
        let second = find_best_match_with("menlo", true, false, &index, fallback()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bi_match_preference() {
        let a = Face::new("F", "Italic", "f-i", false, true, false);
        let b = Face::new("F", "Regular", "f-r", false, false, false);
        let c = Face::new("F", "Bold", "f-b", true, false, false);
        let faces = vec![&a, &b, &c];
        assert_eq!(bi_match(&faces, true, false), Some(&c));
        assert_eq!(bi_match(&faces, true, true), Some(&b));
        assert_eq!(bi_match(&[&a], true, true), Some(&a));
        assert_eq!(bi_match(&[], true, true), None);
    }
}
