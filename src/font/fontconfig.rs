//! fontconfig integration
//!
//! Enumerate installed faces

use fontconfig::{list_fonts, Fontconfig, ObjectSet, Pattern};
use log::info;

use super::error::{FontError, FontResult};
use super::face::Face;
use crate::constants::{
    FC_FAMILY, FC_FILE, FC_POSTSCRIPT_NAME, FC_SLANT, FC_SLANT_ROMAN, FC_SPACING,
    FC_SPACING_MONO, FC_STYLE, FC_WEIGHT, FC_WEIGHT_BOLD,
};

/// Pattern properties a `Face` is built from
#[derive(Debug, Default, Clone, Copy)]
struct FaceProperties<'a> {
    family: Option<&'a str>,
    style: Option<&'a str>,
    postscript_name: Option<&'a str>,
    weight: Option<i32>,
    slant: Option<i32>,
    spacing: Option<i32>,
    file: Option<&'a str>,
}

impl<'a> FaceProperties<'a> {
    fn from_pattern(pattern: &'a Pattern<'_>) -> Self {
        Self {
            family: pattern.get_string(FC_FAMILY),
            style: pattern.get_string(FC_STYLE),
            postscript_name: pattern.get_string(FC_POSTSCRIPT_NAME),
            weight: pattern.get_int(FC_WEIGHT),
            slant: pattern.get_int(FC_SLANT),
            spacing: pattern.get_int(FC_SPACING),
            file: pattern.get_string(FC_FILE),
        }
    }

    /// Missing values read as empty / 0 (regular, roman, proportional).
    /// Variable fonts report weight as a range, which has no integer value.
    fn into_face(self) -> Face {
        let face = Face::new(
            self.family.unwrap_or_default(),
            self.style.unwrap_or_default(),
            self.postscript_name.unwrap_or_default(),
            self.weight.unwrap_or(0) >= FC_WEIGHT_BOLD,
            self.slant.unwrap_or(FC_SLANT_ROMAN) > FC_SLANT_ROMAN,
            self.spacing.unwrap_or(0) >= FC_SPACING_MONO,
        );
        match self.file {
            Some(path) if !path.is_empty() => face.with_path(path),
            _ => face,
        }
    }
}

/// List every installed face, in fontconfig's order
pub fn enumerate_faces() -> FontResult<Vec<Face>> {
    let fc = Fontconfig::new().ok_or_else(|| FontError::Enumeration {
        message: "fontconfig initialization failed".to_string(),
    })?;

    let pattern = Pattern::new(&fc);
    let mut objects = ObjectSet::new(&fc);
    for property in [
        FC_FAMILY,
        FC_STYLE,
        FC_POSTSCRIPT_NAME,
        FC_WEIGHT,
        FC_SLANT,
        FC_SPACING,
        FC_FILE,
    ] {
        objects.add(property);
    }

    let faces: Vec<Face> = list_fonts(&pattern, Some(&objects))
        .iter()
        .map(|p| FaceProperties::from_pattern(&p).into_face())
        .collect();
    info!("fontconfig: enumerated {} faces", faces.len());
    Ok(faces)
}
