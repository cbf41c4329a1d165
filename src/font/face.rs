//! Font face records
//!
//! A `Face` is one installed font resource as reported by the
//! enumeration source. Faces are immutable once enumerated.

use std::fmt;
use std::path::PathBuf;

/// A single discoverable font face
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Face {
    /// Family name (e.g. "Menlo")
    pub family: String,
    /// Style name (e.g. "Bold Italic")
    pub style: String,
    /// Unique identifier assigned by the catalog (PostScript name)
    pub postscript_name: String,
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
    /// Font file, when the enumeration source reports one
    pub path: Option<PathBuf>,
}

impl Face {
    /// Create a face without a file path
    pub fn new(
        family: impl Into<String>,
        style: impl Into<String>,
        postscript_name: impl Into<String>,
        bold: bool,
        italic: bool,
        monospace: bool,
    ) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
            postscript_name: postscript_name.into(),
            bold,
            italic,
            monospace,
            path: None,
        }
    }

    /// Attach the font file path
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// "family style", trimmed (the user-facing full name)
    pub fn full_name(&self) -> String {
        format!("{} {}", self.family, self.style).trim().to_string()
    }

    /// True if the face carries exactly the requested style flags
    #[inline]
    pub fn has_style(&self, bold: bool, italic: bool) -> bool {
        self.bold == bold && self.italic == italic
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name(), self.postscript_name)?;
        if let Some(path) = &self.path {
            write!(f, " [{}]", path.display())?;
        }
        Ok(())
    }
}
