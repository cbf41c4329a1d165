//! Global constants for fontmatch
//!
//! Consolidates alias names, fontconfig thresholds and the platform
//! fallback family to eliminate magic values throughout the codebase.

#![allow(dead_code)]

use std::ffi::CStr;

// ============================================================================
// Family Aliases
// ============================================================================

/// Alias meaning "use the main family" for bold/italic slots
pub const AUTO_ALIAS: &str = "auto";

/// Alias for the platform default monospace family (case-insensitive)
pub const MONOSPACE_ALIAS: &str = "monospace";

// ============================================================================
// Fallback Family
// ============================================================================

/// Family used when a requested family is absent from the catalog.
/// Must be installed on the host; its absence is a platform error.
#[cfg(target_os = "macos")]
pub const DEFAULT_FALLBACK_FAMILY: &str = "Menlo";

/// Family used when a requested family is absent from the catalog.
/// Must be installed on the host; its absence is a platform error.
#[cfg(not(target_os = "macos"))]
pub const DEFAULT_FALLBACK_FAMILY: &str = "DejaVu Sans Mono";

// ============================================================================
// fontconfig Properties (fontconfig.h)
// ============================================================================

/// FC_WEIGHT_BOLD: weights at or above this are treated as bold
pub const FC_WEIGHT_BOLD: i32 = 200;

/// FC_SLANT_ROMAN: any slant above this (italic, oblique) is italic
pub const FC_SLANT_ROMAN: i32 = 0;

/// FC_MONO: spacing at or above this (mono, charcell) is monospace
pub const FC_SPACING_MONO: i32 = 100;

/// Pattern property names (fontconfig.h FC_* object names)
pub const FC_FAMILY: &CStr = c"family";
pub const FC_STYLE: &CStr = c"style";
pub const FC_POSTSCRIPT_NAME: &CStr = c"postscriptname";
pub const FC_WEIGHT: &CStr = c"weight";
pub const FC_SLANT: &CStr = c"slant";
pub const FC_SPACING: &CStr = c"spacing";
pub const FC_FILE: &CStr = c"file";

// ============================================================================
// Configuration
// ============================================================================

/// Environment variable overriding the config file path
pub const CONFIG_ENV_VAR: &str = "FONTMATCH_CONFIG";

/// Directory name under the user/system config directories
pub const CONFIG_DIR_NAME: &str = "fontmatch";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Poll interval for --watch mode in milliseconds
pub const WATCH_POLL_INTERVAL_MS: u64 = 250;
