//! Configuration file management
//!
//! Loads TOML configuration files and provides font settings.
//! Default config path: ~/.config/fontmatch/config.toml

#![allow(dead_code)]

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{AUTO_ALIAS, CONFIG_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME, MONOSPACE_ALIAS};

#[cfg(target_os = "linux")]
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
#[cfg(target_os = "linux")]
use std::ffi::{OsStr, OsString};
#[cfg(target_os = "linux")]
use std::sync::mpsc;

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font settings
    pub font: FontConfig,
}

/// Font settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Main (medium) family, PostScript name, or full name.
    /// "monospace" selects the platform default monospace family
    pub family: String,
    /// Bold face ("auto" = derive from `family`)
    pub bold_font: String,
    /// Italic face ("auto" = derive from `family`)
    pub italic_font: String,
    /// Bold italic face ("auto" = derive from `family`)
    pub bold_italic_font: String,
    /// Family used when a requested family is not installed
    /// (empty = platform default)
    pub fallback_family: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: MONOSPACE_ALIAS.to_string(),
            bold_font: AUTO_ALIAS.to_string(),
            italic_font: AUTO_ALIAS.to_string(),
            bold_italic_font: AUTO_ALIAS.to_string(),
            fallback_family: String::new(),
        }
    }
}

impl Config {
    /// System-wide config path
    const SYSTEM_CONFIG_PATH: &'static str = "/etc/fontmatch/config.toml";

    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. FONTMATCH_CONFIG environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
        }

        // 2. User config: ~/.config/fontmatch/config.toml
        if let Some(config_path) = default_config_path() {
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // 3. System config: /etc/fontmatch/config.toml
        let system_config = Path::new(Self::SYSTEM_CONFIG_PATH);
        if system_config.exists() {
            return Some(system_config.to_path_buf());
        }

        None
    }

    /// Load configuration with priority:
    /// 1. FONTMATCH_CONFIG environment variable
    /// 2. ~/.config/fontmatch/config.toml (user config)
    /// 3. /etc/fontmatch/config.toml (system config)
    /// 4. Built-in defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write the commented default config to `path`
    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }
        std::fs::write(path, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Write default config to the user config path
    pub fn write_default_config() -> Result<PathBuf> {
        let config_path =
            default_config_path().ok_or_else(|| anyhow::anyhow!("Config directory not found"))?;
        Self::write_template(&config_path)?;
        Ok(config_path)
    }
}

const CONFIG_TEMPLATE: &str = r#"# fontmatch configuration file
# Location: ~/.config/fontmatch/config.toml

# =============================================================================
# Font Settings
# =============================================================================
# Each value may be a family name ("Fira Code"), a full name
# ("Fira Code Retina") or a PostScript name ("FiraCode-Bold").
# Matching is case-insensitive and ignores repeated whitespace.
[font]
# "monospace" selects the platform default monospace family
family = "monospace"

# "auto" derives the face from `family` with the slot's style
bold_font = "auto"
italic_font = "auto"
bold_italic_font = "auto"

# Used when a requested family is not installed (empty = platform default:
# Menlo on macOS, DejaVu Sans Mono elsewhere)
fallback_family = ""
"#;

/// Reload notifications for one config file (Linux only)
///
/// The parent directory is watched so editors that save through a rename
/// are still seen. Events for other files in that directory are ignored.
#[cfg(target_os = "linux")]
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<()>,
}

/// True if `event` creates or modifies a file named `file_name`
#[cfg(target_os = "linux")]
fn touches_config(event: &Event, file_name: &OsStr) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name))
}

#[cfg(target_os = "linux")]
impl ConfigWatcher {
    pub fn new(config_path: &Path) -> Result<Self> {
        let file_name: OsString = config_path
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_else(|| OsString::from(CONFIG_FILE_NAME));
        let dir = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, rx) = mpsc::channel();
        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<Event>| match res {
                Ok(event) if touches_config(&event, &file_name) => {
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(e) => warn!("Config watch error: {}", e),
            })
            .context("Failed to create config watcher")?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking. Drains queued events so one save reports one reload.
    pub fn check_reload(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}

/// Get default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
