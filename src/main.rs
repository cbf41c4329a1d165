//! fontmatch - deterministic font face resolution
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │   Enumeration (fontconfig) →  Catalog    │
//! │                               ↓          │
//! │  Config → Family Resolver → Matcher      │
//! │                               ↓          │
//! │               Style Slots (medium/bold/  │
//! │               italic/bold-italic)        │
//! └──────────────────────────────────────────┘
//! ```

mod config;
mod constants;
mod font;

use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use std::collections::BTreeMap;

use font::{CatalogIndex, FontResolver};

fn print_help() {
    println!(
        r#"fontmatch {} - deterministic font face resolution

USAGE:
    fontmatch [OPTIONS]

OPTIONS:
    -h, --help              Print this help message
    -V, --version           Print version information
    --match FAMILY          Resolve a single family, PostScript or full name
    --bold                  With --match: request the bold style
    --italic                With --match: request the italic style
    --list-fonts            List installed fonts grouped by family
    --psnames               With --list-fonts: show PostScript names
    --init-config           Generate the default config file
    -f, --force             Overwrite config file without confirmation
    --watch                 Re-resolve the style slots when the config changes

EXAMPLES:
    fontmatch                             Print the faces for all four style slots
    fontmatch --match "Fira Code" --bold  Resolve one family in bold
    fontmatch --list-fonts --psnames      List fonts with PostScript names

CONFIG FILE:
    ~/.config/fontmatch/config.toml (override with FONTMATCH_CONFIG)
"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Shared catalog of installed faces
fn catalog() -> Result<&'static CatalogIndex> {
    font::shared_index(font::enumerate_faces).context("Failed to build font catalog")
}

/// Resolve and print all style slots for the given config
fn print_slots(cfg: &config::Config) -> Result<()> {
    let index = catalog()?;
    let mut resolver = FontResolver::new(index, &cfg.font.fallback_family);
    let slots = resolver.resolve_all(&cfg.font)?;
    for (slot, face) in slots.iter() {
        println!("{:<8} {}", slot.name(), face);
    }
    Ok(())
}

/// Resolve one family; "auto" refers to the configured main family
fn print_match(cfg: &config::Config, family: &str, bold: bool, italic: bool) -> Result<()> {
    let index = catalog()?;
    let mut resolver = FontResolver::new(index, &cfg.font.fallback_family);
    // Only needed to give "auto" a main family; a broken slot setup
    // must not block the query itself
    if let Err(e) = resolver.resolve_all(&cfg.font) {
        warn!("Configured fonts could not be resolved: {}", e);
    }

    let outcome = if !bold && !italic {
        resolver.font_for_family(family)?.0
    } else {
        resolver.find(family, bold, italic)?
    };

    let face = outcome.face();
    println!("{}", face);
    println!("bold={} italic={}", face.bold, face.italic);
    if outcome.is_fallback() {
        println!("(\"{}\" is not installed, used {})", family, resolver.fallback_family());
    }
    Ok(())
}

/// Value following `flag`, rejecting another option in its place
fn option_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    let Some(pos) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    match args.get(pos + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
        _ => Err(anyhow!("{} requires a font name", flag)),
    }
}

/// List fonts grouped by family, like `fc-list : family`
fn print_font_list(psnames: bool) -> Result<()> {
    let index = catalog()?;
    let mut groups: BTreeMap<String, Vec<font::ListedFont>> = BTreeMap::new();
    for listed in font::list_fonts(index) {
        groups
            .entry(listed.family.to_lowercase())
            .or_default()
            .push(listed);
    }

    for fonts in groups.values_mut() {
        fonts.sort_by(|a, b| a.full_name.to_lowercase().cmp(&b.full_name.to_lowercase()));
        fonts.dedup_by(|a, b| a.full_name == b.full_name && a.postscript_name == b.postscript_name);

        let marker = if fonts.iter().any(|f| f.is_monospace) { " (monospace)" } else { "" };
        println!("{}{}", fonts[0].family, marker);
        for f in fonts.iter() {
            if psnames {
                println!("    {} ({})", f.full_name, f.postscript_name);
            } else {
                println!("    {}", f.full_name);
            }
        }
        println!();
    }
    Ok(())
}

/// Write the default config, asking before overwriting
fn init_config(force: bool) -> Result<()> {
    let config_path = config::default_config_path()
        .ok_or_else(|| anyhow!("Config directory not found"))?;

    if config_path.exists() && !force {
        println!("Config file already exists: {}", config_path.display());
        print!("Overwrite? [y/N]: ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let input = input.trim().to_lowercase();

        if input != "y" && input != "yes" {
            println!("Aborted.");
            return Ok(());
        }
    }

    let path = config::Config::write_default_config()?;
    println!("Config file generated: {}", path.display());
    Ok(())
}

/// Print slots, then re-print whenever the config file changes
#[cfg(target_os = "linux")]
fn watch_config() -> Result<()> {
    use std::time::Duration;

    let path = config::Config::config_path()
        .or_else(config::default_config_path)
        .ok_or_else(|| anyhow!("Config directory not found"))?;
    let watcher = config::ConfigWatcher::new(&path)
        .with_context(|| format!("Failed to watch config: {}", path.display()))?;
    info!("Watching config: {}", path.display());

    print_slots(&config::Config::load())?;
    loop {
        std::thread::sleep(Duration::from_millis(constants::WATCH_POLL_INTERVAL_MS));
        if watcher.check_reload() {
            info!("Config changed, re-resolving fonts");
            println!();
            if let Err(e) = print_slots(&config::Config::load()) {
                eprintln!("Failed to resolve fonts: {:#}", e);
            }
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn watch_config() -> Result<()> {
    Err(anyhow!("--watch is only supported on Linux"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Check command line arguments
    let args: Vec<String> = std::env::args().collect();

    // --help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // --version
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("fontmatch {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.iter().any(|a| a == "--init-config") {
        let force = args.iter().any(|a| a == "--force" || a == "-f");
        return init_config(force);
    }

    if args.iter().any(|a| a == "--list-fonts") {
        let psnames = args.iter().any(|a| a == "--psnames");
        return print_font_list(psnames);
    }

    if args.iter().any(|a| a == "--watch") {
        return watch_config();
    }

    let cfg = config::Config::load();

    if let Some(family) = option_value(&args, "--match")? {
        let bold = args.iter().any(|a| a == "--bold");
        let italic = args.iter().any(|a| a == "--italic");
        return print_match(&cfg, family, bold, italic);
    }

    print_slots(&cfg)
}
