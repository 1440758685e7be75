use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration for one index build: where to look, what counts as a
/// launchable candidate, and what never gets indexed.
///
/// Root order matters: earlier roots carry a higher implicit priority rank,
/// and that rank must stay stable across runs so duplicate resolution is
/// deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory trees searched for launchable candidates, highest priority
    /// first.
    pub roots: Vec<PathBuf>,

    /// Path prefixes that earn a rank-weighted priority bonus.
    pub priority_prefixes: Vec<PathBuf>,

    /// Path segments marking large game libraries (flat +20 bonus each).
    pub library_segments: Vec<String>,

    /// Filename keywords that disqualify a candidate (case-insensitive).
    pub exclude_keywords: Vec<String>,

    /// Path segments holding transient / user-downloaded content; anything
    /// under them is skipped so stray installers are never indexed.
    pub transient_segments: Vec<String>,

    /// Candidate file extensions (lowercase, no dot).
    pub extensions: Vec<String>,

    /// On Unix, also treat files with the executable bit as candidates.
    pub index_unix_executables: bool,

    /// Hand-authored key → target entries seeded before scanning. These
    /// always win over discovered paths for the same key.
    pub overrides: BTreeMap<String, String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            priority_prefixes: default_priority_prefixes(),
            library_segments: vec!["steamapps".to_string()],
            exclude_keywords: ["installer", "setup", "uninstall", "update", "patch"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            transient_segments: vec!["downloads".to_string()],
            extensions: default_extensions(),
            index_unix_executables: cfg!(unix),
            overrides: BTreeMap::new(),
        }
    }
}

impl ScanConfig {
    /// Loads a config from a TOML file; unset keys fall back to the per-OS
    /// defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

#[cfg(target_os = "windows")]
fn default_roots() -> Vec<PathBuf> {
    let mut roots = vec![
        PathBuf::from(r"C:\Program Files"),
        PathBuf::from(r"C:\Program Files (x86)"),
    ];
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join("AppData").join("Local").join("Programs"));
        roots.push(home.join("AppData").join("Local"));
        roots.push(home.join("AppData").join("Roaming"));
    }
    let program_data =
        std::env::var_os("ProgramData").map_or_else(|| PathBuf::from(r"C:\ProgramData"), PathBuf::from);
    roots.push(
        program_data
            .join("Microsoft")
            .join("Windows")
            .join("Start Menu")
            .join("Programs"),
    );
    roots.push(PathBuf::from(r"C:\Program Files (x86)\Steam\steamapps\common"));
    roots
}

#[cfg(not(target_os = "windows"))]
fn default_roots() -> Vec<PathBuf> {
    let mut roots = vec![
        PathBuf::from("/usr/share/applications"),
        PathBuf::from("/usr/local/share/applications"),
    ];
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".local").join("share").join("applications"));
        roots.push(home.join("Applications"));
        if let Some(steam) = steam_library(&home) {
            roots.push(steam);
        }
    }
    roots.push(PathBuf::from("/opt"));
    if cfg!(target_os = "macos") {
        roots.push(PathBuf::from("/Applications"));
    }
    roots
}

#[cfg(not(target_os = "windows"))]
fn steam_library(home: &Path) -> Option<PathBuf> {
    let candidate = home
        .join(".local")
        .join("share")
        .join("Steam")
        .join("steamapps")
        .join("common");
    candidate.is_dir().then_some(candidate)
}

fn default_priority_prefixes() -> Vec<PathBuf> {
    // The first few roots double as priority prefixes: a duplicate under
    // "Program Files" should beat a copy buried in AppData\Local.
    default_roots().into_iter().take(4).collect()
}

#[cfg(target_os = "windows")]
fn default_extensions() -> Vec<String> {
    ["exe", "lnk", "bat", "cmd"].iter().map(|s| s.to_string()).collect()
}

#[cfg(not(target_os = "windows"))]
fn default_extensions() -> Vec<String> {
    vec!["desktop".to_string()]
}
