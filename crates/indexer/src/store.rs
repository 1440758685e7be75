use crate::{scan, Result, ScanConfig};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

pub const INDEX_SCHEMA_VERSION: u32 = 1;

/// One immutable snapshot of the name → target mapping, as persisted to the
/// cache file. Targets are absolute paths for scanned entries; seeded
/// entries (overrides, OS builtins) may hold bare shell commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppIndex {
    pub schema_version: u32,
    pub built_at_unix_ms: u64,
    pub apps: BTreeMap<String, String>,
}

impl AppIndex {
    pub fn new(apps: BTreeMap<String, String>) -> Self {
        Self {
            schema_version: INDEX_SCHEMA_VERSION,
            built_at_unix_ms: unix_now_ms(),
            apps,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.apps.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

/// Owns the cache file and the scan configuration; every mapping it hands
/// out is a complete, freshly built or freshly parsed snapshot.
pub struct IndexStore {
    config: ScanConfig,
    cache_path: PathBuf,
}

impl IndexStore {
    pub fn new(config: ScanConfig, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            cache_path: cache_path.into(),
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Reads the persisted index if present and well-formed; a missing or
    /// corrupt cache file triggers a full rebuild (and persists the result).
    pub fn load(&self) -> Result<AppIndex> {
        match std::fs::read(&self.cache_path) {
            Ok(bytes) => match serde_json::from_slice::<AppIndex>(&bytes) {
                Ok(index) if index.schema_version == INDEX_SCHEMA_VERSION => {
                    log::info!("loaded {} apps from {}", index.len(), self.cache_path.display());
                    Ok(index)
                }
                Ok(index) => {
                    log::warn!(
                        "cache schema v{} != v{INDEX_SCHEMA_VERSION}, rebuilding",
                        index.schema_version
                    );
                    self.rebuild()
                }
                Err(err) => {
                    log::warn!(
                        "corrupt cache at {}: {err}; rebuilding",
                        self.cache_path.display()
                    );
                    self.rebuild()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no cache at {}, building index", self.cache_path.display());
                self.rebuild()
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Seeds overrides and OS builtins, runs a full scan, persists the
    /// result, and returns the new mapping. The only slow operation in the
    /// system; callers invoke it explicitly (refresh) or via `load`.
    pub fn rebuild(&self) -> Result<AppIndex> {
        let mut apps = os_builtin_entries();
        for (key, target) in &self.config.overrides {
            apps.insert(key.trim().to_lowercase(), target.clone());
        }
        let protected: BTreeSet<String> = apps.keys().cloned().collect();

        for (key, path) in scan(&self.config) {
            if protected.contains(&key) {
                continue;
            }
            apps.insert(key, path);
        }

        let index = AppIndex::new(apps);
        self.persist(&index)?;
        Ok(index)
    }

    /// Serializes the mapping as pretty JSON, written to a temp file and
    /// renamed into place so a crash never leaves a half-written cache.
    pub fn persist(&self, index: &AppIndex) -> Result<()> {
        if let Some(parent) = self.cache_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(index)?;
        let tmp = self.cache_path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.cache_path)?;
        Ok(())
    }
}

/// Swappable handle over the current index snapshot. Rebuilds produce a
/// complete new `AppIndex` and replace the snapshot wholesale; readers only
/// ever observe a fully populated mapping.
#[derive(Clone)]
pub struct SharedIndex {
    inner: Arc<RwLock<Arc<AppIndex>>>,
}

impl SharedIndex {
    pub fn new(index: AppIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    pub fn snapshot(&self) -> Arc<AppIndex> {
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn replace(&self, index: AppIndex) {
        let next = Arc::new(index);
        match self.inner.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}

/// Shell commands every installation of the OS ships with, seeded into the
/// store so the common utilities resolve even before scanning finds
/// anything.
#[cfg(target_os = "windows")]
fn os_builtin_entries() -> BTreeMap<String, String> {
    [
        ("calc", "calc.exe"),
        ("notepad", "notepad.exe"),
        ("mspaint", "mspaint.exe"),
        ("explorer", "explorer.exe"),
        ("taskmgr", "taskmgr.exe"),
        ("control", "control.exe"),
        ("cmd", "cmd.exe"),
    ]
    .iter()
    .map(|(key, target)| (key.to_string(), target.to_string()))
    .collect()
}

#[cfg(not(target_os = "windows"))]
fn os_builtin_entries() -> BTreeMap<String, String> {
    [
        ("calculator", "gnome-calculator"),
        ("files", "nautilus"),
        ("settings", "gnome-control-center"),
        ("terminal", "x-terminal-emulator"),
        ("screenshot", "gnome-screenshot"),
    ]
    .iter()
    .map(|(key, target)| (key.to_string(), target.to_string()))
    .collect()
}

fn unix_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
