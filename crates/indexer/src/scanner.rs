use crate::{priority_score, ScanConfig};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;
use walkdir::WalkDir;

/// Walks every configured root and returns the discovered key → path
/// mapping. Key collisions are resolved by priority score (strictly higher
/// wins, first-seen keeps ties). All I/O errors are logged and skipped; a
/// missing or unreadable root never fails the scan.
///
/// Decisions are metadata-only: no file contents are read, so a full pass
/// over hundreds of thousands of entries stays cheap.
pub fn scan(config: &ScanConfig) -> BTreeMap<String, String> {
    let started = Instant::now();
    let mut apps: BTreeMap<String, String> = BTreeMap::new();

    for root in &config.roots {
        if !root.exists() {
            log::debug!("scan root missing, skipping: {}", root.display());
            continue;
        }

        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("unreadable entry under {}: {err}", root.display());
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !is_candidate(config, path) {
                continue;
            }
            let Some(key) = candidate_key(path) else {
                continue;
            };
            if should_skip(config, &key, path) {
                continue;
            }

            let full = path.to_string_lossy().to_string();
            match apps.get(&key) {
                Some(existing)
                    if priority_score(config, Path::new(existing))
                        >= priority_score(config, path) => {}
                _ => {
                    apps.insert(key, full);
                }
            }
        }
    }

    log::info!(
        "indexed {} apps in {:.1}s",
        apps.len(),
        started.elapsed().as_secs_f32()
    );
    apps
}

/// Normalized application key: lowercased file stem, trimmed.
fn candidate_key(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy().trim().to_lowercase();
    (!stem.is_empty()).then_some(stem)
}

fn is_candidate(config: &ScanConfig, path: &Path) -> bool {
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        let ext = ext.to_lowercase();
        if config.extensions.iter().any(|candidate| candidate == &ext) {
            return true;
        }
    }

    config.index_unix_executables && has_exec_bit(path)
}

#[cfg(unix)]
fn has_exec_bit(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn has_exec_bit(_path: &Path) -> bool {
    false
}

/// Exclusion rules: installer-style keywords in the filename, and transient
/// path segments (downloads folders) anywhere in the full path.
fn should_skip(config: &ScanConfig, key: &str, path: &Path) -> bool {
    if config.exclude_keywords.iter().any(|kw| key.contains(kw.to_lowercase().as_str())) {
        return true;
    }

    let full = path.to_string_lossy().to_lowercase();
    config
        .transient_segments
        .iter()
        .any(|segment| full.contains(segment.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn config_for(root: &Path) -> ScanConfig {
        ScanConfig {
            roots: vec![root.to_path_buf()],
            priority_prefixes: vec![root.to_path_buf()],
            extensions: vec!["exe".to_string()],
            index_unix_executables: false,
            ..ScanConfig::default()
        }
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn indexes_candidates_by_extension() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("tools").join("Notepad.exe"));
        touch(&temp.path().join("tools").join("readme.txt"));

        let apps = scan(&config_for(temp.path()));

        assert_eq!(apps.len(), 1);
        assert!(apps.contains_key("notepad"));
    }

    #[test]
    fn excludes_installer_keywords_case_insensitive() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("app").join("app.exe"));
        touch(&temp.path().join("app").join("App-Installer.exe"));
        touch(&temp.path().join("app").join("SETUP.exe"));
        touch(&temp.path().join("app").join("uninstall_helper.exe"));

        let apps = scan(&config_for(temp.path()));

        assert_eq!(apps.keys().collect::<Vec<_>>(), vec!["app"]);
    }

    #[test]
    fn skips_transient_downloads_segment() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("Downloads").join("portable.exe"));
        touch(&temp.path().join("stable").join("portable.exe"));

        let apps = scan(&config_for(temp.path()));

        assert_eq!(
            apps.get("portable").map(String::as_str),
            Some(temp.path().join("stable").join("portable.exe").to_str().unwrap())
        );
    }

    #[test]
    fn collision_keeps_higher_priority_path() {
        let temp = tempdir().unwrap();
        let high = temp.path().join("high");
        let low = temp.path().join("low");
        touch(&high.join("tool.exe"));
        touch(&low.join("tool.exe"));

        let config = ScanConfig {
            roots: vec![low.clone(), high.clone()],
            priority_prefixes: vec![high.clone()],
            extensions: vec!["exe".to_string()],
            index_unix_executables: false,
            ..ScanConfig::default()
        };
        let apps = scan(&config);

        assert_eq!(
            apps.get("tool").map(PathBuf::from),
            Some(high.join("tool.exe"))
        );
    }

    #[test]
    fn missing_root_is_not_fatal() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("app.exe"));

        let mut config = config_for(temp.path());
        config.roots.insert(0, PathBuf::from("/does/not/exist"));

        let apps = scan(&config);
        assert!(apps.contains_key("app"));
    }
}
