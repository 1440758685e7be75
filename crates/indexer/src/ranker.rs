use crate::ScanConfig;
use std::path::Path;

/// Deterministic priority score for a candidate path.
///
/// The score is the sum of a rank-weighted bonus for every configured
/// priority prefix the path starts with (earlier prefix = bigger bonus) and
/// a flat bonus per contained game-library segment. Pure function of the
/// config and the path; used both to resolve duplicates at scan time and to
/// break ties among equally-matching names at lookup time.
pub fn priority_score(config: &ScanConfig, path: &Path) -> i64 {
    let lowered = path.to_string_lossy().to_lowercase();
    let num_prefixes = config.priority_prefixes.len() as i64;

    let mut score = 0;
    for (rank, prefix) in config.priority_prefixes.iter().enumerate() {
        let prefix = prefix.to_string_lossy().to_lowercase();
        if !prefix.is_empty() && lowered.starts_with(&prefix) {
            score += (num_prefixes - rank as i64) * 10;
        }
    }

    for segment in &config.library_segments {
        if lowered.contains(&segment.to_lowercase()) {
            score += 20;
        }
    }

    score
}
