use crate::candidates::{candidate_order, RankedCandidate};
use appdex_indexer::{priority_score, AppIndex, ScanConfig};
use std::path::Path;

/// Match-quality weights. These, not the matching algorithm, are the
/// contract: exact short-circuits, the rest pool together and rank by
/// total score (match + path priority).
pub const EXACT_SCORE: i64 = 200;
pub const PREFIX_TOKEN_SCORE: i64 = 150;
pub const ALL_TOKENS_SCORE: i64 = 200;
pub const PER_TOKEN_SCORE: i64 = 60;
pub const SPACELESS_SUBSTRING_SCORE: i64 = 100;

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Scores every indexed key against the query and returns the pooled
/// candidates, best first. An exact key match outranks every heuristic
/// candidate, but the heuristic pool still ranks behind it: if the exact
/// target fails to start, the caller has next-best candidates to retry.
pub fn rank(query: &str, index: &AppIndex, config: &ScanConfig) -> Vec<RankedCandidate> {
    let query = normalize_query(query);
    if query.is_empty() {
        return Vec::new();
    }

    let exact = index.get(&query).map(|target| {
        let priority = priority_score(config, Path::new(target));
        RankedCandidate::new(query.clone(), target.to_string(), EXACT_SCORE, priority)
    });

    let tokens: Vec<&str> = query.split_whitespace().collect();
    let spaceless = query.replace(' ', "");

    let mut pool = Vec::new();
    for (key, target) in &index.apps {
        if exact.is_some() && *key == query {
            continue;
        }
        let match_score = match_score(key, &tokens, &spaceless);
        if match_score <= 0 {
            continue;
        }
        let priority = priority_score(config, Path::new(target));
        pool.push(RankedCandidate::new(
            key.clone(),
            target.clone(),
            match_score,
            priority,
        ));
    }

    pool.sort_by(candidate_order);
    if let Some(exact) = exact {
        pool.insert(0, exact);
    }

    if log::log_enabled!(log::Level::Trace) {
        for candidate in &pool {
            log::trace!(
                "candidate {} -> {} (match {}, priority {})",
                candidate.key,
                candidate.target,
                candidate.match_score,
                candidate.priority_score
            );
        }
    }

    pool
}

fn match_score(key: &str, tokens: &[&str], spaceless_query: &str) -> i64 {
    let mut score = 0;

    if let Some(first) = tokens.first() {
        if key.starts_with(first) {
            score += PREFIX_TOKEN_SCORE;
        }
    }

    let contained = tokens.iter().filter(|token| key.contains(**token)).count();
    if !tokens.is_empty() && contained == tokens.len() {
        score += ALL_TOKENS_SCORE;
    } else {
        score += contained as i64 * PER_TOKEN_SCORE;
    }

    if key.replace(' ', "").contains(spaceless_query) {
        score += SPACELESS_SUBSTRING_SCORE;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn index(entries: &[(&str, &str)]) -> AppIndex {
        AppIndex::new(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    fn config() -> ScanConfig {
        ScanConfig {
            priority_prefixes: vec!["/apps".into()],
            library_segments: Vec::new(),
            ..ScanConfig::default()
        }
    }

    #[test]
    fn exact_match_ranks_first() {
        let index = index(&[("notepad", "/path/a"), ("notepad plus", "/path/b")]);
        let ranked = rank("notepad", &index, &config());

        assert_eq!(ranked[0].target, "/path/a");
        assert_eq!(ranked[0].match_score, EXACT_SCORE);
    }

    #[test]
    fn exact_match_keeps_heuristic_candidates_behind_it() {
        // "notepad plus" scores 450 through the heuristics, but the exact
        // key must stay on top while the rest remain available for retry.
        let index = index(&[("notepad", "/path/a"), ("notepad plus", "/path/b")]);
        let ranked = rank("notepad", &index, &config());

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].key, "notepad");
        assert_eq!(ranked[1].target, "/path/b");
    }

    #[test]
    fn space_insensitive_substring_matches() {
        let index = index(&[("taskmanager", "/path/a")]);
        let ranked = rank("task manager", &index, &config());

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].target, "/path/a");
        assert!(ranked[0].match_score >= SPACELESS_SUBSTRING_SCORE);
    }

    #[test]
    fn all_tokens_beat_partial_tokens() {
        let index = index(&[
            ("visual studio code", "/path/code"),
            ("visual viewer", "/path/viewer"),
        ]);
        let ranked = rank("visual studio", &index, &config());

        assert_eq!(ranked[0].target, "/path/code");
        assert!(ranked[0].match_score > ranked[1].match_score);
    }

    #[test]
    fn priority_bonus_breaks_equal_matches() {
        let index = index(&[
            ("media player classic", "/elsewhere/mpc"),
            ("media player deluxe", "/apps/mpd"),
        ]);
        let ranked = rank("media player", &index, &config());

        assert_eq!(ranked[0].target, "/apps/mpd");
        assert_eq!(ranked[0].match_score, ranked[1].match_score);
        assert!(ranked[0].priority_score > ranked[1].priority_score);
    }

    #[test]
    fn unrelated_query_yields_empty_pool() {
        let index = index(&[("notepad", "/path/a")]);
        assert!(rank("zzqqxx", &index, &config()).is_empty());
    }

    #[test]
    fn empty_query_yields_nothing() {
        let index = index(&[("notepad", "/path/a")]);
        assert!(rank("   ", &index, &config()).is_empty());
    }

    #[test]
    fn query_is_normalized_before_matching() {
        let index = index(&[("notepad", "/path/a")]);
        let ranked = rank("  NotePad  ", &index, &config());
        assert_eq!(ranked[0].match_score, EXACT_SCORE);
    }
}
