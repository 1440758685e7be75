//! # appdex Resolver
//!
//! Maps a free-text query to a launchable target using the application
//! index, through layered match strategies:
//!
//! 1. exact key match (always ranked first)
//! 2. pooled heuristics: prefix token, token containment, space-insensitive
//!    substring — ranked by match score + path priority
//! 3. fuzzy similarity over all keys (thresholded)
//! 4. builtin synonym table for OS utilities
//!
//! Launching goes through the [`Launcher`] trait; a failed launch falls
//! through to the next ranked candidate, bounded by
//! [`MAX_LAUNCH_ATTEMPTS`]. Resolution itself never errors: the caller gets
//! an [`Outcome`] that distinguishes a true miss from a launch failure.

mod builtins;
mod candidates;
mod fuzzy;
mod strategies;

pub use builtins::builtin_command;
pub use candidates::{candidate_order, RankedCandidate};
pub use fuzzy::{FuzzyScorer, FUZZY_ACCEPT_RATIO};
pub use strategies::{
    normalize_query, rank, ALL_TOKENS_SCORE, EXACT_SCORE, PER_TOKEN_SCORE, PREFIX_TOKEN_SCORE,
    SPACELESS_SUBSTRING_SCORE,
};

use appdex_indexer::{AppIndex, ScanConfig};
use thiserror::Error;

/// Ranked candidates tried before giving up on a query.
pub const MAX_LAUNCH_ATTEMPTS: usize = 5;

/// Boundary error returned by [`Launcher`] implementations. The resolver
/// only cares that the attempt failed; the message is for the log.
#[derive(Error, Debug)]
#[error("launch failed: {0}")]
pub struct LaunchError(pub String);

/// Process-spawn boundary. Implementations start the target as a new OS
/// process (or hand it to the OS default-open mechanism) and report
/// success or failure.
pub trait Launcher {
    fn launch(&self, target: &str) -> Result<(), LaunchError>;
}

/// Terminal result of resolving and launching one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Launched { key: String, target: String },
    /// No strategy, fuzzy pass, or builtin produced a candidate. A refresh
    /// may help if the app was installed after the last scan.
    NotFound,
    /// Candidates existed but none of them started.
    LaunchFailed { attempts: usize },
}

/// Full candidate list for a query: strategy pool first; if that is empty,
/// the fuzzy pass may contribute a single candidate; the builtin table is
/// the last resort. Never errors, only returns fewer candidates.
pub fn resolve(query: &str, index: &AppIndex, config: &ScanConfig) -> Vec<RankedCandidate> {
    let pool = rank(query, index, config);
    if !pool.is_empty() {
        return pool;
    }

    let normalized = normalize_query(query);
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut scorer = FuzzyScorer::new();
    if let Some((key, target, ratio)) = scorer.best_match(&normalized, index) {
        log::debug!("fuzzy match {normalized:?} -> {key} (ratio {ratio:.2})");
        return vec![RankedCandidate::new(
            key.to_string(),
            target.to_string(),
            (ratio * 100.0) as i64,
            0,
        )];
    }

    if let Some(command) = builtin_command(&normalized) {
        return vec![RankedCandidate::new(normalized, command.to_string(), 0, 0)];
    }

    Vec::new()
}

/// Resolves `query` and attempts the ranked candidates in order, up to
/// [`MAX_LAUNCH_ATTEMPTS`].
pub fn open(
    query: &str,
    index: &AppIndex,
    config: &ScanConfig,
    launcher: &dyn Launcher,
) -> Outcome {
    let candidates = resolve(query, index, config);
    if candidates.is_empty() {
        log::info!("no match for {query:?}");
        return Outcome::NotFound;
    }

    let mut attempts = 0;
    for candidate in candidates.iter().take(MAX_LAUNCH_ATTEMPTS) {
        attempts += 1;
        log::info!("trying {} -> {}", candidate.key, candidate.target);
        match launcher.launch(&candidate.target) {
            Ok(()) => {
                return Outcome::Launched {
                    key: candidate.key.clone(),
                    target: candidate.target.clone(),
                }
            }
            Err(err) => log::warn!("launch of {} failed: {err}", candidate.target),
        }
    }

    Outcome::LaunchFailed { attempts }
}
