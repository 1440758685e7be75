use appdex_indexer::AppIndex;
use nucleo_matcher::{pattern::Pattern, Matcher, Utf32String};

/// Acceptance threshold for the last-chance fuzzy pass, on a 0–1 scale.
/// A candidate below this is a miss, not a guess.
pub const FUZZY_ACCEPT_RATIO: f32 = 0.45;

/// Fuzzy matcher over index keys using nucleo-matcher.
///
/// nucleo scores are unbounded integers, so the ratio is computed against
/// the query's own self-match score: 1.0 means the key matched as well as
/// the query matches itself.
pub struct FuzzyScorer {
    matcher: Matcher,
}

impl FuzzyScorer {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// Best fuzzy match for `query` across every key, if any clears the
    /// acceptance threshold. Ties resolve to the lexicographically first
    /// key for determinism.
    pub fn best_match<'a>(
        &mut self,
        query: &str,
        index: &'a AppIndex,
    ) -> Option<(&'a str, &'a str, f32)> {
        let pattern = Pattern::parse(
            query,
            nucleo_matcher::pattern::CaseMatching::Ignore,
            nucleo_matcher::pattern::Normalization::Smart,
        );

        let self_haystack = Utf32String::from(query);
        let self_score = pattern.score(self_haystack.slice(..), &mut self.matcher)? as f32;
        if self_score <= 0.0 {
            return None;
        }

        let mut best: Option<(&str, &str, f32)> = None;
        for (key, target) in &index.apps {
            let haystack = Utf32String::from(key.as_str());
            let Some(score) = pattern.score(haystack.slice(..), &mut self.matcher) else {
                continue;
            };
            let ratio = (score as f32 / self_score).min(1.0);
            if best.as_ref().map_or(true, |(_, _, current)| ratio > *current) {
                best = Some((key.as_str(), target.as_str(), ratio));
            }
        }

        best.filter(|(_, _, ratio)| *ratio >= FUZZY_ACCEPT_RATIO)
    }
}

impl Default for FuzzyScorer {
    fn default() -> Self {
        Self::new()
    }
}
