use serde::Serialize;
use std::cmp::Ordering;

/// One scored launch candidate. Match quality and path priority are kept
/// separate so ranking stays unit-testable independent of any scan.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RankedCandidate {
    pub key: String,
    pub target: String,
    pub match_score: i64,
    pub priority_score: i64,
    pub total_score: i64,
}

impl RankedCandidate {
    pub fn new(key: String, target: String, match_score: i64, priority_score: i64) -> Self {
        Self {
            total_score: match_score + priority_score,
            key,
            target,
            match_score,
            priority_score,
        }
    }
}

/// Total order over candidates: higher total score first, then key order so
/// equal scores rank deterministically regardless of enumeration order.
pub fn candidate_order(a: &RankedCandidate, b: &RankedCandidate) -> Ordering {
    b.total_score
        .cmp(&a.total_score)
        .then_with(|| a.key.cmp(&b.key))
}
