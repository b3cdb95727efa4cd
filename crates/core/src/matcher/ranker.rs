use serde::Serialize;
use tracing::debug;

use crate::catalog::SearchCandidate;
use crate::filename::VideoPath;

use super::similarity::similarity_ratio;

/// Individual terms of a candidate score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// `1 / (position + 1)`, in `(0, 1]`.
    pub position: f64,
    /// 1 when both years are known and equal, else 0.
    pub year: f64,
    /// Studio name similarity, in `[0, 1]`.
    pub similarity: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.position + self.year + self.similarity
    }
}

/// A candidate with its score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub candidate: SearchCandidate,
    pub breakdown: ScoreBreakdown,
    pub score: f64,
}

/// Score a candidate at its declared position.
///
/// Range is `(0, 3]`.
pub fn score(model: &VideoPath, candidate: &SearchCandidate) -> f64 {
    breakdown(model, candidate, candidate.position).total()
}

/// Score every candidate and sort ascending by score.
///
/// Positions are taken from the sequence index. The sort is stable, so
/// equal scores keep their input order and the last element is the pick.
pub fn rank(model: &VideoPath, candidates: &[SearchCandidate]) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            let breakdown = breakdown(model, candidate, index);
            let score = breakdown.total();
            debug!(
                url = %candidate.url,
                position = breakdown.position,
                year = breakdown.year,
                similarity = breakdown.similarity,
                score,
                "Scored candidate"
            );
            ScoredCandidate {
                candidate: candidate.clone(),
                breakdown,
                score,
            }
        })
        .collect();

    scored.sort_by(|a, b| a.score.total_cmp(&b.score));
    scored
}

/// URL of the highest-scoring candidate, or `None` for an empty list.
///
/// Among tied candidates the one appearing last in the input wins.
pub fn select_best(model: &VideoPath, candidates: &[SearchCandidate]) -> Option<String> {
    rank(model, candidates)
        .pop()
        .map(|best| best.candidate.url)
}

fn breakdown(model: &VideoPath, candidate: &SearchCandidate, position: usize) -> ScoreBreakdown {
    let year = match (normalize_year(&candidate.year), normalize_year(&model.year)) {
        (Some(a), Some(b)) if a == b => 1.0,
        _ => 0.0,
    };

    let similarity = match (&candidate.company, &model.company) {
        (Some(a), Some(b)) => similarity_ratio(a, b),
        _ => 0.0,
    };

    ScoreBreakdown {
        position: 1.0 / (position as f64 + 1.0),
        year,
        similarity,
    }
}

/// Strip parenthetical formatting; blank years count as unset.
fn normalize_year(year: &Option<String>) -> Option<&str> {
    let year = year.as_deref()?.trim().trim_start_matches('(').trim_end_matches(')').trim();
    if year.is_empty() {
        None
    } else {
        Some(year)
    }
}
