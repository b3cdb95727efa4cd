//! Candidate ranking.
//!
//! Picks the catalog search result that best matches a filename-derived
//! [`VideoPath`](crate::filename::VideoPath).

mod ranker;
mod similarity;

pub use ranker::{rank, score, select_best, ScoreBreakdown, ScoredCandidate};
pub use similarity::similarity_ratio;
