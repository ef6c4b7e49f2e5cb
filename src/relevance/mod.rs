//! Section scoring and global ranking.

pub mod ranker;
pub mod scorer;

pub use ranker::{rank, DEFAULT_TOP_K};
pub use scorer::{breakdown, score_passage, score_section, ScoreBreakdown};
