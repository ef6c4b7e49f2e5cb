//! Sub-section analysis of ranked sections.
//!
//! For every selected section the body is split into passages, the passage
//! closest to the keyword profile is refined into presentable text, and
//! sentences stating findings or figures are collected as key insights.

pub mod analyzer;
pub mod insights;
pub mod refine;

pub use analyzer::{PassageCandidate, SubsectionAnalyzer};
pub use insights::InsightExtractor;
pub use refine::{RefineOptions, Refiner, DEFAULT_MAX_CHARS};
