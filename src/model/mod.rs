//! Data model shared by every pipeline stage.
//!
//! Text elements come in from a decoder, sections and scores flow through
//! the ranking stages, and the report goes out to a serializer.

mod element;
mod insight;
mod report;
mod section;

pub use element::{HeadingLevel, TextElement};
pub use insight::SubsectionInsight;
pub use report::{AnalysisReport, ExtractedSection, Metadata, SubsectionAnalysis};
pub use section::{clean_title, HeadingCandidate, ScoredSection, Section};
