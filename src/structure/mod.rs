//! Document structure extraction.
//!
//! Turns a flat list of positioned text elements into an ordered list of
//! sections: font statistics assign heading levels, the classifier decides
//! which elements are headings, and the extractor attaches body text.

pub mod classify;
pub mod extractor;
pub mod fonts;

pub use classify::{Furniture, HeadingClassifier, ACCEPT_THRESHOLD};
pub use extractor::StructureExtractor;
pub use fonts::{level_table, FontBand, FontBands, LevelTable};
