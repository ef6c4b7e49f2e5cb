//! # docrank
//!
//! Persona-driven section ranking for structured documents.
//!
//! Given a batch of documents (as positioned text elements from an external
//! decoder), a reader persona and a job to be done, this library finds the
//! document sections most relevant to the job, ranks them globally, and
//! extracts a refined passage and key insights for each of them.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docrank::{render, DocumentInput, DocRank};
//!
//! fn main() -> docrank::Result<()> {
//!     let documents = vec![docrank::load_document("paper.json")?];
//!
//!     let result = DocRank::new().with_top_k(5).analyze(
//!         &documents,
//!         "PhD Researcher in Computational Biology",
//!         "Prepare a literature review focusing on methodologies and datasets",
//!     )?;
//!     println!("{}", result.to_json(render::JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Structure extraction**: font bands, heading classification and
//!   section assembly ([`structure`])
//! - **Keyword profile**: persona and job terms plus archetype tables
//!   ([`profile`])
//! - **Relevance**: composite section score and global top-K ranking
//!   ([`relevance`])
//! - **Sub-section analysis**: best passage, refinement and key insights
//!   ([`subsection`])
//! - **Parallel processing**: documents and selected sections run on Rayon

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod profile;
pub mod relevance;
pub mod render;
pub mod source;
pub mod structure;
pub mod subsection;

// Re-export commonly used types
pub use config::{CollectionConfig, DocumentEntry};
pub use error::{Error, Result};
pub use model::{
    AnalysisReport, ExtractedSection, HeadingCandidate, HeadingLevel, Metadata, ScoredSection,
    Section, SubsectionAnalysis, SubsectionInsight, TextElement,
};
pub use pipeline::{AnalysisOptions, DocumentInput, Pipeline};
pub use profile::{build_profile, ArchetypeTables, KeywordProfile, ProfileBuilder};
pub use render::JsonFormat;
pub use source::{ElementSource, JsonElementSource, SourceRegistry};
pub use structure::StructureExtractor;

use std::path::Path;

use chrono::{DateTime, Utc};

/// Load a document's text elements from a file.
///
/// The document is named after the file.
///
/// # Example
///
/// ```no_run
/// use docrank::load_document;
///
/// let doc = load_document("paper.json").unwrap();
/// println!("{} elements", doc.elements.len());
/// ```
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<DocumentInput> {
    SourceRegistry::with_defaults().load_document(path.as_ref())
}

/// Split a document into sections.
pub fn extract_sections(document: &DocumentInput) -> Vec<Section> {
    StructureExtractor::new().extract(&document.id, &document.elements)
}

/// Detect the headings of a document.
pub fn outline(document: &DocumentInput) -> Vec<HeadingCandidate> {
    StructureExtractor::new().outline(&document.id, &document.elements)
}

/// Analyze documents with default options.
///
/// # Example
///
/// ```no_run
/// use docrank::{analyze, load_document};
///
/// let docs = vec![load_document("a.json")?, load_document("b.json")?];
/// let report = analyze(&docs, "Investment Analyst", "Analyze revenue trends")?;
/// println!("{} sections", report.len());
/// # Ok::<(), docrank::Error>(())
/// ```
pub fn analyze(documents: &[DocumentInput], persona: &str, job: &str) -> Result<AnalysisReport> {
    Pipeline::default().run(documents, persona, job)
}

/// Analyze a collection directory with default options.
pub fn analyze_collection<P: AsRef<Path>>(dir: P) -> Result<AnalysisReport> {
    DocRank::new()
        .analyze_collection(dir)
        .map(|result| result.report)
}

/// Builder-style API for analysis runs.
///
/// # Example
///
/// ```no_run
/// use docrank::{DocRank, JsonFormat};
///
/// let json = DocRank::new()
///     .with_top_k(10)
///     .with_max_refined_chars(300)
///     .sequential()
///     .analyze_collection("input/collection1")?
///     .to_json(JsonFormat::Pretty)?;
/// # Ok::<(), docrank::Error>(())
/// ```
pub struct DocRank {
    options: AnalysisOptions,
    tables: Option<ArchetypeTables>,
    registry: SourceRegistry,
}

impl DocRank {
    /// Create a new DocRank builder.
    pub fn new() -> Self {
        Self {
            options: AnalysisOptions::default(),
            tables: None,
            registry: SourceRegistry::with_defaults(),
        }
    }

    /// Set the number of sections to keep.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.options = self.options.with_top_k(k);
        self
    }

    /// Set the maximum refined passage length.
    pub fn with_max_refined_chars(mut self, max: usize) -> Self {
        self.options = self.options.with_max_refined_chars(max);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Run on a dedicated pool of `n` threads.
    pub fn with_workers(mut self, n: usize) -> Self {
        self.options = self.options.with_workers(n);
        self
    }

    /// Use a fixed processing timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.options = self.options.with_timestamp(timestamp);
        self
    }

    /// Use custom archetype tables.
    pub fn with_tables(mut self, tables: ArchetypeTables) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Use a custom element source registry.
    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    fn pipeline(&self) -> Pipeline {
        let pipeline = Pipeline::new(self.options.clone());
        match &self.tables {
            Some(tables) => pipeline.with_tables(tables.clone()),
            None => pipeline,
        }
    }

    /// Analyze documents already in memory.
    pub fn analyze(
        &self,
        documents: &[DocumentInput],
        persona: &str,
        job: &str,
    ) -> Result<DocRankResult> {
        let report = self.pipeline().run(documents, persona, job)?;
        Ok(DocRankResult { report })
    }

    /// Load element dumps from files and analyze them.
    pub fn analyze_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
        persona: &str,
        job: &str,
    ) -> Result<DocRankResult> {
        let documents = paths
            .iter()
            .map(|p| self.registry.load_document(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.analyze(&documents, persona, job)
    }

    /// Analyze a collection directory.
    ///
    /// Documents listed in the configuration but missing or unreadable on
    /// disk stay in the report metadata with one empty section each; the run
    /// fails only when the configuration lists no documents.
    pub fn analyze_collection<P: AsRef<Path>>(&self, dir: P) -> Result<DocRankResult> {
        let dir = dir.as_ref();
        let config = CollectionConfig::find(dir)?;
        let documents = config.load_documents(dir, &self.registry);
        self.analyze(&documents, config.persona_text(), config.job_text())
    }
}

impl Default for DocRank {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of an analysis run.
#[derive(Debug)]
pub struct DocRankResult {
    /// The analysis report
    pub report: AnalysisReport,
}

impl DocRankResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.report, format)
    }

    /// Convert to a readable ranked list.
    pub fn to_text(&self) -> String {
        render::to_text(&self.report)
    }

    /// Get the report.
    pub fn report(&self) -> &AnalysisReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docrank_builder() {
        let builder = DocRank::new()
            .with_top_k(3)
            .with_max_refined_chars(100)
            .with_workers(2)
            .sequential();

        assert_eq!(builder.options.top_k, 3);
        assert_eq!(builder.options.max_refined_chars, 100);
        assert_eq!(builder.options.workers, 2);
        assert!(!builder.options.parallel);
        assert!(builder.tables.is_none());
    }

    #[test]
    fn test_docrank_builder_default() {
        let builder = DocRank::default();
        assert_eq!(builder.options.top_k, 5);
        assert!(builder.options.parallel);
        assert!(builder.registry.supports("json"));
    }

    #[test]
    fn test_analyze_no_documents() {
        let result = DocRank::new().analyze(&[], "Analyst", "Summarize");
        assert!(matches!(result, Err(Error::NoDocuments)));
    }

    #[test]
    fn test_analyze_files_missing_file() {
        let result = DocRank::new().analyze_files(&["does-not-exist.json"], "p", "j");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_analyze_collection_missing_config() {
        let result = analyze_collection("does-not-exist");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_outline_and_sections() {
        let doc = DocumentInput::new(
            "d",
            vec![
                TextElement::new("d", 1, "Introduction", 16.0).bold().at(72.0, 72.0),
                TextElement::new("d", 1, "Some introductory words for the reader.", 11.0)
                    .at(72.0, 110.0),
            ],
        );
        assert_eq!(outline(&doc).len(), 1);
        let sections = extract_sections(&doc);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Introduction");
    }
}
