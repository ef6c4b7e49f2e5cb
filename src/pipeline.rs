//! End-to-end analysis of a document collection.
//!
//! The keyword profile is built once, then every document is split into
//! sections and scored independently (in parallel unless disabled). The
//! ranker is the single join point; the selected sections are analyzed in
//! parallel again and assembled into the report in rank order.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{AnalysisReport, Metadata, ScoredSection, SubsectionInsight, TextElement};
use crate::profile::{ArchetypeTables, KeywordProfile, ProfileBuilder};
use crate::relevance::{rank, score_section, DEFAULT_TOP_K};
use crate::structure::StructureExtractor;
use crate::subsection::{SubsectionAnalyzer, DEFAULT_MAX_CHARS};

/// One input document: an identifier and its text elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInput {
    /// Document identifier (usually the file name)
    pub id: String,

    /// Text elements in reading order
    pub elements: Vec<TextElement>,
}

impl DocumentInput {
    /// Create a document input.
    pub fn new(id: impl Into<String>, elements: Vec<TextElement>) -> Self {
        Self {
            id: id.into(),
            elements,
        }
    }
}

/// Options for an analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Number of sections to keep
    pub top_k: usize,

    /// Maximum length of refined passages (0 = unlimited)
    pub max_refined_chars: usize,

    /// Whether to use parallel processing
    pub parallel: bool,

    /// Size of a dedicated worker pool (0 = rayon's global pool)
    pub workers: usize,

    /// Fixed processing timestamp (defaults to the current time)
    pub timestamp: Option<DateTime<Utc>>,
}

impl AnalysisOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of sections to keep.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Set the maximum refined passage length.
    pub fn with_max_refined_chars(mut self, max: usize) -> Self {
        self.max_refined_chars = max;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Run on a dedicated pool of `n` threads.
    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    /// Use a fixed processing timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_refined_chars: DEFAULT_MAX_CHARS,
            parallel: true,
            workers: 0,
            timestamp: None,
        }
    }
}

/// The analysis pipeline.
pub struct Pipeline {
    options: AnalysisOptions,
    extractor: StructureExtractor,
    profiles: ProfileBuilder,
    analyzer: SubsectionAnalyzer,
}

impl Pipeline {
    /// Create a pipeline with the built-in archetype tables.
    pub fn new(options: AnalysisOptions) -> Self {
        let analyzer = SubsectionAnalyzer::with_max_chars(options.max_refined_chars);
        Self {
            options,
            extractor: StructureExtractor::new(),
            profiles: ProfileBuilder::new(),
            analyzer,
        }
    }

    /// Use custom archetype tables.
    pub fn with_tables(mut self, tables: ArchetypeTables) -> Self {
        self.profiles = self.profiles.with_tables(tables);
        self
    }

    /// The options in use.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Build the keyword profile for a persona and a job.
    pub fn profile(&self, persona: &str, job: &str) -> KeywordProfile {
        self.profiles.build(persona, job)
    }

    /// Extract and score the sections of one document.
    pub fn score_document(
        &self,
        index: usize,
        document: &DocumentInput,
        profile: &KeywordProfile,
    ) -> Vec<ScoredSection> {
        self.extractor
            .extract(&document.id, &document.elements)
            .into_iter()
            .enumerate()
            .map(|(sequence, section)| {
                let score = score_section(&section, profile);
                ScoredSection::new(section, index, sequence, score)
            })
            .collect()
    }

    /// Analyze a document collection.
    ///
    /// Fails only when `documents` is empty (or the worker pool cannot be
    /// built); problems with individual documents degrade gracefully.
    pub fn run(&self, documents: &[DocumentInput], persona: &str, job: &str) -> Result<AnalysisReport> {
        if documents.is_empty() {
            return Err(Error::NoDocuments);
        }

        let timestamp = self.options.timestamp.unwrap_or_else(Utc::now);
        let profile = self.profile(persona, job);

        let (ranked, insights) = if self.options.parallel && self.options.workers > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.workers)
                .build()?;
            pool.install(|| self.execute(documents, &profile))
        } else {
            self.execute(documents, &profile)
        };

        let metadata = Metadata::new(
            documents.iter().map(|d| d.id.clone()).collect(),
            persona,
            job,
            timestamp,
        );
        let mut report = AnalysisReport::new(metadata);
        for (section, insight) in ranked.iter().zip(insights) {
            report.push(section, insight);
        }

        log::debug!(
            "Ranked {} sections from {} documents",
            report.len(),
            documents.len()
        );
        Ok(report)
    }

    fn execute(
        &self,
        documents: &[DocumentInput],
        profile: &KeywordProfile,
    ) -> (Vec<ScoredSection>, Vec<SubsectionInsight>) {
        let per_document: Vec<Vec<ScoredSection>> = if self.options.parallel {
            documents
                .par_iter()
                .enumerate()
                .map(|(i, doc)| self.score_document(i, doc, profile))
                .collect()
        } else {
            documents
                .iter()
                .enumerate()
                .map(|(i, doc)| self.score_document(i, doc, profile))
                .collect()
        };

        let all: Vec<ScoredSection> = per_document.into_iter().flatten().collect();
        log::debug!("Scored {} sections", all.len());

        let ranked = rank(all, self.options.top_k);

        let insights: Vec<SubsectionInsight> = if self.options.parallel {
            ranked
                .par_iter()
                .map(|s| self.analyzer.analyze(s, profile))
                .collect()
        } else {
            ranked
                .iter()
                .map(|s| self.analyzer.analyze(s, profile))
                .collect()
        };

        (ranked, insights)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(AnalysisOptions::default())
    }
}

/// Analyze a document collection with the given options.
pub fn run(
    documents: &[DocumentInput],
    persona: &str,
    job: &str,
    options: &AnalysisOptions,
) -> Result<AnalysisReport> {
    Pipeline::new(options.clone()).run(documents, persona, job)
}
