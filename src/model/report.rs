//! Final analysis report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ScoredSection, SubsectionInsight};

/// Result of analyzing a document collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Run metadata
    pub metadata: Metadata,

    /// Ranked sections, by importance rank ascending
    pub extracted_sections: Vec<ExtractedSection>,

    /// One refined passage per ranked section, same order
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl AnalysisReport {
    /// Create a report with metadata only.
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            extracted_sections: Vec::new(),
            subsection_analysis: Vec::new(),
        }
    }

    /// Add a ranked section together with its insight.
    pub fn push(&mut self, section: &ScoredSection, insight: SubsectionInsight) {
        let title = section.section.display_title();
        self.extracted_sections.push(ExtractedSection {
            document: section.section.document_id.clone(),
            section_title: title.clone(),
            importance_rank: section.importance_rank.unwrap_or(0),
            page_number: section.section.page_number,
        });
        self.subsection_analysis.push(SubsectionAnalysis {
            document: insight.document_id,
            section_title: title,
            refined_text: insight.refined_text,
            page_number: insight.page_number,
            relevance_score: insight.relevance_score,
            key_insights: insight.key_insights,
        });
    }

    /// Number of ranked sections.
    pub fn len(&self) -> usize {
        self.extracted_sections.len()
    }

    /// Check if no section was ranked.
    pub fn is_empty(&self) -> bool {
        self.extracted_sections.is_empty()
    }
}

/// Run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Input document identifiers, in input order
    pub input_documents: Vec<String>,

    /// Persona description
    pub persona: String,

    /// Job-to-be-done description
    pub job_to_be_done: String,

    /// When the run was processed
    pub processing_timestamp: DateTime<Utc>,
}

impl Metadata {
    /// Create metadata for a run.
    pub fn new(
        input_documents: Vec<String>,
        persona: impl Into<String>,
        job_to_be_done: impl Into<String>,
        processing_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            input_documents,
            persona: persona.into(),
            job_to_be_done: job_to_be_done.into(),
            processing_timestamp,
        }
    }
}

/// A ranked section entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Source document
    pub document: String,

    /// Cleaned section title
    pub section_title: String,

    /// 1-based importance rank
    pub importance_rank: u32,

    /// Page of the section heading
    pub page_number: u32,
}

/// A refined passage entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    /// Source document
    pub document: String,

    /// Cleaned section title
    pub section_title: String,

    /// Refined passage
    pub refined_text: String,

    /// Page of the section heading
    pub page_number: u32,

    /// Passage-level relevance score
    pub relevance_score: f64,

    /// Indicator sentences
    pub key_insights: Vec<String>,
}
