//! Sub-section insights.

use serde::{Deserialize, Serialize};

/// A refined passage extracted from a ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionInsight {
    /// Identifier of the source document
    pub document_id: String,

    /// Page of the parent section
    pub page_number: u32,

    /// Title of the parent section
    pub section_title: String,

    /// Cleaned, length-limited passage
    pub refined_text: String,

    /// Passage-level relevance score
    pub relevance_score: f64,

    /// Indicator sentences, in document order
    pub key_insights: Vec<String>,
}

impl SubsectionInsight {
    /// Create an insight with no passage (empty section body).
    pub fn empty(
        document_id: impl Into<String>,
        page_number: u32,
        section_title: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            page_number,
            section_title: section_title.into(),
            refined_text: String::new(),
            relevance_score: 0.0,
            key_insights: Vec::new(),
        }
    }

    /// Check if no passage was extracted.
    pub fn is_empty(&self) -> bool {
        self.refined_text.is_empty() && self.key_insights.is_empty()
    }
}
