//! Document sections and their scores.

use serde::{Deserialize, Serialize};

use super::HeadingLevel;

/// A heading together with the body text that follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Identifier of the source document
    pub document_id: String,

    /// Page of the heading (1-indexed)
    pub page_number: u32,

    /// Heading text (empty for synthetic sections)
    pub title: String,

    /// Heading level
    pub level: HeadingLevel,

    /// Body text; paragraphs are separated by blank lines
    pub body_text: String,

    /// Index of the first element of the section
    pub start_position: usize,

    /// Index one past the last element of the section
    pub end_position: usize,
}

impl Section {
    /// Create a section without body text.
    pub fn new(
        document_id: impl Into<String>,
        page_number: u32,
        title: impl Into<String>,
        level: HeadingLevel,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            page_number,
            title: title.into(),
            level,
            body_text: String::new(),
            start_position: 0,
            end_position: 0,
        }
    }

    /// Set the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body_text = body.into();
        self
    }

    /// Set the element span of the section.
    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.start_position = start;
        self.end_position = end;
        self
    }

    /// Check if the section is synthetic (no detected heading).
    pub fn is_synthetic(&self) -> bool {
        self.title.trim().is_empty()
    }

    /// Number of words in the body.
    pub fn body_word_count(&self) -> usize {
        self.body_text.split_whitespace().count()
    }

    /// Title with whitespace collapsed, numbering and bullets removed.
    pub fn display_title(&self) -> String {
        clean_title(&self.title)
    }
}

/// Normalize a heading for presentation.
///
/// `"2.1  results and   discussion"` becomes `"Results and discussion"`.
pub fn clean_title(title: &str) -> String {
    let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ");

    // Drop a leading "2.1" / "3." token, but keep titles that are only a number
    let stripped = match collapsed.split_once(' ') {
        Some((first, rest))
            if first.chars().any(|c| c.is_ascii_digit())
                && first.chars().all(|c| c.is_ascii_digit() || c == '.') =>
        {
            rest
        }
        _ => collapsed.as_str(),
    };
    let stripped = stripped
        .trim_start_matches(['•', '●', '○', '▪', '■', '-', '*'])
        .trim_start();

    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        Some(_) => stripped.to_string(),
        None => String::new(),
    }
}

/// A text element (or merged run of elements) classified as a heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingCandidate {
    /// Identifier of the source document
    pub document_id: String,

    /// Page of the heading
    pub page_number: u32,

    /// Heading text
    pub text: String,

    /// Assigned level
    pub level: HeadingLevel,

    /// Headingness score
    pub score: f64,

    /// Index of the first element of the heading
    pub position: usize,

    /// Index one past the last element of the heading
    pub end: usize,
}

/// A section with its relevance score and, once ranked, its rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSection {
    /// The scored section
    pub section: Section,

    /// Position of the source document in the input list
    pub document_index: usize,

    /// Position of the section within its document
    pub sequence: usize,

    /// Relevance score (non-negative, relative)
    pub relevance_score: f64,

    /// 1-based rank, assigned by the ranker
    pub importance_rank: Option<u32>,
}

impl ScoredSection {
    /// Create an unranked scored section.
    pub fn new(section: Section, document_index: usize, sequence: usize, score: f64) -> Self {
        Self {
            section,
            document_index,
            sequence,
            relevance_score: score,
            importance_rank: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("2.1  results and   discussion"), "Results and discussion");
        assert_eq!(clean_title("• Key Findings"), "Key Findings");
        assert_eq!(clean_title("2024"), "2024");
        assert_eq!(clean_title("3D printing"), "3D printing");
        assert_eq!(clean_title("   "), "");
    }

    #[test]
    fn test_synthetic_section() {
        let section = Section::new("doc", 3, "", HeadingLevel::Body).with_body("some text here");
        assert!(section.is_synthetic());
        assert_eq!(section.body_word_count(), 3);
    }
}
