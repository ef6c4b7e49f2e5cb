//! Best-passage selection for ranked sections.

use serde::Serialize;

use crate::model::{ScoredSection, SubsectionInsight};
use crate::profile::KeywordProfile;
use crate::relevance::score_passage;

use super::insights::InsightExtractor;
use super::refine::{split_sentences, RefineOptions, Refiner};

/// Paragraphs longer than this are split into sentence windows.
const OVERSIZED_WORDS: usize = 150;

/// Target size of a sentence window.
const WINDOW_WORDS: usize = 60;

/// A scored passage of a section body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassageCandidate {
    /// Position of the passage within the body
    pub index: usize,

    /// Raw passage text
    pub text: String,

    /// Passage relevance score
    pub score: f64,
}

/// Selects, refines and annotates the best passage of a section.
pub struct SubsectionAnalyzer {
    refiner: Refiner,
    insights: InsightExtractor,
}

impl SubsectionAnalyzer {
    /// Create an analyzer with the given refinement options.
    pub fn new(options: RefineOptions) -> Self {
        Self {
            refiner: Refiner::new(options),
            insights: InsightExtractor::new(),
        }
    }

    /// Create an analyzer with default options and a length limit.
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self::new(RefineOptions::new(max_chars))
    }

    /// All passages of a body, best first; ties keep body order.
    pub fn candidates(&self, body: &str, profile: &KeywordProfile) -> Vec<PassageCandidate> {
        let mut candidates: Vec<PassageCandidate> = passages(body)
            .into_iter()
            .enumerate()
            .map(|(index, text)| PassageCandidate {
                index,
                score: score_passage(&text, profile),
                text,
            })
            .collect();

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates
    }

    /// Analyze one ranked section.
    pub fn analyze(&self, section: &ScoredSection, profile: &KeywordProfile) -> SubsectionInsight {
        let s = &section.section;
        let mut insight = SubsectionInsight::empty(&s.document_id, s.page_number, s.display_title());

        let best = match self.candidates(&s.body_text, profile).into_iter().next() {
            Some(best) => best,
            None => {
                log::debug!(
                    "Section '{}' in {} has no body text",
                    s.title,
                    s.document_id
                );
                return insight;
            }
        };

        insight.refined_text = self.refiner.refine(&best.text);
        insight.relevance_score = best.score;
        insight.key_insights = self.insights.extract(&best.text);
        insight
    }
}

impl Default for SubsectionAnalyzer {
    fn default() -> Self {
        Self::new(RefineOptions::default())
    }
}

/// Split a body into paragraphs, windowing oversized ones by sentence.
fn passages(body: &str) -> Vec<String> {
    let mut passages = Vec::new();

    for paragraph in body.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        if paragraph.split_whitespace().count() <= OVERSIZED_WORDS {
            passages.push(paragraph.to_string());
            continue;
        }

        let mut window: Vec<&str> = Vec::new();
        let mut words = 0;
        for sentence in split_sentences(paragraph) {
            window.push(sentence);
            words += sentence.split_whitespace().count();
            if words >= WINDOW_WORDS {
                passages.push(window.join(" "));
                window.clear();
                words = 0;
            }
        }
        if !window.is_empty() {
            passages.push(window.join(" "));
        }
    }

    passages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, Section};
    use crate::profile::build_profile;

    fn scored(body: &str) -> ScoredSection {
        let section = Section::new("doc.pdf", 4, "2.1 sampling design", HeadingLevel::H2)
            .with_body(body);
        ScoredSection::new(section, 0, 0, 1.0)
    }

    #[test]
    fn test_best_paragraph_is_selected() {
        let profile = build_profile("", "groundwater contamination");
        let body = "The site lies in a valley.\n\n\
                    Groundwater contamination was measured at twelve wells. \
                    Contamination peaked in spring.\n\n\
                    Funding came from the regional council.";
        let insight = SubsectionAnalyzer::default().analyze(&scored(body), &profile);

        assert!(insight.refined_text.starts_with("Groundwater contamination"));
        assert!(insight.relevance_score > 0.0);
        assert_eq!(insight.section_title, "Sampling design");
        assert_eq!(insight.page_number, 4);
    }

    #[test]
    fn test_insights_come_from_selected_paragraph() {
        let profile = build_profile("", "groundwater contamination");
        let body = "Funding of 40000 euros came from the regional council.\n\n\
                    Groundwater contamination was measured at 12 wells in the valley.";
        let insight = SubsectionAnalyzer::default().analyze(&scored(body), &profile);

        assert!(insight.refined_text.starts_with("Groundwater contamination"));
        assert_eq!(insight.key_insights.len(), 1);
        assert!(insight.key_insights[0].starts_with("Groundwater contamination"));
        assert!(insight.key_insights.iter().all(|k| !k.contains("Funding")));
    }

    #[test]
    fn test_ties_keep_first_paragraph() {
        let profile = build_profile("", "");
        let candidates =
            SubsectionAnalyzer::default().candidates("First one.\n\nSecond one.", &profile);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].index, 0);
        assert_eq!(candidates[0].score, 0.0);
    }

    #[test]
    fn test_empty_body() {
        let profile = build_profile("Analyst", "summary");
        let insight = SubsectionAnalyzer::default().analyze(&scored("   "), &profile);
        assert!(insight.is_empty());
        assert_eq!(insight.relevance_score, 0.0);
    }

    #[test]
    fn test_oversized_paragraph_is_windowed() {
        let sentence = "This sentence has exactly eight words in it. ";
        let body = sentence.repeat(40);
        let parts = passages(&body);
        assert!(parts.len() > 1);
        assert!(parts
            .iter()
            .all(|p| p.split_whitespace().count() <= WINDOW_WORDS + 8));
    }

    #[test]
    fn test_refined_text_limit() {
        let profile = build_profile("", "tidal energy");
        let body = "Tidal energy is predictable and dense. ".repeat(30);
        let analyzer = SubsectionAnalyzer::with_max_chars(120);
        let insight = analyzer.analyze(&scored(&body), &profile);

        assert!(!insight.refined_text.is_empty());
        assert!(insight.refined_text.chars().count() <= 120);
        assert!(insight.refined_text.ends_with('.'));
    }
}
