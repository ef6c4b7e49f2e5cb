//! Key insight sentences.

use std::collections::HashSet;

use crate::profile::tokenize;

use super::refine::{collapse_whitespace, split_sentences};

/// Maximum number of insights per section.
pub const MAX_INSIGHTS: usize = 3;

/// Minimum number of words in an insight sentence.
pub const MIN_INSIGHT_WORDS: usize = 5;

/// Phrases that mark a sentence as a finding or a definition.
pub const INDICATORS: &[&str] = &[
    "shows that",
    "show that",
    "showed that",
    "results indicate",
    "results show",
    "results suggest",
    "we found",
    "we find",
    "we observe",
    "we observed",
    "is defined as",
    "are defined as",
    "refers to",
    "demonstrates",
    "demonstrate that",
    "suggests that",
    "suggest that",
    "indicates that",
    "in conclusion",
    "in summary",
    "outperforms",
    "significantly",
    "important",
    "key",
    "significant",
    "critical",
    "essential",
    "crucial",
    "fundamental",
    "notable",
    "remarkable",
];

/// Picks indicator sentences out of a section body.
pub struct InsightExtractor {
    indicators: Vec<String>,
    max_insights: usize,
}

impl InsightExtractor {
    /// Create an extractor with the default indicators.
    pub fn new() -> Self {
        Self {
            indicators: INDICATORS.iter().map(|p| format!(" {} ", p)).collect(),
            max_insights: MAX_INSIGHTS,
        }
    }

    /// Limit the number of insights returned.
    pub fn with_max_insights(mut self, max: usize) -> Self {
        self.max_insights = max;
        self
    }

    /// Check if a sentence states a finding, a definition or a figure.
    pub fn is_insight(&self, sentence: &str) -> bool {
        if sentence.split_whitespace().count() < MIN_INSIGHT_WORDS {
            return false;
        }
        if sentence.chars().any(|c| c.is_ascii_digit()) {
            return true;
        }
        let haystack = tokenize::phrase_haystack(sentence);
        self.indicators.iter().any(|p| haystack.contains(p.as_str()))
    }

    /// Indicator sentences of a text, in order, without duplicates.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut insights = Vec::new();

        for paragraph in text.split("\n\n") {
            for sentence in split_sentences(paragraph) {
                if insights.len() >= self.max_insights {
                    return insights;
                }
                let sentence = collapse_whitespace(sentence);
                if self.is_insight(&sentence) && seen.insert(sentence.to_lowercase()) {
                    insights.push(sentence);
                }
            }
        }

        insights
    }
}

impl Default for InsightExtractor {
    fn default() -> Self {
        Self::new()
    }
}
