//! Composite relevance score of a section against a keyword profile.
//!
//! ```text
//! score = W_TITLE  * title_density
//!       + W_BODY   * body_density
//!       + W_PHRASE * phrase_bonus
//!       + W_LEVEL  * level_importance
//!       + W_LENGTH * length_quality
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::Section;
use crate::profile::{tokenize, KeywordProfile};

pub const W_TITLE: f64 = 2.0;
pub const W_BODY: f64 = 0.2;
pub const W_PHRASE: f64 = 1.5;
pub const W_LEVEL: f64 = 0.25;
pub const W_LENGTH: f64 = 1.0;

const TITLE_DENSITY_CAP: f64 = 2.0;
const BODY_DENSITY_CAP: f64 = 10.0;
const MAX_OCCURRENCES: usize = 5;

/// Body lengths (in words) that get the full length bonus.
pub const TARGET_WORDS: (usize, usize) = (80, 400);
const SIGMA_SHORT: f64 = 60.0;
const SIGMA_LONG: f64 = 600.0;

/// Individual components of a section score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub title_density: f64,
    pub body_density: f64,
    pub phrase_bonus: f64,
    pub level_importance: f64,
    pub length_quality: f64,
}

impl ScoreBreakdown {
    /// Weighted sum of the components.
    pub fn total(&self) -> f64 {
        W_TITLE * self.title_density
            + W_BODY * self.body_density
            + W_PHRASE * self.phrase_bonus
            + W_LEVEL * self.level_importance
            + W_LENGTH * self.length_quality
    }
}

/// Score components of a section.
pub fn breakdown(section: &Section, profile: &KeywordProfile) -> ScoreBreakdown {
    ScoreBreakdown {
        title_density: title_density(&section.title, profile),
        body_density: body_density(&section.body_text, profile),
        phrase_bonus: phrase_bonus(&[&section.title, &section.body_text], profile),
        level_importance: section.level.importance(),
        length_quality: length_quality(section.body_word_count()),
    }
}

/// Relevance score of a section.
pub fn score_section(section: &Section, profile: &KeywordProfile) -> f64 {
    breakdown(section, profile).total()
}

/// Relevance of a free-standing passage (body density and phrase bonus).
pub fn score_passage(text: &str, profile: &KeywordProfile) -> f64 {
    W_BODY * body_density(text, profile) + W_PHRASE * phrase_bonus(&[text], profile)
}

/// Summed weight of distinct profile terms in the title, per title term.
pub fn title_density(title: &str, profile: &KeywordProfile) -> f64 {
    let terms = tokenize::terms(title);
    if terms.is_empty() || profile.weights.is_empty() {
        return 0.0;
    }

    let bigrams = tokenize::bigrams(&terms);
    let distinct: BTreeSet<&str> = terms
        .iter()
        .chain(bigrams.iter())
        .map(|t| t.as_str())
        .collect();
    let matched: f64 = distinct.iter().map(|t| profile.weight(t)).sum();

    (matched / terms.len() as f64).min(TITLE_DENSITY_CAP)
}

/// Weighted profile-term occurrences per 100 words of text.
pub fn body_density(text: &str, profile: &KeywordProfile) -> f64 {
    let word_count = text.split_whitespace().count();
    if word_count == 0 || profile.weights.is_empty() {
        return 0.0;
    }

    let terms = tokenize::terms(text);
    let bigrams = tokenize::bigrams(&terms);
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for term in terms.iter().chain(bigrams.iter()) {
        if profile.weights.contains_key(term) {
            *counts.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    let weighted: f64 = counts
        .iter()
        .map(|(term, &n)| profile.weight(term) * n.min(MAX_OCCURRENCES) as f64)
        .sum();

    (weighted * 100.0 / word_count as f64).min(BODY_DENSITY_CAP)
}

/// 1.0 when any profile phrase occurs in one of the texts.
pub fn phrase_bonus(texts: &[&str], profile: &KeywordProfile) -> f64 {
    if profile.phrases.is_empty() {
        return 0.0;
    }
    let found = texts.iter().any(|text| {
        let haystack = tokenize::phrase_haystack(text);
        profile
            .phrases
            .iter()
            .any(|phrase| haystack.contains(&format!(" {} ", phrase)))
    });
    if found {
        1.0
    } else {
        0.0
    }
}

/// Bell-shaped preference for bodies inside the target word band.
pub fn length_quality(words: usize) -> f64 {
    let (min, max) = TARGET_WORDS;
    let gaussian = |distance: f64, sigma: f64| (-(distance * distance) / (2.0 * sigma * sigma)).exp();

    if words < min {
        gaussian((min - words) as f64, SIGMA_SHORT)
    } else if words > max {
        gaussian((words - max) as f64, SIGMA_LONG)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;
    use crate::profile::build_profile;

    fn lorem(words: usize) -> String {
        vec!["lorem"; words].join(" ")
    }

    #[test]
    fn test_title_density() {
        let profile = build_profile("", "evaluate datasets");
        assert!((title_density("Datasets", &profile) - 1.25).abs() < 1e-9);
        assert!((title_density("Datasets and Tools", &profile) - 0.625).abs() < 1e-9);
        assert_eq!(title_density("Introduction", &profile), 0.0);
        assert_eq!(title_density("", &profile), 0.0);
    }

    #[test]
    fn test_title_density_is_capped() {
        let profile = build_profile("", "deep learning");
        // unigrams 1.25 + 1.25, bigram 1.875, over two terms
        assert_eq!(title_density("Deep Learning", &profile), TITLE_DENSITY_CAP);
    }

    #[test]
    fn test_body_density_caps_repeats() {
        let profile = build_profile("", "graphene");
        let text = format!("{} {}", vec!["graphene"; 20].join(" "), lorem(80));
        // 5 counted occurrences * 1.25 per 100 words
        assert!((body_density(&text, &profile) - 6.25).abs() < 1e-9);
    }

    #[test]
    fn test_phrase_bonus_matches_whole_words() {
        let profile = build_profile("", "protein folding simulation");
        assert_eq!(
            phrase_bonus(&["We ran a protein folding simulation overnight."], &profile),
            1.0
        );
        assert_eq!(
            phrase_bonus(&["myprotein folding simulations"], &profile),
            0.0
        );
    }

    #[test]
    fn test_length_quality() {
        assert_eq!(length_quality(80), 1.0);
        assert_eq!(length_quality(400), 1.0);
        assert!(length_quality(20) < length_quality(60));
        assert!(length_quality(0) > 0.0);
        assert!(length_quality(1000) < length_quality(500));
        assert!(length_quality(1000) > length_quality(10));
    }

    #[test]
    fn test_empty_profile_uses_layout_only() {
        let profile = build_profile("", "");
        let section = Section::new("d", 1, "Results", HeadingLevel::H1).with_body(lorem(100));
        let b = breakdown(&section, &profile);

        assert_eq!(b.title_density, 0.0);
        assert_eq!(b.body_density, 0.0);
        assert_eq!(b.phrase_bonus, 0.0);
        assert!((b.total() - (W_LEVEL * 3.0 + W_LENGTH)).abs() < 1e-9);
    }

    #[test]
    fn test_matching_title_scores_higher() {
        let profile = build_profile("Data scientist", "compare clustering algorithms");
        let body = lorem(120);
        let relevant =
            Section::new("d", 1, "Clustering Algorithms", HeadingLevel::H2).with_body(body.clone());
        let other = Section::new("d", 1, "Acknowledgements", HeadingLevel::H2).with_body(body);

        assert!(score_section(&relevant, &profile) > score_section(&other, &profile));
    }

    #[test]
    fn test_score_passage() {
        let profile = build_profile("", "solar panels");
        assert_eq!(score_passage("", &profile), 0.0);
        assert!(score_passage("Solar panels convert light.", &profile) > 0.0);
    }
}
