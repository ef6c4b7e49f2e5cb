//! Keyword profiles built from a persona and a job description.
//!
//! The profile is computed once per run and shared read-only by every
//! scoring stage.

pub mod tables;
pub mod tokenize;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub use tables::{Archetype, ArchetypeTables, WeightedTerm};

/// Weight of a free-text persona term.
pub const PERSONA_WEIGHT: f64 = 1.0;

/// Weight of a free-text job term.
pub const JOB_WEIGHT: f64 = 1.25;

/// Multiplier for bigrams over their unigram weight.
pub const BIGRAM_BOOST: f64 = 1.5;

/// Multiplier applied to archetype table weights.
pub const ARCHETYPE_SCALE: f64 = 0.6;

/// Length of the phrase windows taken from persona and job text.
const PHRASE_WORDS: usize = 3;

/// Weighted search terms derived from a persona and a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordProfile {
    /// Terms from the persona and its archetypes
    pub persona_terms: BTreeSet<String>,

    /// Terms from the job and its archetypes
    pub job_terms: BTreeSet<String>,

    /// Union of persona and job terms
    pub domain_terms: BTreeSet<String>,

    /// Weight of every term (unigrams and bigrams)
    pub weights: BTreeMap<String, f64>,

    /// Normalized phrases for exact-phrase matching
    pub phrases: BTreeSet<String>,
}

impl KeywordProfile {
    /// Check if the profile has no terms and no phrases.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty() && self.phrases.is_empty()
    }

    /// Number of weighted terms.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Weight of a normalized term (0.0 when absent).
    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    /// Terms ordered by descending weight, then alphabetically.
    pub fn top_terms(&self, n: usize) -> Vec<(&str, f64)> {
        let mut terms: Vec<(&str, f64)> = self
            .weights
            .iter()
            .map(|(t, w)| (t.as_str(), *w))
            .collect();
        terms.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(n);
        terms
    }

    fn add(&mut self, term: String, weight: f64, persona: bool) {
        let entry = self.weights.entry(term.clone()).or_insert(0.0);
        *entry = entry.max(weight);
        if persona {
            self.persona_terms.insert(term.clone());
        } else {
            self.job_terms.insert(term.clone());
        }
        self.domain_terms.insert(term);
    }
}

/// Builds keyword profiles against a set of archetype tables.
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    tables: ArchetypeTables,
}

impl ProfileBuilder {
    /// Create a builder with the built-in tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom archetype tables.
    pub fn with_tables(mut self, tables: ArchetypeTables) -> Self {
        self.tables = tables;
        self
    }

    /// The archetype tables in use.
    pub fn tables(&self) -> &ArchetypeTables {
        &self.tables
    }

    /// Build the profile for a persona and a job.
    ///
    /// Never fails: empty input yields an empty profile.
    pub fn build(&self, persona: &str, job: &str) -> KeywordProfile {
        let mut profile = KeywordProfile::default();

        add_free_text(&mut profile, persona, PERSONA_WEIGHT, true);
        add_free_text(&mut profile, job, JOB_WEIGHT, false);

        for archetype in self.tables.personas_for(persona) {
            log::debug!("Persona archetype matched: {}", archetype.name);
            for (term, weight) in archetype.normalized_terms() {
                profile.add(term, weight * ARCHETYPE_SCALE, true);
            }
        }
        for archetype in self.tables.jobs_for(job) {
            log::debug!("Job archetype matched: {}", archetype.name);
            for (term, weight) in archetype.normalized_terms() {
                profile.add(term, weight * ARCHETYPE_SCALE, false);
            }
        }

        for text in [persona, job] {
            profile.phrases.extend(phrases(text));
        }

        if profile.is_empty() {
            log::warn!("Persona and job yield no keywords; ranking uses layout signals only");
        } else {
            log::debug!(
                "Keyword profile: {} terms, {} phrases",
                profile.len(),
                profile.phrases.len()
            );
        }

        profile
    }
}

/// Build a profile with the built-in archetype tables.
pub fn build_profile(persona: &str, job: &str) -> KeywordProfile {
    ProfileBuilder::new().build(persona, job)
}

fn add_free_text(profile: &mut KeywordProfile, text: &str, weight: f64, persona: bool) {
    let terms = tokenize::terms(text);
    for bigram in tokenize::bigrams(&terms) {
        profile.add(bigram, weight * BIGRAM_BOOST, persona);
    }
    for term in terms {
        profile.add(term, weight, persona);
    }
}

/// The whole text and its three-word windows with at least two content words.
fn phrases(text: &str) -> Vec<String> {
    let words = tokenize::words(text);
    let mut phrases = Vec::new();

    if words.len() >= 2 {
        phrases.push(words.join(" "));
    }
    for window in words.windows(PHRASE_WORDS) {
        let content = window
            .iter()
            .filter(|w| tokenize::is_content_word(w))
            .count();
        if content >= 2 {
            phrases.push(window.join(" "));
        }
    }

    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERSONA: &str = "PhD Researcher in Computational Biology";
    const JOB: &str = "Prepare a comprehensive literature review focusing on methodologies, \
                       datasets, and performance benchmarks";

    #[test]
    fn test_free_text_weights() {
        let profile = ProfileBuilder::new()
            .with_tables(ArchetypeTables::empty())
            .build(PERSONA, JOB);

        assert_eq!(profile.weight("researcher"), PERSONA_WEIGHT);
        assert_eq!(profile.weight("methodology"), JOB_WEIGHT);
        assert_eq!(profile.weight("computational biology"), PERSONA_WEIGHT * BIGRAM_BOOST);
        assert!(profile.job_terms.contains("dataset"));
        assert!(!profile.persona_terms.contains("dataset"));
    }

    #[test]
    fn test_archetype_terms_keep_max_weight() {
        let profile = build_profile(PERSONA, JOB);

        // From the researcher table only
        assert!((profile.weight("academic") - ARCHETYPE_SCALE).abs() < 1e-9);
        // Both free text (job) and tables: the larger weight wins
        assert_eq!(profile.weight("benchmark"), JOB_WEIGHT);
        assert!(profile.persona_terms.contains("benchmark"));
        assert!(profile.domain_terms.contains("survey"));
    }

    #[test]
    fn test_phrases() {
        let profile = build_profile("", "Compare deep learning models");
        assert!(profile.phrases.contains("compare deep learning models"));
        assert!(profile.phrases.contains("deep learning models"));
        assert!(profile.phrases.contains("compare deep learning"));
    }

    #[test]
    fn test_empty_profile() {
        let profile = build_profile("", "");
        assert!(profile.is_empty());
        assert!(profile.domain_terms.is_empty());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(build_profile(PERSONA, JOB), build_profile(PERSONA, JOB));
    }

    #[test]
    fn test_top_terms() {
        let profile = ProfileBuilder::new()
            .with_tables(ArchetypeTables::empty())
            .build("", "battery chemistry");
        let top = profile.top_terms(1);
        assert_eq!(top, vec![("battery chemistry", JOB_WEIGHT * BIGRAM_BOOST)]);
    }
}
