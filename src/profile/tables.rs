//! Persona and job archetype tables.
//!
//! An archetype maps a name ("researcher", "literature review") to a set of
//! weighted terms. Tables are plain data: the built-in set can be replaced
//! by a JSON document without touching the scoring code.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::tokenize;

const PERSONAS: &[(&str, &[&str])] = &[
    (
        "researcher",
        &[
            "research", "study", "analysis", "methodology", "experiment", "findings",
            "literature", "survey", "review", "academic", "publication", "dataset",
            "benchmark", "evaluation", "metrics",
        ],
    ),
    (
        "student",
        &[
            "learn", "study", "understand", "concept", "theory", "practice", "example",
            "exercise", "problem", "solution", "tutorial", "guide", "basics", "fundamentals",
            "introduction",
        ],
    ),
    (
        "analyst",
        &[
            "analysis", "data", "trends", "metrics", "performance", "report", "insights",
            "statistics", "comparison", "evaluation", "assessment", "strategy", "planning",
            "forecast",
        ],
    ),
    (
        "engineer",
        &[
            "implementation", "design", "architecture", "system", "technical", "specification",
            "requirements", "development", "engineering", "performance", "optimization",
            "scalability",
        ],
    ),
    (
        "manager",
        &[
            "strategy", "planning", "management", "decision", "leadership", "team", "project",
            "resource", "budget", "timeline", "risk", "stakeholder", "business", "objective",
        ],
    ),
    (
        "salesperson",
        &[
            "sales", "revenue", "customer", "market", "competition", "pricing", "product",
            "service", "client", "prospect", "deal", "negotiation", "relationship", "growth",
        ],
    ),
    (
        "journalist",
        &[
            "news", "report", "story", "investigation", "interview", "source", "fact", "event",
            "update", "coverage", "article", "publication", "media", "press",
        ],
    ),
    (
        "entrepreneur",
        &[
            "business", "startup", "opportunity", "market", "innovation", "investment",
            "funding", "growth", "strategy", "competition", "revenue", "customer", "product",
            "scale",
        ],
    ),
];

const JOBS: &[(&str, &[&str])] = &[
    (
        "literature review",
        &[
            "review", "survey", "comparison", "analysis", "methodology", "findings", "research",
            "studies", "approaches", "techniques", "evaluation", "benchmarks",
        ],
    ),
    (
        "exam preparation",
        &[
            "key", "concepts", "important", "remember", "understand", "practice", "example",
            "problem", "solution", "theory", "principle", "formula", "definition",
        ],
    ),
    (
        "financial analysis",
        &[
            "revenue", "profit", "cost", "expense", "financial", "performance", "growth",
            "investment", "return", "margin", "cash", "budget", "forecast",
        ],
    ),
    (
        "market analysis",
        &[
            "market", "competition", "trends", "share", "size", "growth", "opportunity",
            "threat", "customer", "segment", "positioning", "strategy",
        ],
    ),
    (
        "technical implementation",
        &[
            "implementation", "design", "architecture", "system", "technical", "specification",
            "requirements", "development", "coding", "testing",
        ],
    ),
    (
        "summary",
        &[
            "summary", "overview", "key", "main", "important", "highlights", "conclusion",
            "findings", "results", "insights", "takeaways",
        ],
    ),
    (
        "comparison",
        &[
            "compare", "comparison", "versus", "difference", "similarity", "contrast",
            "alternative", "option", "choice", "evaluation", "assessment",
        ],
    ),
];

/// A term with its weight inside an archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    /// The term as written in the table
    pub term: String,

    /// Relative weight (1.0 unless stated)
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// A named set of weighted terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    /// Archetype name; words separated by spaces or underscores
    pub name: String,

    /// Terms associated with the archetype
    pub terms: Vec<WeightedTerm>,
}

impl Archetype {
    /// Create an archetype whose terms all have weight 1.0.
    pub fn new(name: impl Into<String>, terms: &[&str]) -> Self {
        Self {
            name: name.into(),
            terms: terms
                .iter()
                .map(|t| WeightedTerm {
                    term: t.to_string(),
                    weight: default_weight(),
                })
                .collect(),
        }
    }

    /// Check if the archetype applies to a persona or job description.
    ///
    /// Matches when any word of the name occurs in the text, ignoring case,
    /// so "literature review" applies to "review recent work".
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.name
            .split(|c: char| c == '_' || c.is_whitespace())
            .filter(|w| !w.is_empty())
            .any(|w| text.contains(&w.to_lowercase()))
    }

    /// Terms in normalized form with their weights.
    pub fn normalized_terms(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.terms.iter().filter_map(|t| {
            let normalized = tokenize::terms(&t.term).join(" ");
            (!normalized.is_empty()).then_some((normalized, t.weight))
        })
    }
}

/// Persona and job archetype tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeTables {
    /// Persona archetypes ("researcher", "analyst", ...)
    #[serde(default)]
    pub personas: Vec<Archetype>,

    /// Job archetypes ("literature review", "summary", ...)
    #[serde(default)]
    pub jobs: Vec<Archetype>,
}

impl ArchetypeTables {
    /// The built-in tables.
    pub fn builtin() -> Self {
        Self {
            personas: PERSONAS
                .iter()
                .map(|(name, terms)| Archetype::new(*name, terms))
                .collect(),
            jobs: JOBS
                .iter()
                .map(|(name, terms)| Archetype::new(*name, terms))
                .collect(),
        }
    }

    /// Tables without any archetype.
    pub fn empty() -> Self {
        Self {
            personas: Vec::new(),
            jobs: Vec::new(),
        }
    }

    /// Load tables from JSON, replacing the built-in set.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid archetype tables: {}", e)))
    }

    /// Persona archetypes matching a persona description.
    pub fn personas_for<'a>(&'a self, persona: &'a str) -> impl Iterator<Item = &'a Archetype> {
        self.personas.iter().filter(move |a| a.matches(persona))
    }

    /// Job archetypes matching a job description.
    pub fn jobs_for<'a>(&'a self, job: &'a str) -> impl Iterator<Item = &'a Archetype> {
        self.jobs.iter().filter(move |a| a.matches(job))
    }
}

impl Default for ArchetypeTables {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let tables = ArchetypeTables::builtin();
        assert_eq!(tables.personas.len(), 8);
        assert_eq!(tables.jobs.len(), 7);
    }

    #[test]
    fn test_persona_matching() {
        let tables = ArchetypeTables::builtin();
        let names: Vec<&str> = tables
            .personas_for("PhD Researcher in Computational Biology")
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["researcher"]);
    }

    #[test]
    fn test_job_matching_any_name_word() {
        let tables = ArchetypeTables::builtin();
        let names: Vec<&str> = tables
            .jobs_for("Prepare a comprehensive literature review")
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["literature review"]);
    }

    #[test]
    fn test_normalized_terms() {
        let archetype = Archetype::new("x", &["Benchmarks", "the", "key findings"]);
        let terms: Vec<(String, f64)> = archetype.normalized_terms().collect();
        assert_eq!(
            terms,
            vec![
                ("benchmark".to_string(), 1.0),
                ("key finding".to_string(), 1.0)
            ]
        );
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "personas": [{"name": "chef", "terms": [{"term": "recipe", "weight": 2.0}, {"term": "menu"}]}],
            "jobs": []
        }"#;
        let tables = ArchetypeTables::from_json(json).unwrap();
        assert_eq!(tables.personas[0].terms[1].weight, 1.0);
        assert!(tables.personas[0].matches("Head Chef"));
        assert!(ArchetypeTables::from_json("{not json").is_err());
    }
}
