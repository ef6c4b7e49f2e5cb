//! Heading classification heuristics.
//!
//! Each element gets a "headingness" score from its font size, weight,
//! length, leading numbering and the whitespace above it. Page furniture
//! (page numbers, dates, copyright lines, running headers and footers) is
//! filtered out before any element can be accepted as a heading.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use regex::Regex;

use crate::model::TextElement;

use super::fonts::FontBands;

/// Minimum score for an element to be accepted as a heading.
pub const ACCEPT_THRESHOLD: f64 = 2.5;

const W_FONT: f64 = 1.0;
const W_BOLD: f64 = 1.0;
const W_SHORT_CHARS: f64 = 0.5;
const W_SHORT_WORDS: f64 = 0.5;
const W_PATTERN: f64 = 1.5;
const W_KEYWORD: f64 = 1.0;
const W_GAP: f64 = 0.5;

const SHORT_LINE_CHARS: usize = 80;
const SHORT_LINE_WORDS: usize = 10;
const KEYWORD_MAX_WORDS: usize = 6;
const MAX_HEADING_CHARS: usize = 200;
const MIN_HEADING_CHARS: usize = 3;

/// Gap above an element, relative to its font size, that counts as spacing.
const GAP_RATIO: f32 = 0.8;

const HEADING_WORDS: &[&str] = &[
    "abstract",
    "acknowledgements",
    "acknowledgments",
    "analysis",
    "appendix",
    "approach",
    "background",
    "bibliography",
    "conclusion",
    "conclusions",
    "contents",
    "datasets",
    "discussion",
    "evaluation",
    "experiments",
    "glossary",
    "implementation",
    "introduction",
    "limitations",
    "method",
    "methodology",
    "methods",
    "objectives",
    "overview",
    "preface",
    "recommendations",
    "references",
    "results",
    "summary",
];

/// Scores text elements for headingness.
pub struct HeadingClassifier {
    numbered: Regex,
    roman: Regex,
    lettered: Regex,
    labelled: Regex,
    bullet: Regex,
    page_number: Regex,
    dates: Vec<Regex>,
    footer: Regex,
    link: Regex,
    heading_words: HashSet<&'static str>,
}

impl HeadingClassifier {
    /// Create a classifier with the default patterns.
    pub fn new() -> Self {
        let month = r"(jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?";
        Self {
            numbered: Regex::new(r"^(\d{1,2}(?:\.\d{1,2})*)\.?\s+\S").unwrap(),
            roman: Regex::new(r"^[IVX]{1,5}\.\s+\S").unwrap(),
            lettered: Regex::new(r"^[A-Z]\.\s+[A-Z]").unwrap(),
            labelled: Regex::new(r"(?i)^(chapter|section|part|appendix)\s+[0-9IVXA-Z]+\b")
                .unwrap(),
            bullet: Regex::new(r"^[•●○▪■◆►]\s*\S").unwrap(),
            page_number: Regex::new(
                r"(?i)^(page\s+)?\d{1,4}(\s*(of|/)\s*\d{1,4})?$|^[-–—]\s*\d{1,4}\s*[-–—]$",
            )
            .unwrap(),
            dates: vec![
                Regex::new(r"^\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4}$").unwrap(),
                Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(),
                Regex::new(&format!(
                    r"(?i)^{month}\s+\d{{1,2}}(st|nd|rd|th)?,?\s+\d{{4}}$"
                ))
                .unwrap(),
                Regex::new(&format!(r"(?i)^\d{{1,2}}(st|nd|rd|th)?\s+{month},?\s+\d{{4}}$"))
                    .unwrap(),
                Regex::new(&format!(r"(?i)^{month}\s+\d{{4}}$")).unwrap(),
            ],
            footer: Regex::new(
                r"(?i)^(copyright\b|©|\(c\)\s*\d{4})|all rights reserved|^confidential\b|^draft$",
            )
            .unwrap(),
            link: Regex::new(r"(?i)^(https?://|www\.)|^\S+@\S+\.\S+$").unwrap(),
            heading_words: HEADING_WORDS.iter().copied().collect(),
        }
    }

    /// Check if text is a bare page number ("12", "Page 3", "3 of 10", "- 4 -").
    pub fn is_page_number(&self, text: &str) -> bool {
        self.page_number.is_match(text.trim())
    }

    /// Check if text can never be a heading.
    pub fn is_excluded(&self, text: &str) -> bool {
        let text = text.trim();
        text.chars().filter(|c| c.is_alphanumeric()).count() < MIN_HEADING_CHARS
            || text.chars().count() > MAX_HEADING_CHARS
            || self.is_page_number(text)
            || self.dates.iter().any(|re| re.is_match(text))
            || self.footer.is_match(text)
            || self.link.is_match(text)
    }

    /// Check if text starts with a section number, label or bullet.
    pub fn has_leading_pattern(&self, text: &str) -> bool {
        let text = text.trim();
        self.numbered.is_match(text)
            || self.roman.is_match(text)
            || self.lettered.is_match(text)
            || self.labelled.is_match(text)
            || self.bullet.is_match(text)
    }

    /// Depth of a leading section number (`3` → 1, `3.1.2` → 3).
    pub fn numbering_depth(&self, text: &str) -> Option<usize> {
        self.numbered
            .captures(text.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().split('.').count())
    }

    /// Check if a short text contains a typical heading word.
    pub fn has_heading_word(&self, text: &str) -> bool {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase())
            .collect();
        words.len() <= KEYWORD_MAX_WORDS
            && words.iter().any(|w| self.heading_words.contains(w.as_str()))
    }

    /// Headingness score of an element.
    ///
    /// `previous` is the element right before it in reading order.
    pub fn score(
        &self,
        element: &TextElement,
        previous: Option<&TextElement>,
        fonts: &FontBands,
    ) -> f64 {
        let text = element.trimmed();
        let mut score = W_FONT * fonts.z_score(element.font_size) as f64;

        if element.is_bold {
            score += W_BOLD;
        }
        if text.chars().count() < SHORT_LINE_CHARS {
            score += W_SHORT_CHARS;
        }
        if element.word_count() <= SHORT_LINE_WORDS {
            score += W_SHORT_WORDS;
        }
        if self.has_leading_pattern(text) {
            score += W_PATTERN;
        }
        if self.has_heading_word(text) {
            score += W_KEYWORD;
        }
        if let Some(prev) = previous {
            let gap = element.y - prev.bottom();
            if prev.page_number == element.page_number && gap > element.font_size * GAP_RATIO {
                score += W_GAP;
            }
        }

        score
    }

    /// Check if a score passes the acceptance threshold.
    pub fn accepts(&self, score: f64) -> bool {
        score > ACCEPT_THRESHOLD
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Running headers and footers of a document.
///
/// An element is furniture when its text appears at the same vertical
/// position on more than half of the pages. Page-number tokens ("Page 3",
/// "3 of 10", "Report | 3") are masked before comparing; other digits are
/// kept, so numbered headings such as "Chapter 2" stay distinct.
#[derive(Debug, Clone)]
pub struct Furniture {
    keys: HashSet<(String, i32)>,
    page_token: Regex,
}

impl Furniture {
    fn empty() -> Self {
        Self {
            keys: HashSet::new(),
            page_token: Regex::new(
                r"(?i)^\d{1,4}\s*[|•·–—-]\s*|(\s*[|•·–—-])?\s*(\bpage\s+)?\d{1,4}\s*(of|/)\s*\d{1,4}\s*$|(\s*[|•·–—-])?\s*\bpage\s+\d{1,4}\s*$|\s*[|•·–—-]\s*\d{1,4}\s*$|^[-–—]?\s*\d{1,4}\s*[-–—]?$",
            )
            .unwrap(),
        }
    }

    /// Detect repeating elements across pages.
    pub fn detect(elements: &[TextElement]) -> Self {
        let mut furniture = Self::empty();
        let pages: BTreeSet<u32> = elements.iter().map(|e| e.page_number).collect();
        if pages.len() < 2 {
            return furniture;
        }

        let mut occurrences: BTreeMap<(String, i32), BTreeSet<u32>> = BTreeMap::new();
        for element in elements {
            occurrences
                .entry(furniture.key(element))
                .or_default()
                .insert(element.page_number);
        }

        furniture.keys = occurrences
            .into_iter()
            .filter(|(_, on_pages)| on_pages.len() * 2 > pages.len())
            .map(|(key, _)| key)
            .collect();
        furniture
    }

    /// Check if an element repeats across pages.
    pub fn contains(&self, element: &TextElement) -> bool {
        !self.keys.is_empty() && self.keys.contains(&self.key(element))
    }

    /// Number of distinct repeating texts.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if nothing repeats.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Comparison key: lowercased text with page numbers masked, and a
    /// 10pt vertical bucket.
    fn key(&self, element: &TextElement) -> (String, i32) {
        let text = element.trimmed().to_lowercase();
        let text = self.page_token.replace_all(&text, " # ");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        (text, (element.y / 10.0).round() as i32)
    }
}

impl Default for Furniture {
    fn default() -> Self {
        Self::empty()
    }
}
