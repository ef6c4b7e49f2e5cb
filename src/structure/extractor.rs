//! Section extraction from positioned text elements.

use std::collections::BTreeMap;

use crate::model::{HeadingCandidate, HeadingLevel, Section, TextElement};

use super::classify::{Furniture, HeadingClassifier};
use super::fonts::{FontBands, LevelTable};

/// Maximum number of title-band elements for the title heuristic.
const MAX_TITLE_ELEMENTS: usize = 3;

/// Gap between heading lines, relative to font size, that still merges them.
const HEADING_CONTINUATION_GAP: f32 = 0.6;

/// Role of an element after classification.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Role {
    Heading(HeadingLevel, f64),
    Body,
    Skip,
}

/// Builds the section outline of a document.
pub struct StructureExtractor {
    classifier: HeadingClassifier,
}

impl StructureExtractor {
    /// Create an extractor with the default classifier.
    pub fn new() -> Self {
        Self {
            classifier: HeadingClassifier::new(),
        }
    }

    /// The heading classifier in use.
    pub fn classifier(&self) -> &HeadingClassifier {
        &self.classifier
    }

    /// Detect the headings of a document, in reading order.
    pub fn outline(&self, document_id: &str, elements: &[TextElement]) -> Vec<HeadingCandidate> {
        let roles = self.classify(elements);
        self.merge_candidates(document_id, elements, &roles)
    }

    /// Split a document into sections.
    ///
    /// Always returns at least one section: documents without detectable
    /// headings get one untitled section per page, and documents without
    /// any elements get a single empty section.
    pub fn extract(&self, document_id: &str, elements: &[TextElement]) -> Vec<Section> {
        if elements.is_empty() {
            log::warn!("Document {} has no text elements", document_id);
            return vec![Section::new(document_id, 1, "", HeadingLevel::Body)];
        }

        let roles = self.classify(elements);
        let headings = self.merge_candidates(document_id, elements, &roles);

        if headings.is_empty() {
            log::debug!(
                "No headings detected in {}, falling back to page sections",
                document_id
            );
            return page_sections(document_id, elements, &roles);
        }

        let spacing = line_spacing(elements, &roles);

        let preamble = (0..headings[0].position)
            .filter(|&i| roles[i] == Role::Body)
            .count();
        if preamble > 0 {
            log::debug!(
                "Dropping {} elements before the first heading in {}",
                preamble,
                document_id
            );
        }

        let mut sections = Vec::with_capacity(headings.len());
        for (i, heading) in headings.iter().enumerate() {
            let next_start = headings
                .get(i + 1)
                .map(|h| h.position)
                .unwrap_or(elements.len());

            let body: Vec<&TextElement> = (heading.end..next_start)
                .filter(|&idx| roles[idx] == Role::Body)
                .map(|idx| &elements[idx])
                .collect();

            sections.push(
                Section::new(
                    document_id,
                    heading.page_number,
                    heading.text.clone(),
                    heading.level,
                )
                .with_body(join_paragraphs(&body, spacing))
                .with_span(heading.position, next_start),
            );
        }

        log::debug!(
            "Extracted {} sections from {} ({} elements)",
            sections.len(),
            document_id,
            elements.len()
        );
        sections
    }

    fn classify(&self, elements: &[TextElement]) -> Vec<Role> {
        let sizes: Vec<f32> = elements.iter().map(|e| e.font_size).collect();
        let fonts = FontBands::from_sizes(&sizes);
        let title_band = has_title_band(elements, &fonts);
        let table = LevelTable::new(fonts, title_band);
        let furniture = Furniture::detect(elements);

        let mut previous: Option<&TextElement> = None;
        let mut roles = Vec::with_capacity(elements.len());

        for element in elements {
            let text = element.trimmed();
            if text.is_empty()
                || furniture.contains(element)
                || self.classifier.is_page_number(text)
            {
                roles.push(Role::Skip);
                continue;
            }

            let role = if self.classifier.is_excluded(text) {
                Role::Body
            } else {
                let score = self.classifier.score(element, previous, table.bands());
                if self.classifier.accepts(score) {
                    let level = match table.level_for(element.font_size) {
                        HeadingLevel::Body => self
                            .classifier
                            .numbering_depth(text)
                            .map(HeadingLevel::from_depth)
                            .unwrap_or(HeadingLevel::H3),
                        level => level,
                    };
                    Role::Heading(level, score)
                } else {
                    Role::Body
                }
            };

            roles.push(role);
            previous = Some(element);
        }

        roles
    }

    fn merge_candidates(
        &self,
        document_id: &str,
        elements: &[TextElement],
        roles: &[Role],
    ) -> Vec<HeadingCandidate> {
        let mut candidates: Vec<HeadingCandidate> = Vec::new();
        // Index of the last non-skipped element, if it was a heading
        let mut last_heading: Option<usize> = None;

        for (idx, (element, role)) in elements.iter().zip(roles).enumerate() {
            match *role {
                Role::Skip => {}
                Role::Body => last_heading = None,
                Role::Heading(level, score) => {
                    let continues = match (last_heading, candidates.last()) {
                        (Some(prev_idx), Some(candidate)) => {
                            candidate.level == level
                                && self.continues_heading(&elements[prev_idx], element)
                        }
                        _ => false,
                    };

                    match candidates.last_mut() {
                        Some(candidate) if continues => {
                            candidate.text.push(' ');
                            candidate.text.push_str(element.trimmed());
                            candidate.end = idx + 1;
                            candidate.score = candidate.score.max(score);
                        }
                        _ => candidates.push(HeadingCandidate {
                            document_id: document_id.to_string(),
                            page_number: element.page_number,
                            text: element.trimmed().to_string(),
                            level,
                            score,
                            position: idx,
                            end: idx + 1,
                        }),
                    }
                    last_heading = Some(idx);
                }
            }
        }

        candidates
    }

    /// Check if `next` is the wrapped continuation of heading line `prev`.
    fn continues_heading(&self, prev: &TextElement, next: &TextElement) -> bool {
        let prev_text = prev.trimmed();
        prev.page_number == next.page_number
            && next.y - prev.bottom() < next.font_size * HEADING_CONTINUATION_GAP
            && !prev_text.ends_with(['.', ':'])
            && !self.classifier.has_leading_pattern(next.trimmed())
    }
}

impl Default for StructureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// The largest band is a title when it is small and sits on the first page.
fn has_title_band(elements: &[TextElement], fonts: &FontBands) -> bool {
    if fonts.bands.len() < 2 {
        return false;
    }
    let first_page = elements.iter().map(|e| e.page_number).min().unwrap_or(1);
    let in_band: Vec<&TextElement> = elements
        .iter()
        .filter(|e| fonts.band_of(e.font_size) == Some(0))
        .collect();

    !in_band.is_empty()
        && in_band.len() <= MAX_TITLE_ELEMENTS
        && in_band.iter().all(|e| e.page_number == first_page)
}

/// One untitled section per page.
fn page_sections(document_id: &str, elements: &[TextElement], roles: &[Role]) -> Vec<Section> {
    let mut pages: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (idx, element) in elements.iter().enumerate() {
        if roles[idx] != Role::Skip {
            pages.entry(element.page_number).or_default().push(idx);
        }
    }

    if pages.is_empty() {
        let page = elements.first().map(|e| e.page_number).unwrap_or(1);
        return vec![Section::new(document_id, page, "", HeadingLevel::Body)
            .with_span(0, elements.len())];
    }

    let spacing = line_spacing(elements, roles);
    pages
        .into_iter()
        .map(|(page, indices)| {
            let body: Vec<&TextElement> = indices.iter().map(|&i| &elements[i]).collect();
            let start = indices.first().copied().unwrap_or(0);
            let end = indices.last().map(|&i| i + 1).unwrap_or(start);
            Section::new(document_id, page, "", HeadingLevel::Body)
                .with_body(join_paragraphs(&body, spacing))
                .with_span(start, end)
        })
        .collect()
}

/// Median vertical distance between consecutive body lines.
fn line_spacing(elements: &[TextElement], roles: &[Role]) -> f32 {
    let body: Vec<&TextElement> = elements
        .iter()
        .zip(roles)
        .filter(|(_, role)| **role == Role::Body)
        .map(|(e, _)| e)
        .collect();

    let mut spacings: Vec<f32> = body
        .windows(2)
        .filter(|w| w[0].page_number == w[1].page_number)
        .map(|w| w[1].y - w[0].y)
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }
    spacings.sort_by(|a, b| a.total_cmp(b));
    spacings[spacings.len() / 2]
}

/// Join body elements, separating paragraphs with blank lines.
fn join_paragraphs(elements: &[&TextElement], spacing: f32) -> String {
    let mut text = String::new();
    let mut previous: Option<&TextElement> = None;

    for element in elements {
        let content = element.trimmed();
        if content.is_empty() {
            continue;
        }
        if let Some(prev) = previous {
            text.push_str(separator(prev, element, spacing));
        }
        text.push_str(content);
        previous = Some(element);
    }

    text
}

fn separator(prev: &TextElement, curr: &TextElement, spacing: f32) -> &'static str {
    if prev.page_number != curr.page_number {
        return "\n\n";
    }

    let dy = curr.y - prev.y;
    if dy.abs() <= prev.font_size * 0.3 {
        return " ";
    }

    // Large spacing, a jump back up (next column), a font change or an
    // indented first line all start a new paragraph
    if dy > spacing * 1.5
        || dy < 0.0
        || (prev.font_size - curr.font_size).abs() > 1.0
        || curr.x - prev.x > 20.0
    {
        "\n\n"
    } else {
        "\n"
    }
}
