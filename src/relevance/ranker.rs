//! Global top-K selection across all documents.

use std::cmp::Ordering;

use crate::model::ScoredSection;

/// Default number of sections kept.
pub const DEFAULT_TOP_K: usize = 5;

/// Order two sections: score, level, document, page, position.
pub fn compare(a: &ScoredSection, b: &ScoredSection) -> Ordering {
    b.relevance_score
        .total_cmp(&a.relevance_score)
        .then_with(|| {
            b.section
                .level
                .importance()
                .total_cmp(&a.section.level.importance())
        })
        .then_with(|| a.document_index.cmp(&b.document_index))
        .then_with(|| a.section.page_number.cmp(&b.section.page_number))
        .then_with(|| a.section.start_position.cmp(&b.section.start_position))
}

/// Sort all sections and keep the best `k`, ranked 1..=k.
///
/// Returns every section when fewer than `k` exist.
pub fn rank(mut sections: Vec<ScoredSection>, k: usize) -> Vec<ScoredSection> {
    let total = sections.len();
    // Stable sort: full ties keep input order
    sections.sort_by(compare);
    sections.truncate(k);

    for (i, section) in sections.iter_mut().enumerate() {
        section.importance_rank = Some(i as u32 + 1);
    }

    if total < k {
        log::debug!("Only {} sections available for top {}", total, k);
    }
    sections
}
