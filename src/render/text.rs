//! Plain text rendering of an analysis report.

use std::fmt::Write;

use crate::model::AnalysisReport;

/// Render a report as a readable ranked list.
pub fn to_text(report: &AnalysisReport) -> String {
    let mut output = String::new();
    let meta = &report.metadata;

    let _ = writeln!(output, "Persona: {}", meta.persona);
    let _ = writeln!(output, "Job: {}", meta.job_to_be_done);
    let _ = writeln!(output, "Documents: {}", meta.input_documents.join(", "));

    for (section, analysis) in report
        .extracted_sections
        .iter()
        .zip(&report.subsection_analysis)
    {
        let title = if section.section_title.is_empty() {
            "(untitled)"
        } else {
            section.section_title.as_str()
        };
        let _ = writeln!(
            output,
            "\n{}. {} [{}, page {}] score {:.3}",
            section.importance_rank,
            title,
            section.document,
            section.page_number,
            analysis.relevance_score
        );
        if !analysis.refined_text.is_empty() {
            let _ = writeln!(output, "   {}", analysis.refined_text);
        }
        for insight in &analysis.key_insights {
            let _ = writeln!(output, "   - {}", insight);
        }
    }

    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, Metadata, ScoredSection, Section, SubsectionInsight};
    use chrono::Utc;

    #[test]
    fn test_to_text() {
        let mut report = AnalysisReport::new(Metadata::new(
            vec!["a.pdf".to_string()],
            "Analyst",
            "Summarize",
            Utc::now(),
        ));
        let mut scored = ScoredSection::new(
            Section::new("a.pdf", 3, "Revenue", HeadingLevel::H1),
            0,
            0,
            2.0,
        );
        scored.importance_rank = Some(1);
        let mut insight = SubsectionInsight::empty("a.pdf", 3, "Revenue");
        insight.refined_text = "Revenue grew.".to_string();
        insight.key_insights = vec!["Revenue grew by 12 percent in Q3.".to_string()];
        report.push(&scored, insight);

        let text = to_text(&report);
        assert!(text.starts_with("Persona: Analyst"));
        assert!(text.contains("1. Revenue [a.pdf, page 3]"));
        assert!(text.contains("   Revenue grew."));
        assert!(text.contains("   - Revenue grew by 12 percent"));
    }
}
