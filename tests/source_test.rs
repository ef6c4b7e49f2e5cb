//! Integration tests for element sources and collection directories.

use std::fs;
use std::sync::Arc;

use docrank::error::Result;
use docrank::{DocRank, ElementSource, Error, SourceRegistry, TextElement};
use tempfile::TempDir;

/// Plain text source for testing: `# ` lines are headings.
struct MarkedTextSource;

impl ElementSource for MarkedTextSource {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn name(&self) -> &str {
        "marked-text"
    }

    fn load_bytes(&self, bytes: &[u8], document_id: &str) -> Result<Vec<TextElement>> {
        let text = String::from_utf8_lossy(bytes);
        let mut y = 72.0;
        Ok(text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let element = match line.strip_prefix("# ") {
                    Some(heading) => {
                        y += 20.0;
                        TextElement::new(document_id, 1, heading, 16.0).bold()
                    }
                    None => TextElement::new(document_id, 1, line, 11.0),
                };
                let element = element.at(72.0, y);
                y += 16.0;
                element
            })
            .collect())
    }
}

const PAPER: &[u8] = br#"[
    {"page_number": 1, "text": "Introduction", "font_size": 16.0, "is_bold": true, "x": 72, "y": 72},
    {"page_number": 1, "text": "Coastal dunes shift with every winter storm season.", "font_size": 11.0, "x": 72, "y": 110},
    {"page_number": 1, "text": "Methodology", "font_size": 16.0, "is_bold": true, "x": 72, "y": 150},
    {"page_number": 1, "text": "We surveyed the dunes with drones over three years.", "font_size": 11.0, "x": 72, "y": 188}
]"#;

// ==================== Registry ====================

#[test]
fn test_registry_new_is_empty() {
    let registry = SourceRegistry::new();
    assert!(!registry.supports("json"));
    assert!(registry.supported_extensions().is_empty());
}

#[test]
fn test_registry_register_custom_source() {
    let mut registry = SourceRegistry::with_defaults();
    registry.register(Arc::new(MarkedTextSource));

    assert!(registry.supports("json"));
    assert!(registry.supports("TXT"));
    assert_eq!(registry.supported_extensions(), vec!["json", "text", "txt"]);

    let source = registry.get_by_name("Marked-Text");
    assert!(source.is_some());
    assert!(source.unwrap().supports_extension("text"));
    assert!(registry.get_by_name("unknown").is_none());
}

#[test]
fn test_custom_source_feeds_the_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("guide.txt");
    fs::write(
        &path,
        "# Packing\nBring layers for cold mornings on the coast.\n\
         # Budget\nHostels near the harbour cost little in spring.\n",
    )
    .unwrap();

    let mut registry = SourceRegistry::with_defaults();
    registry.register(Arc::new(MarkedTextSource));

    let result = DocRank::new()
        .with_registry(registry)
        .analyze_files(&[&path], "Travel Planner", "Plan a cheap budget trip")
        .unwrap();

    let report = result.report();
    assert_eq!(report.metadata.input_documents, vec!["guide.txt"]);
    assert_eq!(report.extracted_sections[0].section_title, "Budget");
    assert!(result.to_text().contains("1. Budget [guide.txt, page 1]"));
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("paper.pdf");
    fs::write(&path, b"%PDF-1.7").unwrap();

    let err = DocRank::new()
        .analyze_files(&[&path], "Analyst", "Summarize")
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedSource(_)));
}

// ==================== Collections ====================

#[test]
fn test_analyze_collection_directory() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("PDFs")).unwrap();
    fs::write(
        dir.path().join("challenge1b_input.json"),
        r#"{
            "challenge_info": {"challenge_id": "round_1b_001"},
            "documents": [
                {"filename": "dunes.pdf", "title": "Dunes"},
                {"filename": "missing.pdf", "title": "Missing"}
            ],
            "persona": {"role": "PhD Researcher in Geography"},
            "job_to_be_done": {"task": "Review the survey methodology"}
        }"#,
    )
    .unwrap();
    fs::write(dir.path().join("PDFs").join("dunes.json"), PAPER).unwrap();

    let result = DocRank::new().analyze_collection(dir.path()).unwrap();
    let report = result.report();

    assert_eq!(
        report.metadata.input_documents,
        vec!["dunes.pdf", "missing.pdf"]
    );
    assert_eq!(report.metadata.persona, "PhD Researcher in Geography");
    assert_eq!(report.len(), 3);
    assert_eq!(report.extracted_sections[0].section_title, "Methodology");
    assert!(report.subsection_analysis[0]
        .refined_text
        .starts_with("We surveyed the dunes"));
}

#[test]
fn test_collection_without_any_documents_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"documents": [], "persona": "Analyst", "job_to_be_done": "Summarize"}"#,
    )
    .unwrap();

    let err = DocRank::new().analyze_collection(dir.path()).unwrap_err();
    assert!(matches!(err, Error::NoDocuments));
}

#[test]
fn test_broken_dump_contributes_an_empty_section() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("PDFs")).unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"documents": ["dunes.pdf", "broken.pdf"], "persona": "Analyst", "job_to_be_done": "Review the survey methodology"}"#,
    )
    .unwrap();
    fs::write(dir.path().join("PDFs").join("dunes.json"), PAPER).unwrap();
    fs::write(dir.path().join("PDFs").join("broken.json"), "not json").unwrap();

    let result = DocRank::new().analyze_collection(dir.path()).unwrap();
    let report = result.report();

    assert_eq!(
        report.metadata.input_documents,
        vec!["dunes.pdf", "broken.pdf"]
    );
    let broken: Vec<_> = report
        .extracted_sections
        .iter()
        .filter(|s| s.document == "broken.pdf")
        .collect();
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].section_title, "");
    assert_eq!(broken[0].page_number, 1);
}

#[test]
fn test_collection_of_missing_documents_still_reports_them() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"documents": ["gone.pdf"], "persona": "Analyst", "job_to_be_done": "Summarize"}"#,
    )
    .unwrap();

    let result = DocRank::new().analyze_collection(dir.path()).unwrap();
    let report = result.report();

    assert_eq!(report.metadata.input_documents, vec!["gone.pdf"]);
    assert_eq!(report.len(), 1);
    assert_eq!(report.extracted_sections[0].importance_rank, 1);
    assert!(report.subsection_analysis[0].refined_text.is_empty());
}
