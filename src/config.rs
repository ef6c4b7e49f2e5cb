//! Collection configuration.
//!
//! A collection is a directory holding a configuration file that names the
//! documents, the persona and the job, plus one element dump per document.
//!
//! ```json
//! {
//!   "documents": ["paper1.pdf", {"filename": "paper2.pdf", "title": "Paper 2"}],
//!   "persona": {"role": "PhD Researcher in Computational Biology"},
//!   "job_to_be_done": {"task": "Prepare a literature review"}
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pipeline::DocumentInput;
use crate::source::SourceRegistry;

/// Configuration file names looked up in a collection directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["challenge1b_input.json", "config.json"];

/// Subdirectory that may hold the documents.
const DOCUMENTS_DIR: &str = "PDFs";

/// A document listed in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentEntry {
    /// Plain file name
    Name(String),
    /// File name with an optional title
    Detailed {
        filename: String,
        #[serde(default)]
        title: Option<String>,
    },
}

impl DocumentEntry {
    /// File name of the document.
    pub fn filename(&self) -> &str {
        match self {
            DocumentEntry::Name(name) => name,
            DocumentEntry::Detailed { filename, .. } => filename,
        }
    }

    /// Title of the document, if given.
    pub fn title(&self) -> Option<&str> {
        match self {
            DocumentEntry::Name(_) => None,
            DocumentEntry::Detailed { title, .. } => title.as_deref(),
        }
    }
}

/// Persona description: a string or `{"role": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersonaSpec {
    Text(String),
    Role { role: String },
}

/// Job description: a string or `{"task": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobSpec {
    Text(String),
    Task { task: String },
}

/// Configuration of a document collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Documents to analyze, in order
    pub documents: Vec<DocumentEntry>,

    /// Reader persona
    pub persona: PersonaSpec,

    /// Job to be done
    pub job_to_be_done: JobSpec,

    /// Free-form description of the collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_info: Option<serde_json::Value>,
}

impl CollectionConfig {
    /// Create a configuration from plain strings.
    pub fn new(documents: Vec<String>, persona: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            documents: documents.into_iter().map(DocumentEntry::Name).collect(),
            persona: PersonaSpec::Text(persona.into()),
            job_to_be_done: JobSpec::Text(job.into()),
            challenge_info: None,
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read a configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Find and read the configuration file of a collection directory.
    pub fn find(dir: &Path) -> Result<Self> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                Error::Config(format!(
                    "No {} found in {}",
                    CONFIG_FILE_NAMES.join(" or "),
                    dir.display()
                ))
            })
            .and_then(|path| Self::from_path(&path))
    }

    /// Persona text.
    pub fn persona_text(&self) -> &str {
        match &self.persona {
            PersonaSpec::Text(text) | PersonaSpec::Role { role: text } => text,
        }
    }

    /// Job text.
    pub fn job_text(&self) -> &str {
        match &self.job_to_be_done {
            JobSpec::Text(text) | JobSpec::Task { task: text } => text,
        }
    }

    /// File names of the listed documents.
    pub fn document_names(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.filename()).collect()
    }

    /// Load the element dumps of all listed documents.
    ///
    /// Every listed document stays in the batch. One without a dump, or with
    /// a dump that cannot be decoded, is logged and loaded with no elements,
    /// so it contributes a single empty section.
    pub fn load_documents(&self, dir: &Path, registry: &SourceRegistry) -> Vec<DocumentInput> {
        let mut documents = Vec::with_capacity(self.documents.len());

        for entry in &self.documents {
            let name = entry.filename();
            let elements = match resolve_dump(dir, name) {
                Some(path) => registry.load(&path, name).unwrap_or_else(|e| {
                    log::warn!("Document {} could not be read: {}", name, e);
                    Vec::new()
                }),
                None => {
                    log::warn!("Document {} not found in {}", name, dir.display());
                    Vec::new()
                }
            };
            documents.push(DocumentInput::new(name, elements));
        }

        documents
    }
}

/// Paths where the element dump of a document may live, in lookup order.
///
/// A document `paper.pdf` is looked up as `paper.pdf.json` and `paper.json`,
/// first in the `PDFs` subdirectory and then in the collection directory.
pub fn dump_candidates(dir: &Path, filename: &str) -> Vec<PathBuf> {
    let path = Path::new(filename);
    let is_json = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let mut names = Vec::new();
    if is_json {
        names.push(filename.to_string());
    } else {
        names.push(format!("{}.json", filename));
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(format!("{}.json", stem));
        }
    }

    let mut candidates = Vec::new();
    for base in [dir.join(DOCUMENTS_DIR), dir.to_path_buf()] {
        for name in &names {
            candidates.push(base.join(name));
        }
    }
    candidates
}

/// First existing element dump of a document.
pub fn resolve_dump(dir: &Path, filename: &str) -> Option<PathBuf> {
    dump_candidates(dir, filename)
        .into_iter()
        .find(|path| path.is_file())
}
