//! Element sources: the boundary to external document decoders.
//!
//! A source turns a file into positioned text elements. Sources are
//! registered by file extension, so decoders for new formats can be added
//! without touching the pipeline.
//!
//! # Example
//!
//! ```no_run
//! use docrank::source::SourceRegistry;
//! use std::path::Path;
//!
//! fn main() -> docrank::Result<()> {
//!     let registry = SourceRegistry::with_defaults();
//!     let document = registry.load_document(Path::new("paper.json"))?;
//!     println!("{} elements", document.elements.len());
//!     Ok(())
//! }
//! ```

mod json;

pub use json::JsonElementSource;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::TextElement;
use crate::pipeline::DocumentInput;

/// Trait for element sources.
///
/// Implement this trait to feed a new file format into the pipeline.
pub trait ElementSource: Send + Sync {
    /// Supported file extensions, lowercase without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Name of this source.
    fn name(&self) -> &str;

    /// Decode elements from bytes.
    fn load_bytes(&self, bytes: &[u8], document_id: &str) -> Result<Vec<TextElement>>;

    /// Decode elements from a file.
    fn load(&self, path: &Path, document_id: &str) -> Result<Vec<TextElement>> {
        let bytes = std::fs::read(path)?;
        self.load_bytes(&bytes, document_id)
    }

    /// Check if this source supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry of element sources keyed by extension.
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn ElementSource>>,
    by_name: HashMap<String, Arc<dyn ElementSource>>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the default sources (JSON).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonElementSource::new()));
        registry
    }

    /// Register a source for all its extensions.
    pub fn register(&mut self, source: Arc<dyn ElementSource>) {
        for ext in source.supported_extensions() {
            self.sources.insert(ext.to_lowercase(), source.clone());
        }
        self.by_name.insert(source.name().to_lowercase(), source);
    }

    /// Get a source by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn ElementSource>> {
        self.sources.get(&ext.to_lowercase()).cloned()
    }

    /// Get a source by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn ElementSource>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.sources.contains_key(&ext.to_lowercase())
    }

    /// All supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.sources.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Load elements from a file using the source for its extension.
    pub fn load(&self, path: &Path, document_id: &str) -> Result<Vec<TextElement>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedSource(path.display().to_string()))?;

        let source = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedSource(ext.to_string()))?;

        source.load(path, document_id)
    }

    /// Load a file as a document named after the file.
    pub fn load_document(&self, path: &Path) -> Result<DocumentInput> {
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let elements = self.load(path, &id)?;
        Ok(DocumentInput::new(id, elements))
    }

    /// Decode bytes using the source for an extension.
    pub fn load_bytes(&self, bytes: &[u8], ext: &str, document_id: &str) -> Result<Vec<TextElement>> {
        let source = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedSource(ext.to_string()))?;

        source.load_bytes(bytes, document_id)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
