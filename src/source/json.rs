//! Element dumps stored as JSON.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::TextElement;

use super::ElementSource;

/// Reads text elements produced by an external decoder.
///
/// Three layouts are accepted:
///
/// ```json
/// [{"text": "Introduction", "page_number": 1, "font_size": 16.0, ...}]
/// {"elements": [...]}
/// {"pages": [{"page_number": 1, "elements": [...]}]}
/// ```
///
/// In the paged layout, elements take their page number from the page.
#[derive(Debug, Clone, Default)]
pub struct JsonElementSource {
    _private: (),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ElementDump {
    Flat(Vec<TextElement>),
    Paged { pages: Vec<PageDump> },
    Wrapped { elements: Vec<TextElement> },
}

#[derive(Deserialize)]
struct PageDump {
    #[serde(default)]
    page_number: Option<u32>,
    #[serde(default)]
    elements: Vec<TextElement>,
}

impl JsonElementSource {
    /// Create a new JSON element source.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl ElementSource for JsonElementSource {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn load_bytes(&self, bytes: &[u8], document_id: &str) -> Result<Vec<TextElement>> {
        let dump: ElementDump = serde_json::from_slice(bytes)
            .map_err(|e| Error::InvalidElements(document_id.to_string(), e.to_string()))?;

        let mut elements = match dump {
            ElementDump::Flat(elements) | ElementDump::Wrapped { elements } => elements,
            ElementDump::Paged { pages } => pages
                .into_iter()
                .enumerate()
                .flat_map(|(i, page)| {
                    let number = page.page_number.unwrap_or(i as u32 + 1);
                    page.elements.into_iter().map(move |mut el| {
                        el.page_number = number;
                        el
                    })
                })
                .collect(),
        };

        let total = elements.len();
        elements.retain(|el| !el.trimmed().is_empty());
        if elements.len() < total {
            log::debug!(
                "Dropped {} empty elements from {}",
                total - elements.len(),
                document_id
            );
        }

        for element in &mut elements {
            element.document_id = document_id.to_string();
        }
        Ok(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_array() {
        let json = br#"[
            {"text": "Introduction", "page_number": 1, "font_size": 16.0, "is_bold": true},
            {"text": "Body", "page_number": 2}
        ]"#;
        let elements = JsonElementSource::new().load_bytes(json, "a.pdf").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].document_id, "a.pdf");
        assert!(elements[0].is_bold);
        assert_eq!(elements[1].page_number, 2);
    }

    #[test]
    fn test_paged_layout() {
        let json = br#"{"pages": [
            {"page_number": 1, "elements": [{"text": "One"}]},
            {"elements": [{"text": "Two"}, {"text": "   "}]}
        ]}"#;
        let elements = JsonElementSource::new().load_bytes(json, "b.pdf").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].page_number, 1);
        assert_eq!(elements[1].page_number, 2);
        assert_eq!(elements[1].text, "Two");
    }

    #[test]
    fn test_wrapped_layout() {
        let json = br#"{"elements": [{"text": "Only", "page": 4}]}"#;
        let elements = JsonElementSource::new().load_bytes(json, "c").unwrap();
        assert_eq!(elements[0].page_number, 4);
    }

    #[test]
    fn test_invalid_json() {
        let err = JsonElementSource::new()
            .load_bytes(b"{\"pages\": 3}", "bad.json")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidElements(ref id, _) if id == "bad.json"));
    }
}
