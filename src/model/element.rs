//! Positioned text elements and heading levels.

use serde::{Deserialize, Serialize};

/// A run of text on a page with position and style information.
///
/// Produced by an external decoder. Coordinates are in points with the
/// origin at the top-left corner of the page, so `y` grows downward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// Identifier of the document this element belongs to
    #[serde(default)]
    pub document_id: String,

    /// Page number (1-indexed)
    #[serde(default = "default_page", alias = "page")]
    pub page_number: u32,

    /// The text content
    pub text: String,

    /// Font size in points
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Whether the font appears to be bold
    #[serde(default)]
    pub is_bold: bool,

    /// X position (left edge)
    #[serde(default, alias = "x_position")]
    pub x: f32,

    /// Y position (top edge)
    #[serde(default, alias = "y_position")]
    pub y: f32,

    /// Width of the text
    #[serde(default)]
    pub width: f32,

    /// Height of the text
    #[serde(default)]
    pub height: f32,
}

fn default_page() -> u32 {
    1
}

fn default_font_size() -> f32 {
    12.0
}

impl TextElement {
    /// Create a new element with default geometry.
    pub fn new(
        document_id: impl Into<String>,
        page_number: u32,
        text: impl Into<String>,
        font_size: f32,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            page_number,
            text: text.into(),
            font_size,
            is_bold: false,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: font_size,
        }
    }

    /// Mark the element as bold.
    pub fn bold(mut self) -> Self {
        self.is_bold = true;
        self
    }

    /// Set the position of the element.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the size of the element's bounding box.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Bottom edge of the element.
    pub fn bottom(&self) -> f32 {
        let height = if self.height > 0.0 {
            self.height
        } else {
            self.font_size
        };
        self.y + height
    }

    /// Trimmed text content.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Heading level of a detected structure element.
///
/// Variants are ordered from most to least important, so `Title < H1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Document title
    Title,
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
    /// Body text
    Body,
}

impl HeadingLevel {
    /// Ordinal importance weight used by relevance scoring.
    pub fn importance(self) -> f64 {
        match self {
            HeadingLevel::Title => 4.0,
            HeadingLevel::H1 => 3.0,
            HeadingLevel::H2 => 2.0,
            HeadingLevel::H3 => 1.0,
            HeadingLevel::Body => 0.5,
        }
    }

    /// Check if this level is a heading (anything but body text).
    pub fn is_heading(self) -> bool {
        self != HeadingLevel::Body
    }

    /// Heading level for a section numbering depth (`1` → H1, `1.2` → H2).
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// Nesting depth for display (`Title` → 0, `H3` and `Body` → 3).
    pub fn depth(self) -> usize {
        match self {
            HeadingLevel::Title => 0,
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 | HeadingLevel::Body => 3,
        }
    }

    /// Short label ("Title", "H1", ...).
    pub fn label(self) -> &'static str {
        match self {
            HeadingLevel::Title => "Title",
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::Body => "Body",
        }
    }
}
