//! Passage refinement: layout artifact cleanup and length limiting.

use std::ops::Range;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Default maximum length of a refined passage, in characters.
pub const DEFAULT_MAX_CHARS: usize = 500;

const TERMINATORS: [char; 4] = ['.', '!', '?', '…'];
const CLOSERS: [char; 6] = ['"', '\'', ')', ']', '”', '’'];

/// Options for passage refinement.
#[derive(Debug, Clone)]
pub struct RefineOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Replace ligature characters (ﬁ, ﬂ, ...)
    pub fix_ligatures: bool,

    /// Join words hyphenated across line wraps
    pub fix_hyphenation: bool,

    /// Remove leading bullet markers
    pub strip_bullets: bool,

    /// Drop an unterminated last sentence when a full sentence exists
    pub drop_trailing_fragment: bool,

    /// Maximum length in characters (0 = unlimited)
    pub max_chars: usize,
}

impl RefineOptions {
    /// Default options with a length limit.
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            ..Self::default()
        }
    }

    /// Only collapse whitespace and limit length.
    pub fn minimal(max_chars: usize) -> Self {
        Self {
            normalize_unicode: false,
            fix_ligatures: false,
            fix_hyphenation: false,
            strip_bullets: false,
            drop_trailing_fragment: false,
            max_chars,
        }
    }
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            fix_hyphenation: true,
            strip_bullets: true,
            drop_trailing_fragment: true,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

/// Cleans a raw passage into presentable text.
pub struct Refiner {
    options: RefineOptions,
    hyphenation_regex: Regex,
    bullet_regex: Regex,
    ligature_map: Vec<(&'static str, &'static str)>,
}

impl Refiner {
    /// Create a refiner with the given options.
    pub fn new(options: RefineOptions) -> Self {
        Self {
            options,
            hyphenation_regex: Regex::new(r"([a-zA-Z])-[ \t]*\n\s*([a-z])").unwrap(),
            bullet_regex: Regex::new(r"(?m)^[ \t]*(?:[•●○▪■□◆◇►▻➤✓\-*]|\d{1,2}[.)])[ \t]+")
                .unwrap(),
            ligature_map: vec![
                ("\u{FB00}", "ff"),
                ("\u{FB01}", "fi"),
                ("\u{FB02}", "fl"),
                ("\u{FB03}", "ffi"),
                ("\u{FB04}", "ffl"),
                ("\u{FB05}", "st"),
                ("\u{FB06}", "st"),
            ],
        }
    }

    /// The options in use.
    pub fn options(&self) -> &RefineOptions {
        &self.options
    }

    /// Refine a passage.
    ///
    /// The result is a single line of text, never longer than
    /// `max_chars` characters and never cut inside a word.
    pub fn refine(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect::<String>()
        } else {
            text.to_string()
        };

        if self.options.fix_ligatures {
            for (ligature, replacement) in &self.ligature_map {
                result = result.replace(ligature, replacement);
            }
        }
        result = result.replace('\u{FFFD}', "");

        if self.options.fix_hyphenation {
            result = self.hyphenation_regex.replace_all(&result, "$1$2").to_string();
        }

        if self.options.strip_bullets {
            result = self.bullet_regex.replace_all(&result, "").to_string();
        }

        result = collapse_whitespace(&result);

        if self.options.drop_trailing_fragment {
            result = drop_trailing_fragment(&result).to_string();
        }

        if self.options.max_chars > 0 {
            result = truncate(&result, self.options.max_chars).to_string();
        }

        result
    }
}

impl Default for Refiner {
    fn default() -> Self {
        Self::new(RefineOptions::default())
    }
}

/// Replace every whitespace run with a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte ranges of the sentences of a text.
///
/// A sentence ends at `.`, `!`, `?` or `…` (plus closing quotes) followed by
/// whitespace and a capital letter, digit or opening quote. Lowercase
/// continuations ("e.g. the") do not end a sentence.
pub fn sentence_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !TERMINATORS.contains(&c) {
            continue;
        }
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if TERMINATORS.contains(&next) || CLOSERS.contains(&next) {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        let at_boundary = match chars.peek() {
            None => true,
            Some(&(_, next)) => next.is_whitespace() && starts_sentence(&text[end..]),
        };
        if at_boundary {
            push_trimmed(text, start..end, &mut spans);
            start = end;
        }
    }
    push_trimmed(text, start..text.len(), &mut spans);

    spans
}

/// Split a text into trimmed sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    sentence_spans(text)
        .into_iter()
        .map(|span| &text[span])
        .collect()
}

/// Check if a sentence ends with terminal punctuation.
pub fn is_terminated(sentence: &str) -> bool {
    sentence
        .trim_end()
        .trim_end_matches(CLOSERS)
        .ends_with(TERMINATORS)
}

fn starts_sentence(rest: &str) -> bool {
    match rest.trim_start().chars().next() {
        None => true,
        Some(c) => c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '“' | '(' | '['),
    }
}

fn push_trimmed(text: &str, range: Range<usize>, spans: &mut Vec<Range<usize>>) {
    let slice = &text[range.clone()];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return;
    }
    let offset = range.start + (slice.len() - slice.trim_start().len());
    spans.push(offset..offset + trimmed.len());
}

/// Drop an unterminated last sentence if a complete sentence precedes it.
fn drop_trailing_fragment(text: &str) -> &str {
    let spans = sentence_spans(text);
    match spans.as_slice() {
        [.., keep, last] if !is_terminated(&text[last.clone()]) => &text[..keep.end],
        _ => text,
    }
}

/// Cut a text to at most `max_chars` characters.
///
/// Prefers the last sentence boundary that fits, then the last word
/// boundary. A single word longer than the limit yields an empty string.
pub fn truncate(text: &str, max_chars: usize) -> &str {
    let limit = match text.char_indices().nth(max_chars) {
        Some((idx, _)) => idx,
        None => return text,
    };

    if let Some(span) = sentence_spans(text)
        .into_iter()
        .take_while(|span| span.end <= limit)
        .last()
    {
        return &text[..span.end];
    }

    // The character right after the cut decides whether the cut ends a word
    if text[limit..].starts_with(char::is_whitespace) {
        return text[..limit].trim_end();
    }
    match text[..limit].rfind(char::is_whitespace) {
        Some(idx) => text[..idx].trim_end(),
        None => "",
    }
}
