//! Word tokenization, stop-word filtering and light stemming.
//!
//! Shared by the profile builder and the relevance scorer so that profile
//! terms and section text are normalized the same way.

/// Words ignored when building terms.
pub const STOP_WORDS: &[&str] = &[
    "about", "after", "all", "also", "and", "any", "are", "been", "before", "being", "between",
    "both", "but", "can", "could", "did", "does", "each", "for", "from", "had", "has", "have",
    "her", "his", "how", "into", "its", "may", "more", "most", "not", "now", "off", "on", "only",
    "other", "our", "out", "over", "should", "some", "such", "than", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "those", "through", "under", "upon", "very",
    "was", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
    "with", "within", "would", "you", "your",
];

/// Minimum length (exclusive) of a content word.
const MIN_WORD_CHARS: usize = 2;

/// Split text into lowercase words (`\w+` runs).
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Check if a lowercase word is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

/// Check if a lowercase word carries meaning on its own.
pub fn is_content_word(word: &str) -> bool {
    word.chars().count() > MIN_WORD_CHARS && !is_stop_word(word)
}

/// Strip common English plural endings.
///
/// `studies` → `study`, `datasets` → `dataset`; words ending in `ss`, `is`
/// or `us` (`process`, `analysis`, `status`) are kept as they are.
pub fn stem(word: &str) -> String {
    if word.len() > 4 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("is")
        && !word.ends_with("us")
    {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Normalized content terms of a text, in order.
pub fn terms(text: &str) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|w| is_content_word(w))
        .map(|w| stem(&w))
        .collect()
}

/// Adjacent pairs of terms, joined by a space.
pub fn bigrams(terms: &[String]) -> Vec<String> {
    terms
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect()
}

/// Lowercase words joined by single spaces and padded with a space on
/// both ends, so that phrases can be matched on word boundaries.
pub fn phrase_haystack(text: &str) -> String {
    let mut haystack = String::from(" ");
    for word in words(text) {
        haystack.push_str(&word);
        haystack.push(' ');
    }
    haystack
}
