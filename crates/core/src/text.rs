//! Text normalization shared by training and classification.
//!
//! A token is a whitespace-separated word, lowercased, with every
//! non-alphanumeric character removed. Words that normalize to nothing
//! (pure punctuation) produce no token.

/// Normalize a single whitespace-delimited word.
pub fn normalize_word(word: &str) -> Option<String> {
    let token: String = word
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Split raw text into normalized tokens, preserving order and duplicates.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().filter_map(normalize_word).collect()
}
