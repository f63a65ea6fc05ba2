//! Tokenization for text vectorization.
//!
//! Lowercases, splits on whitespace and punctuation, drops English
//! stopwords, and expands the token stream into word n-grams. The n-gram
//! terms are what the TF-IDF vocabulary is built from.

/// English stopwords, sorted for binary search.
///
/// Matches the common English function-word set used when the reference
/// corpus was curated; stopwords are removed before n-gram expansion so
/// "a running fox" and "running fox" produce the same terms.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am",
    "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "cannot", "could", "did", "do", "does", "doing", "down",
    "during", "each", "few", "for", "from", "further", "had", "has",
    "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is",
    "it", "its", "itself", "just", "me", "more", "most", "my",
    "myself", "no", "nor", "not", "now", "of", "off", "on",
    "once", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "so", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will",
    "with", "you", "your", "yours", "yourself", "yourselves",
];

#[inline]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Split text into lowercase word tokens, stopwords removed
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|s| !s.is_empty() && !is_stop_word(s))
        .map(|s| s.to_string())
        .collect()
}

/// Expand a token stream into all word n-grams for n in `min..=max`.
///
/// Multi-word terms are joined with a single space, so "running fox" is
/// one vocabulary term distinct from "running" and "fox".
pub fn ngrams(tokens: &[String], min: usize, max: usize) -> Vec<String> {
    let mut terms = Vec::new();
    for n in min..=max {
        if n == 0 || n > tokens.len() {
            continue;
        }
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}
