//! Word counting over free text.

use once_cell::sync::Lazy;
use regex::Regex;

/// A token counts as a word if it holds at least one digit or word character.
#[allow(clippy::unwrap_used)]
static WORD_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d\w]").unwrap());

/// Count the words in `text`.
///
/// The text is split on whitespace and newlines; tokens made only of
/// punctuation are ignored, so stray dashes or repeated spaces do not inflate
/// the count.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| WORD_CHAR.is_match(token))
        .count()
}
