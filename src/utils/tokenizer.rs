use ahash::AHashSet;
use regex::Regex;
use std::sync::LazyLock;

/// A word is a maximal run of Unicode letters (any `L*` category) and
/// decimal digits (`Nd`). Everything else separates words, `_` included.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{Nd}]+").expect("word pattern is valid"));

/// Split text into words, in order of appearance
///
/// Words are returned verbatim: no case folding, no stemming, and repeated
/// words are repeated in the output.
pub fn tokenize(content: &str) -> impl Iterator<Item = &str> {
    WORD.find_iter(content).map(|m| m.as_str())
}

/// The set of distinct words in a piece of text
pub fn distinct_words(content: &str) -> AHashSet<&str> {
    // Rough guess: one distinct word per 8 bytes is plenty for prose and code
    let mut words = AHashSet::with_capacity(content.len() / 8);
    words.extend(tokenize(content));
    words
}

/// Whether a character can be part of a word
pub fn is_word_char(ch: char) -> bool {
    let mut buf = [0u8; 4];
    WORD.is_match(ch.encode_utf8(&mut buf))
}

/// Decode file bytes as text
///
/// Invalid UTF-8 sequences become U+FFFD, which is a separator, so they
/// split words instead of failing the read.
pub fn decode_text(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
