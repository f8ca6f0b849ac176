#![no_main]

use libfuzzer_sys::fuzz_target;
use wordsearch::utils::{decode_text, is_word_char, tokenize};

fuzz_target!(|data: &[u8]| {
    // Words must be non-empty runs of word characters, in order, and
    // never overlap
    let text = decode_text(data);
    let mut last_end = 0;
    for word in tokenize(&text) {
        assert!(!word.is_empty());
        assert!(word.chars().all(is_word_char));

        let start = word.as_ptr() as usize - text.as_ptr() as usize;
        assert!(start >= last_end);
        last_end = start + word.len();
    }
});
