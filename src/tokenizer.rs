//! Whitespace tokenizer.
//!
//! Words are maximal runs of non-space bytes; only the ASCII space `0x20`
//! separates them. No lowercasing, stemming, or Unicode segmentation is
//! applied. Tokens borrow from the input, so splitting allocates nothing.

/// Split `text` into non-empty words on ASCII spaces.
///
/// Leading, trailing, and repeated spaces are collapsed; an empty input
/// yields an empty iterator.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid when it contains no control byte in `0x00..0x20`.
///
/// Multi-byte UTF-8 sequences are always valid here: their bytes are all
/// `>= 0x80`.
pub fn is_valid_word(word: &str) -> bool {
    word.bytes().all(|byte| byte >= 0x20)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        let words: Vec<&str> = split_words("cat in the city").collect();
        assert_eq!(words, ["cat", "in", "the", "city"]);
    }

    #[test]
    fn test_split_collapses_spaces() {
        let words: Vec<&str> = split_words("  cat   city ").collect();
        assert_eq!(words, ["cat", "city"]);
    }

    #[test]
    fn test_split_empty_input() {
        assert_eq!(split_words("").count(), 0);
        assert_eq!(split_words("   ").count(), 0);
    }

    #[test]
    fn test_tabs_are_not_separators() {
        let words: Vec<&str> = split_words("cat\tcity").collect();
        assert_eq!(words, ["cat\tcity"]);
        assert!(!is_valid_word(words[0]));
    }

    #[test]
    fn test_word_validity() {
        assert!(is_valid_word("cat"));
        assert!(is_valid_word("naïve"));
        assert!(is_valid_word("東京"));
        assert!(!is_valid_word("ca\u{1}t"));
        assert!(!is_valid_word("\n"));
    }
}
