//! Word interning.
//!
//! The interner owns one canonical allocation per distinct word ever seen.
//! Both index maps key on cheap shared [`Word`] handles instead of repeated
//! `String`s, and a handle stays valid for the life of the server even after
//! every document containing the word is removed.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A handle to an interned word.
///
/// Clones share the underlying allocation. Equality, ordering, and hashing
/// are lexicographic over the word's bytes, and `Borrow<str>` lets ordered
/// maps keyed by `Word` be probed with a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(Arc<str>);

impl Word {
    /// The word as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Word {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Word {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Word {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Insertion-only store of distinct words.
///
/// Words are never rewritten or reclaimed, which is what makes handle
/// stability trivial: a [`Word`] keeps its allocation alive on its own.
#[derive(Debug, Default)]
pub struct WordInterner {
    words: BTreeSet<Arc<str>>,
}

impl WordInterner {
    /// Return the canonical handle for `word`, inserting it on first sight.
    pub fn intern(&mut self, word: &str) -> Word {
        if let Some(existing) = self.words.get(word) {
            return Word(Arc::clone(existing));
        }
        let owned: Arc<str> = Arc::from(word);
        self.words.insert(Arc::clone(&owned));
        Word(owned)
    }

    /// Number of distinct words seen so far.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no word has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedupes() {
        let mut interner = WordInterner::default();
        let first = interner.intern("cat");
        let second = interner.intern("cat");
        assert_eq!(first, second);
        assert_eq!(interner.len(), 1);
        assert!(Arc::ptr_eq(&first.0, &second.0));
    }

    #[test]
    fn test_word_orders_lexicographically() {
        let mut interner = WordInterner::default();
        let city = interner.intern("city");
        let cat = interner.intern("cat");
        assert!(cat < city);
        assert_eq!(cat, "cat");
    }

    #[test]
    fn test_handles_outlive_interner_growth() {
        let mut interner = WordInterner::default();
        let cat = interner.intern("cat");
        for word in ["dog", "bird", "eugene", "box"] {
            interner.intern(word);
        }
        assert_eq!(cat.as_str(), "cat");
    }
}
