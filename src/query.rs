//! Query parsing.
//!
//! A raw query is a space-separated list of tokens. A leading `-` marks a
//! minus-word: documents containing it are excluded from the result. Stop
//! words are dropped from both lists, so a stopped word neither matches nor
//! excludes anything. Tokens borrow from the raw query text.

use std::collections::BTreeSet;

use crate::error::SearchError;
use crate::interner::Word;
use crate::tokenizer::{is_valid_word, split_words};

/// A parsed query: plus-words select candidates, minus-words veto them.
#[derive(Debug, Default)]
pub(crate) struct Query<'a> {
    pub plus_words: Vec<&'a str>,
    pub minus_words: Vec<&'a str>,
}

struct QueryToken<'a> {
    word: &'a str,
    is_minus: bool,
    is_stop: bool,
}

fn parse_token<'a>(
    token: &'a str,
    stop_words: &BTreeSet<Word>,
) -> Result<QueryToken<'a>, SearchError> {
    let (word, is_minus) = match token.strip_prefix('-') {
        Some(stripped) => (stripped, true),
        None => (token, false),
    };
    if word.is_empty() || word.starts_with('-') || !is_valid_word(word) {
        return Err(SearchError::InvalidQuery {
            token: token.to_string(),
        });
    }
    Ok(QueryToken {
        word,
        is_minus,
        is_stop: stop_words.contains(word),
    })
}

/// Parse `text` and normalize both word lists: sorted, no duplicates.
///
/// This is the form the scorer consumes; it guarantees each surviving word
/// contributes to a document's relevance exactly once.
pub(crate) fn parse<'a>(
    text: &'a str,
    stop_words: &BTreeSet<Word>,
) -> Result<Query<'a>, SearchError> {
    let mut query = parse_unnormalized(text, stop_words)?;
    query.plus_words.sort_unstable();
    query.plus_words.dedup();
    query.minus_words.sort_unstable();
    query.minus_words.dedup();
    Ok(query)
}

/// Parse `text` without the sort-dedup pass.
///
/// Only for consumers that deduplicate their own output (the parallel match
/// path); repeated plus-words here would be scored repeatedly.
pub(crate) fn parse_unnormalized<'a>(
    text: &'a str,
    stop_words: &BTreeSet<Word>,
) -> Result<Query<'a>, SearchError> {
    let mut query = Query::default();
    for token in split_words(text) {
        let parsed = parse_token(token, stop_words)?;
        if parsed.is_stop {
            continue;
        }
        if parsed.is_minus {
            query.minus_words.push(parsed.word);
        } else {
            query.plus_words.push(parsed.word);
        }
    }
    Ok(query)
}
