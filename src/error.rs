//! Error types for index mutation and query parsing.

use crate::document::DocumentId;
use thiserror::Error;

/// Failure classes surfaced by the search server.
///
/// No error is recovered internally, and a failed operation never leaves the
/// index partially modified: `add_document` validates the whole document
/// before touching any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A document with this id is already in the index. Remove it first to
    /// replace its content.
    #[error("document id {id} is already in the index")]
    DuplicateDocument {
        /// The rejected id.
        id: DocumentId,
    },

    /// A document token or stop word contains a control byte (`0x00..0x20`).
    #[error("word {word:?} contains a control byte")]
    InvalidWord {
        /// The offending word.
        word: String,
    },

    /// A query token is empty after stripping `-`, starts with a second `-`,
    /// or contains a control byte.
    #[error("malformed query token {token:?}")]
    InvalidQuery {
        /// The offending token, as written in the query.
        token: String,
    },

    /// `match_document` was called with an id that is not in the index.
    #[error("no document with id {id}")]
    DocumentNotFound {
        /// The unknown id.
        id: DocumentId,
    },
}
