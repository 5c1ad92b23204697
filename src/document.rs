//! Core document types for lexdb-core.
//!
//! Documents are identified by caller-chosen `u32` ids. The index stores a
//! small metadata record per document; queries return lightweight scored
//! [`Document`] values.

use serde::{Deserialize, Serialize};

/// Caller-chosen document identifier, unique among live documents.
pub type DocumentId = u32;

/// Lifecycle tag attached to a document at insert time.
///
/// The engine never interprets the status beyond equality; it exists for
/// callers to partition the corpus and is the default query filter
/// (queries match [`DocumentStatus::Actual`] documents unless told otherwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Live, searchable content.
    Actual,
    /// Kept in the index but no longer of interest.
    Irrelevant,
    /// Blocked content.
    Banned,
    /// Scheduled for deletion.
    Removed,
}

/// A ranked query result.
///
/// Plain value type; two results with the same `id` refer to the same stored
/// document. `relevance` is the TF-IDF score summed over the matched
/// plus-words, `rating` the average of the ratings supplied at insert time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Id of the matched document.
    pub id: DocumentId,
    /// Accumulated TF-IDF relevance for the query.
    pub relevance: f64,
    /// Average rating, truncated toward zero.
    pub rating: i32,
}

/// Per-document metadata kept by the index.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}
