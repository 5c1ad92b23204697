//! The search server: inverted index, TF-IDF ranking, and match queries.
//!
//! [`SearchServer`] owns the whole index state. Reads (`find_top_documents`,
//! `match_document`, the accessors) never mutate it and may run concurrently
//! from many threads; writes (`add_document`, `remove_document`) take
//! `&mut self` and are therefore serialized by the borrow checker. The only
//! shared mutable state inside a parallel query is the call-local sharded
//! accumulator.

use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

use crate::concurrent_map::ConcurrentMap;
use crate::config::{BUCKET_COUNT, MAX_RESULT_DOCUMENTS, RELEVANCE_EPSILON};
use crate::document::{Document, DocumentData, DocumentId, DocumentStatus};
use crate::error::SearchError;
use crate::interner::{Word, WordInterner};
use crate::query::{self, Query};
use crate::tokenizer::{is_valid_word, split_words};

/// Execution path selector for queries and removals.
///
/// Both paths produce identical results; [`ExecutionPolicy::Parallel`] fans
/// the per-word work out over the rayon pool and pays off on large postings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionPolicy {
    /// Single-threaded execution on the calling thread.
    #[default]
    Sequential,
    /// Work-stealing fan-out over the global rayon pool.
    Parallel,
}

/// In-memory TF-IDF search engine over short documents.
///
/// Documents are added with a caller-chosen id, a status tag, and a list of
/// ratings; queries return up to [`MAX_RESULT_DOCUMENTS`] results ranked by
/// relevance, then rating, then id. Stop words are fixed at construction and
/// filtered from both documents and queries.
#[derive(Debug, Default)]
pub struct SearchServer {
    words: WordInterner,
    stop_words: BTreeSet<Word>,
    word_to_docs: BTreeMap<Word, BTreeMap<DocumentId, f64>>,
    doc_to_words: BTreeMap<DocumentId, BTreeMap<Word, f64>>,
    documents: BTreeMap<DocumentId, DocumentData>,
    document_ids: BTreeSet<DocumentId>,
    /// Sentinel returned by `word_frequencies` for unknown ids.
    empty_frequencies: BTreeMap<Word, f64>,
}

impl SearchServer {
    /// Create a server with the given stop words.
    ///
    /// Empty strings are ignored; a stop word containing a control byte is
    /// rejected with [`SearchError::InvalidWord`].
    pub fn new<I, S>(stop_words: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut server = Self::default();
        for word in stop_words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidWord {
                    word: word.to_string(),
                });
            }
            let handle = server.words.intern(word);
            server.stop_words.insert(handle);
        }
        Ok(server)
    }

    /// Create a server from a space-separated stop-word string.
    pub fn from_stop_words_text(text: &str) -> Result<Self, SearchError> {
        Self::new(split_words(text))
    }

    /// Add a document to the index.
    ///
    /// Tokens are split on spaces, validated, and stripped of stop words;
    /// each surviving occurrence contributes `1/n` to the word's term
    /// frequency in this document. The rating is the truncated average of
    /// `ratings` (0 when empty). Fails without touching the index if `id`
    /// is already live or any token contains a control byte.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<(), SearchError> {
        if self.documents.contains_key(&id) {
            return Err(SearchError::DuplicateDocument { id });
        }
        // Every token is validated before any state is touched; the
        // mutation below cannot fail.
        let tokens = self.split_into_words_no_stop(text)?;

        let inverse_count = 1.0 / tokens.len() as f64;
        let mut frequencies: BTreeMap<Word, f64> = BTreeMap::new();
        for token in &tokens {
            let word = self.words.intern(token);
            *frequencies.entry(word).or_insert(0.0) += inverse_count;
        }
        for (word, term_frequency) in &frequencies {
            self.word_to_docs
                .entry(word.clone())
                .or_default()
                .insert(id, *term_frequency);
        }
        self.doc_to_words.insert(id, frequencies);
        self.documents.insert(
            id,
            DocumentData {
                rating: average_rating(ratings),
                status,
            },
        );
        self.document_ids.insert(id);
        debug!(doc_id = id, tokens = tokens.len(), "document added");
        Ok(())
    }

    /// Remove a document. Unknown ids are a no-op.
    ///
    /// Interned word storage is never reclaimed, so word handles held by the
    /// caller stay valid across removals.
    pub fn remove_document(&mut self, id: DocumentId) {
        let Some(frequencies) = self.doc_to_words.remove(&id) else {
            return;
        };
        let words: Vec<Word> = frequencies.into_keys().collect();
        self.unwire_document(id, &words);
    }

    /// [`SearchServer::remove_document`] with an explicit execution policy.
    ///
    /// The parallel path gathers the document's words on the rayon pool and
    /// then unwires them in one sequential pass; sibling postings maps can't
    /// be mutated concurrently from safe code, and the gather is where the
    /// work is.
    pub fn remove_document_with_policy(&mut self, policy: ExecutionPolicy, id: DocumentId) {
        match policy {
            ExecutionPolicy::Sequential => self.remove_document(id),
            ExecutionPolicy::Parallel => {
                let Some(frequencies) = self.doc_to_words.remove(&id) else {
                    return;
                };
                let words: Vec<Word> = frequencies
                    .par_iter()
                    .map(|(word, _)| word.clone())
                    .collect();
                self.unwire_document(id, &words);
            }
        }
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.document_ids.iter().copied()
    }

    /// Word frequencies of a document, or an empty map for unknown ids.
    ///
    /// The returned reference stays valid until the next mutation of the
    /// index.
    pub fn word_frequencies(&self, id: DocumentId) -> &BTreeMap<Word, f64> {
        self.doc_to_words.get(&id).unwrap_or(&self.empty_frequencies)
    }

    /// Top matches for `raw_query` among [`DocumentStatus::Actual`] documents.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_with_policy(ExecutionPolicy::Sequential, raw_query)
    }

    /// Top matches among documents with the given status.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_with_policy_and_status(
            ExecutionPolicy::Sequential,
            raw_query,
            status,
        )
    }

    /// Top matches among documents accepted by `predicate`.
    ///
    /// The predicate sees `(id, status, rating)` for every candidate reached
    /// through a plus-word; minus-words exclude documents regardless of what
    /// the predicate says.
    pub fn find_top_documents_filtered<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>, SearchError>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with_policy_filtered(
            ExecutionPolicy::Sequential,
            raw_query,
            predicate,
        )
    }

    /// [`SearchServer::find_top_documents`] with an explicit execution policy.
    pub fn find_top_documents_with_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
    ) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_with_policy_and_status(policy, raw_query, DocumentStatus::Actual)
    }

    /// [`SearchServer::find_top_documents_with_status`] with an explicit
    /// execution policy.
    pub fn find_top_documents_with_policy_and_status(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_with_policy_filtered(
            policy,
            raw_query,
            move |_id, document_status, _rating| document_status == status,
        )
    }

    /// [`SearchServer::find_top_documents_filtered`] with an explicit
    /// execution policy.
    pub fn find_top_documents_with_policy_filtered<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>, SearchError>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = query::parse(raw_query, &self.stop_words)?;
        let mut matched = match policy {
            ExecutionPolicy::Sequential => self.find_all_documents(&query, &predicate),
            ExecutionPolicy::Parallel => self.find_all_documents_parallel(&query, &predicate),
        };
        rank_documents(&mut matched);
        trace!(query = raw_query, results = matched.len(), "query executed");
        Ok(matched)
    }

    /// Plus-words of `raw_query` present in document `id`, sorted and
    /// deduplicated, together with the document's status.
    ///
    /// If the document contains any minus-word the word list is empty.
    /// Unknown ids fail with [`SearchError::DocumentNotFound`].
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<Word>, DocumentStatus), SearchError> {
        self.match_document_with_policy(ExecutionPolicy::Sequential, raw_query, id)
    }

    /// [`SearchServer::match_document`] with an explicit execution policy.
    ///
    /// The parallel path skips query normalization and deduplicates the
    /// matched words at the end instead; both paths return the same list.
    pub fn match_document_with_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<Word>, DocumentStatus), SearchError> {
        let Some(data) = self.documents.get(&id) else {
            return Err(SearchError::DocumentNotFound { id });
        };
        let query = match policy {
            ExecutionPolicy::Sequential => query::parse(raw_query, &self.stop_words)?,
            ExecutionPolicy::Parallel => query::parse_unnormalized(raw_query, &self.stop_words)?,
        };
        let frequencies = self.word_frequencies(id);

        if query
            .minus_words
            .iter()
            .any(|&word| frequencies.contains_key(word))
        {
            return Ok((Vec::new(), data.status));
        }

        let mut matched: Vec<Word> = query
            .plus_words
            .iter()
            .filter_map(|&word| frequencies.get_key_value(word))
            .map(|(word, _)| word.clone())
            .collect();
        matched.sort_unstable();
        matched.dedup();
        Ok((matched, data.status))
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>, SearchError> {
        let mut words = Vec::new();
        for word in split_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::InvalidWord {
                    word: word.to_string(),
                });
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    fn unwire_document(&mut self, id: DocumentId, words: &[Word]) {
        for word in words {
            let emptied = match self.word_to_docs.get_mut(word) {
                Some(postings) => {
                    postings.remove(&id);
                    postings.is_empty()
                }
                None => false,
            };
            if emptied {
                self.word_to_docs.remove(word.as_str());
            }
        }
        self.documents.remove(&id);
        self.document_ids.remove(&id);
        debug!(doc_id = id, "document removed");
    }

    fn inverse_document_frequency(&self, postings: &BTreeMap<DocumentId, f64>) -> f64 {
        (self.document_count() as f64 / postings.len() as f64).ln()
    }

    fn find_all_documents<P>(&self, query: &Query<'_>, predicate: &P) -> Vec<Document>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
        for &word in &query.plus_words {
            let Some(postings) = self.word_to_docs.get(word) else {
                continue;
            };
            let idf = self.inverse_document_frequency(postings);
            for (&doc_id, &term_frequency) in postings {
                let Some(data) = self.documents.get(&doc_id) else {
                    continue;
                };
                if predicate(doc_id, data.status, data.rating) {
                    *relevance.entry(doc_id).or_insert(0.0) += term_frequency * idf;
                }
            }
        }
        self.apply_minus_words(&mut relevance, query);
        self.collect_documents(relevance)
    }

    fn find_all_documents_parallel<P>(&self, query: &Query<'_>, predicate: &P) -> Vec<Document>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let accumulator: ConcurrentMap<f64> = ConcurrentMap::new(BUCKET_COUNT);
        query.plus_words.par_iter().for_each(|&word| {
            let Some(postings) = self.word_to_docs.get(word) else {
                return;
            };
            let idf = self.inverse_document_frequency(postings);
            for (&doc_id, &term_frequency) in postings {
                let Some(data) = self.documents.get(&doc_id) else {
                    continue;
                };
                if predicate(doc_id, data.status, data.rating) {
                    accumulator.update(doc_id, |value| *value += term_frequency * idf);
                }
            }
        });

        let mut relevance = accumulator.into_ordinary_map();
        self.apply_minus_words(&mut relevance, query);
        self.collect_documents(relevance)
    }

    /// Documents containing a minus-word are dropped unconditionally, even
    /// when the predicate accepted them.
    fn apply_minus_words(&self, relevance: &mut BTreeMap<DocumentId, f64>, query: &Query<'_>) {
        for &word in &query.minus_words {
            if let Some(postings) = self.word_to_docs.get(word) {
                for doc_id in postings.keys() {
                    relevance.remove(doc_id);
                }
            }
        }
    }

    fn collect_documents(&self, relevance: BTreeMap<DocumentId, f64>) -> Vec<Document> {
        relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.documents.get(&id).map(|data| Document {
                    id,
                    relevance,
                    rating: data.rating,
                })
            })
            .collect()
    }
}

/// Sort by relevance descending; within [`RELEVANCE_EPSILON`] of each other,
/// by rating descending, then id ascending. Truncate to the result cap.
fn rank_documents(documents: &mut Vec<Document>) {
    documents.sort_by(|lhs, rhs| {
        if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
            rhs.rating.cmp(&lhs.rating).then(lhs.id.cmp(&rhs.id))
        } else {
            OrderedFloat(rhs.relevance).cmp(&OrderedFloat(lhs.relevance))
        }
    });
    documents.truncate(MAX_RESULT_DOCUMENTS);
}

/// Average rating truncated toward zero; 0 for an empty list.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&rating| i64::from(rating)).sum();
    (sum / ratings.len() as i64) as i32
}
