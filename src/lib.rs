//! # lexdb-core
//!
//! Embeddable in-memory text search engine with TF-IDF ranked retrieval,
//! minus-word exclusion, and parallel query execution.
//!
//! ## Features
//!
//! - **TF-IDF ranking** over an inverted index with per-document term
//!   frequencies normalized at insert time
//! - **Minus-words** (`-word`) that exclude matching documents outright
//! - **Stop-word filtering** applied to both documents and queries
//! - **Metadata filtering** by document status or an arbitrary
//!   `(id, status, rating)` predicate
//! - **Parallel scoring** over a work-stealing pool with a bucket-sharded
//!   accumulator, returning the same ranking as the sequential path
//! - **Collaborators** over the core API: a sliding request window, result
//!   pagination, a duplicate scrubber, and a parallel batch query driver
//!
//! ## Architecture
//!
//! ```text
//! add:    text → tokenizer → interner → { word→doc, doc→word } maps
//! query:  text → query parser → scorer (seq | sharded parallel) → rank → top-5
//! ```
//!
//! This is a core library crate with zero async dependencies, suitable for
//! embedding directly in other Rust programs. There is no persistence and no
//! network surface; the index lives and dies with the [`server::SearchServer`].

/// Parallel batch query execution over a shared server.
pub mod batch;
/// Bucket-sharded concurrent accumulator used by the parallel scoring path.
pub mod concurrent_map;
/// Global configuration constants: result cap, ranking epsilon, shard count.
pub mod config;
/// Duplicate detection and removal by word-set equality.
pub mod dedup;
/// Core document types: ids, statuses, and scored results.
pub mod document;
/// Error taxonomy for mutation and query parsing.
pub mod error;
/// Word interning: stable shared handles over canonical word storage.
pub mod interner;
/// Fixed-size pagination over result slices.
pub mod pagination;
mod query;
/// Sliding per-minute window counting empty-result queries.
pub mod requests;
/// The search server: inverted index, scoring, matching, and removal.
pub mod server;
/// ASCII-space tokenizer and word validation.
pub mod tokenizer;
