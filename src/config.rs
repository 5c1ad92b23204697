//! Global configuration constants for lexdb-core.
//!
//! All tuning parameters and limits are defined here. These are compile-time
//! constants; there is no runtime configuration surface.

/// Maximum number of documents returned by a single ranked query.
///
/// Candidates beyond this count are dropped after sorting, so the cut always
/// keeps the best-ranked documents.
pub const MAX_RESULT_DOCUMENTS: usize = 5;

/// Relevance gap below which two documents are considered tied.
///
/// Ties fall back to rating (descending), then document id (ascending).
/// The parallel scoring path accumulates floating-point terms in a different
/// order than the sequential one; this tolerance absorbs that difference.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Number of independently locked shards in the parallel score accumulator.
///
/// A document's scores always land in the shard `doc_id % BUCKET_COUNT`,
/// so writers for different shards never contend.
pub const BUCKET_COUNT: usize = 100;

/// Capacity of the sliding request window, one slot per minute over a day.
pub const REQUEST_WINDOW_SIZE: usize = 1440;
