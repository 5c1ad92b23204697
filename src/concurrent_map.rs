//! Sharded concurrent accumulator for the parallel scoring path.
//!
//! A fixed number of independently locked buckets, keyed by
//! `doc_id % bucket_count`. Workers scoring different shards proceed in
//! parallel; workers hitting the same shard serialize on its mutex for the
//! duration of one O(1) update. After the parallel region the buckets are
//! drained into a single ordered map.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};

use crate::document::DocumentId;

/// A `doc_id -> V` map split into independently locked shards.
pub struct ConcurrentMap<V> {
    buckets: Vec<Mutex<HashMap<DocumentId, V>>>,
}

impl<V: Default> ConcurrentMap<V> {
    /// Create a map with `bucket_count` shards.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    pub fn new(bucket_count: usize) -> Self {
        assert!(bucket_count > 0, "bucket count must be positive");
        Self {
            buckets: (0..bucket_count).map(|_| Mutex::default()).collect(),
        }
    }

    /// Apply `op` to the entry for `key`, inserting `V::default()` first if
    /// the key is new. The shard lock is held only for the duration of `op`.
    pub fn update(&self, key: DocumentId, op: impl FnOnce(&mut V)) {
        let bucket = &self.buckets[key as usize % self.buckets.len()];
        let mut shard = bucket.lock();
        op(shard.entry(key).or_default());
    }

    /// Drain all shards into one ordered map.
    ///
    /// Consumes the accumulator; meant to be called once the parallel region
    /// is over and no worker holds a shard.
    pub fn into_ordinary_map(self) -> BTreeMap<DocumentId, V> {
        let mut merged = BTreeMap::new();
        for bucket in self.buckets {
            merged.extend(bucket.into_inner());
        }
        merged
    }
}
