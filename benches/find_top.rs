//! Ranked-query benchmark: sequential vs parallel scoring.
//! Measures queries-per-second over a synthetic corpus.
//!
//! Usage: cargo bench --bench find_top

use std::time::Instant;

use lexdb_core::document::DocumentStatus;
use lexdb_core::server::{ExecutionPolicy, SearchServer};

const DOC_COUNT: u32 = 20_000;
const WORDS_PER_DOC: usize = 24;
const VOCABULARY: usize = 4_000;
const QUERY_COUNT: usize = 400;
const QUERY_WORDS: usize = 6;

/// Tiny deterministic generator so runs are comparable.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn word(&mut self) -> String {
        format!("w{}", self.next() as usize % VOCABULARY)
    }

    fn text(&mut self, words: usize) -> String {
        (0..words).map(|_| self.word()).collect::<Vec<_>>().join(" ")
    }
}

fn main() {
    let mut rng = Lcg(42);

    let build_start = Instant::now();
    let mut server = SearchServer::from_stop_words_text("w0 w1 w2 w3").unwrap();
    for id in 0..DOC_COUNT {
        let text = rng.text(WORDS_PER_DOC);
        server
            .add_document(id, &text, DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
    }
    println!(
        "indexed {} documents in {:.2?}",
        server.document_count(),
        build_start.elapsed()
    );

    let queries: Vec<String> = (0..QUERY_COUNT).map(|_| rng.text(QUERY_WORDS)).collect();

    for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
        // Warm-up pass so both runs start with hot caches.
        for query in queries.iter().take(QUERY_COUNT / 10) {
            let _ = server.find_top_documents_with_policy(policy, query).unwrap();
        }

        let start = Instant::now();
        let mut total_results = 0usize;
        for query in &queries {
            total_results += server
                .find_top_documents_with_policy(policy, query)
                .unwrap()
                .len();
        }
        let elapsed = start.elapsed();
        println!(
            "{policy:?}: {} queries in {:.2?} ({:.0} qps, {} results)",
            queries.len(),
            elapsed,
            queries.len() as f64 / elapsed.as_secs_f64(),
            total_results,
        );
    }
}
