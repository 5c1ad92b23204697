//! Sliding request window.
//!
//! [`RequestQueue`] routes queries to a borrowed [`SearchServer`] and keeps a
//! rolling history of the last [`REQUEST_WINDOW_SIZE`] requests (one slot per
//! minute over a day), counting how many of them came back empty. When the
//! window is full the oldest slot is retired before the new one is recorded.

use std::collections::VecDeque;

use crate::config::REQUEST_WINDOW_SIZE;
use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::SearchError;
use crate::server::SearchServer;

/// Query driver with a bounded empty-result history.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    /// One flag per retained request: did it return any documents?
    history: VecDeque<bool>,
    no_result_count: usize,
}

impl<'a> RequestQueue<'a> {
    /// Create a queue over `server` with an empty history.
    pub fn new(server: &'a SearchServer) -> Self {
        Self {
            server,
            history: VecDeque::with_capacity(REQUEST_WINDOW_SIZE),
            no_result_count: 0,
        }
    }

    /// Run a default query (Actual documents) and record the outcome.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>, SearchError> {
        let result = self.server.find_top_documents(raw_query)?;
        self.record(&result);
        Ok(result)
    }

    /// Run a status-filtered query and record the outcome.
    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, SearchError> {
        let result = self
            .server
            .find_top_documents_with_status(raw_query, status)?;
        self.record(&result);
        Ok(result)
    }

    /// Run a predicate-filtered query and record the outcome.
    pub fn add_find_request_filtered<P>(
        &mut self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>, SearchError>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let result = self
            .server
            .find_top_documents_filtered(raw_query, predicate)?;
        self.record(&result);
        Ok(result)
    }

    /// How many of the retained requests produced no results.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }

    /// Failed queries never reach this point: they don't consume a slot.
    fn record(&mut self, result: &[Document]) {
        if self.history.len() == REQUEST_WINDOW_SIZE {
            if let Some(had_results) = self.history.pop_front() {
                if !had_results {
                    self.no_result_count -= 1;
                }
            }
        }
        if result.is_empty() {
            self.no_result_count += 1;
        }
        self.history.push_back(!result.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_with_one_document() -> SearchServer {
        let mut server = SearchServer::default();
        server
            .add_document(1, "cat in the city", DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
        server
    }

    #[test]
    fn test_counts_empty_results() {
        let server = server_with_one_document();
        let mut queue = RequestQueue::new(&server);

        assert!(!queue.add_find_request("cat").unwrap().is_empty());
        assert!(queue.add_find_request("dog").unwrap().is_empty());
        assert!(queue.add_find_request("bird").unwrap().is_empty());
        assert_eq!(queue.no_result_requests(), 2);
    }

    #[test]
    fn test_old_slots_are_retired() {
        let server = server_with_one_document();
        let mut queue = RequestQueue::new(&server);

        for _ in 0..REQUEST_WINDOW_SIZE {
            queue.add_find_request("dog").unwrap();
        }
        assert_eq!(queue.no_result_requests(), REQUEST_WINDOW_SIZE);

        // Each successful request pushes one empty one out of the window.
        for _ in 0..10 {
            queue.add_find_request("cat").unwrap();
        }
        assert_eq!(queue.no_result_requests(), REQUEST_WINDOW_SIZE - 10);
    }

    #[test]
    fn test_failed_queries_do_not_consume_a_slot() {
        let server = server_with_one_document();
        let mut queue = RequestQueue::new(&server);

        queue.add_find_request("dog").unwrap();
        assert!(queue.add_find_request("--broken").is_err());
        assert_eq!(queue.no_result_requests(), 1);
    }
}
