//! Duplicate document removal.
//!
//! Two documents are duplicates when they contain exactly the same set of
//! words; term frequencies and ratings don't matter. The scan walks live ids
//! in ascending order, so the earliest id of each group always survives.

use std::collections::BTreeSet;

use tracing::info;

use crate::document::DocumentId;
use crate::interner::Word;
use crate::server::SearchServer;

/// Ids of documents whose word set was already seen under a smaller id.
pub fn find_duplicates(server: &SearchServer) -> Vec<DocumentId> {
    let mut seen: BTreeSet<Vec<Word>> = BTreeSet::new();
    let mut duplicates = Vec::new();
    for id in server.document_ids() {
        let words: Vec<Word> = server.word_frequencies(id).keys().cloned().collect();
        if !seen.insert(words) {
            duplicates.push(id);
        }
    }
    duplicates
}

/// Remove every duplicate document, returning the removed ids.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let duplicates = find_duplicates(server);
    for &id in &duplicates {
        info!(doc_id = id, "removing duplicate document");
        server.remove_document(id);
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStatus;

    fn corpus() -> SearchServer {
        let mut server = SearchServer::from_stop_words_text("and with").unwrap();
        let documents = [
            (1, "funny pet and nasty rat"),
            (2, "funny pet with curly hair"),
            // Duplicates of id 2: same word set, different order and repeats.
            (3, "funny pet with curly hair"),
            (4, "funny pet and curly hair"),
            (5, "funny funny pet and nasty nasty rat"),
            (6, "funny pet and not very nasty rat"),
            (7, "very nasty rat and not very funny pet"),
            (8, "pet with rat and rat and rat"),
            (9, "nasty rat with curly hair"),
        ];
        for (id, text) in documents {
            server
                .add_document(id, text, DocumentStatus::Actual, &[1, 2])
                .unwrap();
        }
        server
    }

    #[test]
    fn test_find_duplicates_keeps_earliest_id() {
        let server = corpus();
        assert_eq!(find_duplicates(&server), [3, 4, 5, 7]);
    }

    #[test]
    fn test_remove_duplicates_shrinks_corpus() {
        let mut server = corpus();
        let removed = remove_duplicates(&mut server);
        assert_eq!(removed, [3, 4, 5, 7]);
        assert_eq!(server.document_count(), 5);
        assert_eq!(
            server.document_ids().collect::<Vec<_>>(),
            [1, 2, 6, 8, 9]
        );
        // A second pass finds nothing left to scrub.
        assert!(remove_duplicates(&mut server).is_empty());
    }

    #[test]
    fn test_ratings_do_not_make_documents_distinct() {
        let mut server = SearchServer::default();
        server
            .add_document(1, "cat city", DocumentStatus::Actual, &[1])
            .unwrap();
        server
            .add_document(2, "city cat", DocumentStatus::Banned, &[9, 9])
            .unwrap();
        assert_eq!(find_duplicates(&server), [2]);
    }
}
