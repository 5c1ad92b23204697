//! Batch query execution.
//!
//! Fans a list of raw queries over the server on the rayon pool. Output
//! order follows input order regardless of which worker ran which query;
//! the first query error aborts the batch.

use rayon::prelude::*;

use crate::document::Document;
use crate::error::SearchError;
use crate::server::SearchServer;

/// Run every query in parallel, one result list per query, in input order.
pub fn process_queries<S>(
    server: &SearchServer,
    queries: &[S],
) -> Result<Vec<Vec<Document>>, SearchError>
where
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| server.find_top_documents(query.as_ref()))
        .collect()
}

/// Like [`process_queries`], flattened into one list in query order.
pub fn process_queries_joined<S>(
    server: &SearchServer,
    queries: &[S],
) -> Result<Vec<Document>, SearchError>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?
        .into_iter()
        .flatten()
        .collect())
}
