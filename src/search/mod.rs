//! Search-index backend
//!
//! Talks to Elasticsearch/OpenSearch-style servers with JSON request bodies.
//! Counting on these backends is capped, so the total reported for a large
//! result set is a lower bound.

mod backend;
mod query;
mod transport;

pub use backend::SearchIndexBackend;
pub use query::{SearchFilter, SearchQueryBuilder};
pub use transport::{HttpTransport, SearchTransport};
