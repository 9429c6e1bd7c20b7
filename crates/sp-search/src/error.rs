//! Search error type.

use thiserror::Error;

use sp_core::VertexId;

/// Errors produced by `sp-search`.
///
/// A bad index only fails that one query; the shared graph is untouched and
/// stays usable.  An unreachable destination is not an error.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("vertex {vertex} is not in the graph (vertex count {vertex_count})")]
    InvalidVertex { vertex: VertexId, vertex_count: usize },
}

pub type SearchResult<T> = Result<T, SearchError>;
