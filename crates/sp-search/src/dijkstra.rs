//! Label-setting (Dijkstra) search that records its settlement order.
//!
//! # Output
//!
//! Besides the optimal path, every search returns the vertices in the order
//! they were settled.  The order is appended at extraction time, so it is
//! complete even when the search stops early at the destination, and a
//! renderer can replay it frame by frame to animate the exploration.
//!
//! # Pluggability
//!
//! Callers that want to swap engines hold a [`PathEngine`]; the default
//! [`Dijkstra`] just forwards to [`search`].

use tracing::debug;

use sp_core::{Distance, VertexId};
use sp_graph::Graph;

use crate::{SearchError, SearchResult, SearchState};

// ── SearchOutcome ─────────────────────────────────────────────────────────────

/// Result of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Vertices from source to destination; empty when unreachable.
    pub path: Vec<VertexId>,
    /// Every settled vertex in settlement order, source first.
    pub settlement_order: Vec<VertexId>,
    /// Distance at which each vertex of `settlement_order` was settled
    /// (same length, non-decreasing).
    pub settled_distances: Vec<Distance>,
    /// Total weight of `path`; `None` when the destination is unreachable.
    pub distance: Option<Distance>,
}

impl SearchOutcome {
    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }

    pub fn settled_count(&self) -> usize {
        self.settlement_order.len()
    }
}

// ── PathEngine trait ──────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// Implementations must be `Send + Sync` so one instance can serve queries
/// from many threads against the same shared graph.
pub trait PathEngine: Send + Sync {
    fn search(
        &self,
        graph: &Graph,
        source: VertexId,
        destination: VertexId,
    ) -> SearchResult<SearchOutcome>;
}

/// Plain Dijkstra over the CSR graph.
#[derive(Copy, Clone, Debug, Default)]
pub struct Dijkstra;

impl PathEngine for Dijkstra {
    fn search(
        &self,
        graph: &Graph,
        source: VertexId,
        destination: VertexId,
    ) -> SearchResult<SearchOutcome> {
        search(graph, source, destination)
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Shortest path from `source` to `destination`, plus the settlement order.
///
/// Stops as soon as `destination` is settled.  An unreachable destination
/// yields an empty path and a settlement order covering everything reachable
/// from `source`.
pub fn search(
    graph: &Graph,
    source: VertexId,
    destination: VertexId,
) -> SearchResult<SearchOutcome> {
    let state = run(graph, source, Some(destination))?;

    let path = state.path_to(destination);
    let distance = if path.is_empty() { None } else { state.distance(destination) };
    let (settlement_order, settled_distances) = state.into_trace();

    debug!(
        %source,
        %destination,
        settled = settlement_order.len(),
        path_len = path.len(),
        ?distance,
        "search finished"
    );

    Ok(SearchOutcome { path, settlement_order, settled_distances, distance })
}

/// Settle every vertex reachable from `source`.  The outcome has an empty
/// path and no distance; only the trace is filled.
pub fn explore(graph: &Graph, source: VertexId) -> SearchResult<SearchOutcome> {
    let state = run(graph, source, None)?;
    let (settlement_order, settled_distances) = state.into_trace();
    debug!(%source, settled = settlement_order.len(), "exploration finished");
    Ok(SearchOutcome {
        path: Vec::new(),
        settlement_order,
        settled_distances,
        distance: None,
    })
}

/// Run the search loop and hand back the raw working state, for callers that
/// want per-vertex distances, predecessors or states after the query.
///
/// With `destination = Some(d)` the loop stops once `d` is settled; with
/// `None` it drains the queue.
pub fn run(
    graph: &Graph,
    source: VertexId,
    destination: Option<VertexId>,
) -> SearchResult<SearchState> {
    check_vertex(graph, source)?;
    if let Some(d) = destination {
        check_vertex(graph, d)?;
    }

    let mut state = SearchState::new(graph.vertex_count(), source);

    while let Some((v, d)) = state.pop() {
        // Outdated entry for a vertex settled at a smaller distance.
        if !state.settle(v, d) {
            continue;
        }
        if destination == Some(v) {
            break;
        }
        for arc in graph.out_arcs(v) {
            state.relax(arc.head, v, d + Distance::from(arc.weight));
        }
    }

    Ok(state)
}

fn check_vertex(graph: &Graph, v: VertexId) -> SearchResult<()> {
    if graph.contains(v) {
        Ok(())
    } else {
        Err(SearchError::InvalidVertex { vertex: v, vertex_count: graph.vertex_count() })
    }
}
