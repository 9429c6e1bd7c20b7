//! Per-query working state.
//!
//! One `SearchState` is allocated at the start of every search and dropped
//! when it returns.  It is never shared between queries, which is what lets
//! many searches run concurrently over one read-only graph.
//!
//! Memory is O(N): one `Distance` and one `VertexId` per vertex, one bit per
//! vertex for the settled set, plus the queue and the settlement trace.

use fixedbitset::FixedBitSet;

use sp_core::{Distance, VertexId};

use crate::StableQueue;

/// Where a vertex stands within one query.
///
/// Transitions: `Unseen → Frontier` on first relaxation, `Frontier →
/// Frontier` when the distance improves, `Frontier → Settled` when popped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum VertexState {
    /// Not reached yet; distance unknown.
    Unseen,
    /// Reached with a tentative distance that may still decrease.
    Frontier,
    /// Distance final for this query.
    Settled,
}

pub struct SearchState {
    /// Tentative distance per vertex; `Distance::MAX` = unknown.
    dist:       Vec<Distance>,
    /// Predecessor on the best known path; `VertexId::INVALID` = undefined.
    pred:       Vec<VertexId>,
    settled:    FixedBitSet,
    queue:      StableQueue,
    /// Vertices in settlement order, with the distance each settled at.
    order:      Vec<VertexId>,
    order_dist: Vec<Distance>,
}

impl SearchState {
    /// Fresh state for a graph of `vertex_count` vertices with `source` at
    /// distance zero and already queued.
    pub(crate) fn new(vertex_count: usize, source: VertexId) -> Self {
        let mut state = Self {
            dist:       vec![Distance::MAX; vertex_count],
            pred:       vec![VertexId::INVALID; vertex_count],
            settled:    FixedBitSet::with_capacity(vertex_count),
            queue:      StableQueue::new(),
            order:      Vec::new(),
            order_dist: Vec::new(),
        };
        state.dist[source.index()] = 0;
        state.queue.push(source, 0);
        state
    }

    pub fn vertex_state(&self, v: VertexId) -> VertexState {
        if self.settled.contains(v.index()) {
            VertexState::Settled
        } else if self.dist[v.index()] != Distance::MAX {
            VertexState::Frontier
        } else {
            VertexState::Unseen
        }
    }

    /// Best known distance to `v`, final once `v` is settled.
    pub fn distance(&self, v: VertexId) -> Option<Distance> {
        let d = self.dist[v.index()];
        (d != Distance::MAX).then_some(d)
    }

    pub fn predecessor(&self, v: VertexId) -> Option<VertexId> {
        let p = self.pred[v.index()];
        p.is_valid().then_some(p)
    }

    #[inline]
    pub fn is_settled(&self, v: VertexId) -> bool {
        self.settled.contains(v.index())
    }

    /// Next queue entry, possibly stale.
    pub(crate) fn pop(&mut self) -> Option<(VertexId, Distance)> {
        self.queue.pop()
    }

    /// Mark `v` settled at distance `d` and append it to the trace.
    ///
    /// Returns `false` (and records nothing) if `v` was already settled,
    /// i.e. the queue entry was stale.
    pub(crate) fn settle(&mut self, v: VertexId, d: Distance) -> bool {
        if self.settled.put(v.index()) {
            return false;
        }
        debug_assert_eq!(d, self.dist[v.index()]);
        self.order.push(v);
        self.order_dist.push(d);
        true
    }

    /// Record a strictly better path to `v` through `via`.  Returns `true`
    /// if `v`'s distance was lowered (and `v` re-queued).
    pub(crate) fn relax(&mut self, v: VertexId, via: VertexId, candidate: Distance) -> bool {
        let i = v.index();
        if self.settled.contains(i) || candidate >= self.dist[i] {
            return false;
        }
        self.dist[i] = candidate;
        self.pred[i] = via;
        self.queue.push(v, candidate);
        true
    }

    /// Vertices settled so far, in order.
    pub fn settlement_order(&self) -> &[VertexId] {
        &self.order
    }

    /// Walk predecessor links back from `destination`.  Empty if
    /// `destination` has not been settled.
    pub fn path_to(&self, destination: VertexId) -> Vec<VertexId> {
        if !self.is_settled(destination) {
            return Vec::new();
        }
        let mut path = Vec::new();
        let mut cur = destination;
        while cur.is_valid() {
            path.push(cur);
            cur = self.pred[cur.index()];
        }
        path.reverse();
        path
    }

    /// Split into (settlement order, settled distances).
    pub(crate) fn into_trace(self) -> (Vec<VertexId>, Vec<Distance>) {
        (self.order, self.order_dist)
    }
}
