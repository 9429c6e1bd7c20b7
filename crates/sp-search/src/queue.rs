//! `StableQueue`: min-priority queue with deterministic tie-breaking.
//!
//! `BinaryHeap` alone gives no guarantee about the order of equal keys, so
//! every entry carries a monotonically increasing sequence number as its
//! secondary key.  Entries with the same distance therefore pop in the order
//! they were pushed.
//!
//! Decrease-key is lazy: an improved distance is pushed as a new entry and
//! the outdated one is skipped by the caller when it surfaces.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use sp_core::{Distance, VertexId};

/// Ordered by `(distance, seq)`; `seq` is unique so `vertex` never decides.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
struct Entry {
    distance: Distance,
    seq:      u64,
    vertex:   VertexId,
}

#[derive(Default, Debug)]
pub struct StableQueue {
    // Reverse makes BinaryHeap (max) behave as a min-heap.
    heap:     BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl StableQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { heap: BinaryHeap::with_capacity(capacity), next_seq: 0 }
    }

    /// Enqueue `vertex` at tentative `distance`.
    pub fn push(&mut self, vertex: VertexId, distance: Distance) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { distance, seq, vertex }));
    }

    /// Remove the entry with the smallest distance; among equals, the one
    /// pushed first.
    pub fn pop(&mut self) -> Option<(VertexId, Distance)> {
        self.heap.pop().map(|Reverse(e)| (e.vertex, e.distance))
    }

    /// Entries currently queued, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of pushes since creation.
    pub fn pushes(&self) -> u64 {
        self.next_seq
    }
}
