//! Directed weighted arc and the cost types used by the search.

use crate::VertexId;

/// Travel cost of a single arc.  Unsigned, so negative weights are
/// unrepresentable.
pub type Weight = u32;

/// Accumulated cost of a path.  Wider than [`Weight`] so that sums over long
/// paths on continental networks cannot overflow.
pub type Distance = u64;

/// A directed arc as stored in a vertex's adjacency slice.  The tail is
/// implicit: it is the vertex whose slice holds the arc.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    pub head:   VertexId,
    pub weight: Weight,
}

impl Arc {
    #[inline]
    pub const fn new(head: VertexId, weight: Weight) -> Self {
        Self { head, weight }
    }
}
