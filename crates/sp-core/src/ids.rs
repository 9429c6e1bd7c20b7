//! Strongly typed vertex identifier.
//!
//! `VertexId` is `Copy + Ord + Hash` so it can be used as a map key or sorted
//! element without ceremony.  The inner integer is `pub` to allow direct
//! indexing into per-vertex `Vec`s, but callers should prefer `.index()`.
//!
//! Ids are dense and 0-based.  Translating to and from the 1-based numbering
//! of DIMACS files and user-facing interfaces is the job of whoever reads or
//! prints them.

use std::fmt;

/// Index of a road-network vertex.  Max ~4.3 billion vertices.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(pub u32);

impl VertexId {
    /// Sentinel meaning "no vertex", e.g. the predecessor of the search source.
    pub const INVALID: VertexId = VertexId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// Convert a 1-based external id (DIMACS, CLI) into a 0-based `VertexId`.
    ///
    /// Returns `None` for `0` and for ids that do not fit below the sentinel.
    pub fn from_one_based(id: u64) -> Option<VertexId> {
        let zero_based = id.checked_sub(1)?;
        u32::try_from(zero_based)
            .ok()
            .filter(|&n| n != u32::MAX)
            .map(VertexId)
    }

    /// The 1-based external id of this vertex.
    #[inline]
    pub fn one_based(self) -> u64 {
        u64::from(self.0) + 1
    }
}

impl Default for VertexId {
    /// Returns the `INVALID` sentinel so uninitialized ids are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VertexId({})", self.0)
    }
}

impl From<VertexId> for usize {
    #[inline(always)]
    fn from(id: VertexId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for VertexId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<VertexId, Self::Error> {
        u32::try_from(n).map(VertexId)
    }
}
