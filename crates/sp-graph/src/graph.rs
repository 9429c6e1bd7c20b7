//! Road network representation and builder.
//!
//! # Data layout
//!
//! Outgoing arcs are stored in **Compressed Sparse Row (CSR)** form.  Given a
//! `VertexId v`, its outgoing arcs occupy the slice:
//!
//! ```text
//! arcs[ first_out[v] .. first_out[v+1] ]
//! ```
//!
//! Each [`Arc`] carries its head and weight side by side, so relaxing a
//! vertex's arcs in Dijkstra's inner loop is one contiguous memory scan.
//! Within a slice, arcs keep the order in which they were added (file order
//! for loaded graphs); the search's tie-breaking relies on that order being
//! reproducible.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over the integer micro-degree coordinates answers
//! nearest-vertex and map-window queries for the request layer.

use std::collections::TryReserveError;
use std::fmt;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use sp_core::{Arc, BoundingBox, Coord, VertexId, Weight};

// ── R-tree vertex entry ───────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a `[lat, lon]` point in
/// micro-degrees with the associated `VertexId`.
///
/// `i64` components keep squared distances exact: the largest possible
/// squared span (360e6)² + (180e6)² fits comfortably.
#[derive(Clone, Debug)]
struct VertexEntry {
    point: [i64; 2], // [lat, lon]
    id:    VertexId,
}

impl VertexEntry {
    fn point_of(c: Coord) -> [i64; 2] {
        [i64::from(c.lat), i64::from(c.lon)]
    }
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[i64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    /// Squared planar distance in micro-degree space.  Good enough for
    /// snapping a clicked map position to the closest road vertex.
    fn distance_2(&self, point: &[i64; 2]) -> i64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Immutable directed road graph in CSR format plus a spatial index.
///
/// There are no `&mut self` methods: once built, a `Graph` can be shared
/// across any number of concurrent searches without locking.  Construct it
/// with [`GraphBuilder`] or [`crate::load_graph`].
pub struct Graph {
    // ── Vertex data ───────────────────────────────────────────────────────
    /// Coordinate of each vertex.  Indexed by `VertexId`.
    coords: Vec<Coord>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// CSR row pointer.  Length = `vertex_count + 1`.
    first_out: Vec<u32>,

    /// All arcs grouped by tail vertex.
    arcs: Vec<Arc>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<VertexEntry>,
}

impl Graph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.coords.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// `true` if `v` is a valid index into this graph.
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        v.index() < self.coords.len()
    }

    // ── Vertex data ───────────────────────────────────────────────────────

    /// Coordinate of `v`.
    ///
    /// # Panics
    ///
    /// If `v` is not a vertex of this graph.
    #[inline]
    pub fn coord(&self, v: VertexId) -> Coord {
        self.coords[v.index()]
    }

    /// All coordinates, indexed by `VertexId`.
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// Smallest box containing every vertex, `None` for an empty graph.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing(self.coords.iter().copied())
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Outgoing arcs of `v` in insertion order.
    ///
    /// # Panics
    ///
    /// If `v` is not a vertex of this graph.
    #[inline]
    pub fn out_arcs(&self, v: VertexId) -> &[Arc] {
        let start = self.first_out[v.index()] as usize;
        let end   = self.first_out[v.index() + 1] as usize;
        &self.arcs[start..end]
    }

    /// Out-degree of `v` (number of outgoing arcs).
    #[inline]
    pub fn out_degree(&self, v: VertexId) -> usize {
        self.out_arcs(v).len()
    }

    /// Weight of the arc `from → to`, or `None` if there is no such arc.
    /// With parallel arcs the smallest weight wins.
    pub fn arc_weight(&self, from: VertexId, to: VertexId) -> Option<Weight> {
        if !self.contains(from) {
            return None;
        }
        self.out_arcs(from)
            .iter()
            .filter(|a| a.head == to)
            .map(|a| a.weight)
            .min()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the vertex nearest to `pos`.
    ///
    /// Returns `None` only if the graph has no vertices.
    pub fn nearest_vertex(&self, pos: Coord) -> Option<VertexId> {
        self.spatial_idx
            .nearest_neighbor(&VertexEntry::point_of(pos))
            .map(|e| e.id)
    }

    /// All vertices whose coordinate lies inside `bbox`, in ascending id
    /// order.
    pub fn vertices_within(&self, bbox: &BoundingBox) -> Vec<VertexId> {
        // Circle query around the box centre, then trim to the box itself.
        let center = bbox.center();
        let half_lat = (bbox.lat_span() + 1) / 2 + 1;
        let half_lon = (bbox.lon_span() + 1) / 2 + 1;
        let radius_2 = half_lat * half_lat + half_lon * half_lon;

        let mut found: Vec<VertexId> = self
            .spatial_idx
            .locate_within_distance(VertexEntry::point_of(center), radius_2)
            .filter(|e| bbox.contains(self.coords[e.id.index()]))
            .map(|e| e.id)
            .collect();
        found.sort_unstable();
        found
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("vertex_count", &self.vertex_count())
            .field("arc_count", &self.arc_count())
            .finish()
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// Arcs may be added in any tail order; `build()` groups them by tail while
/// preserving the relative order of arcs that share a tail.
///
/// # Example
///
/// ```
/// use sp_core::Coord;
/// use sp_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let a = b.add_vertex(Coord::new(41_085_396, -73_530_767));
/// let c = b.add_vertex(Coord::new(41_086_098, -73_530_538));
/// b.add_arc(a, c, 803);
/// let graph = b.build();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.arc_count(), 1); // directed: no c → a
/// ```
pub struct GraphBuilder {
    coords:   Vec<Coord>,
    raw_arcs: Vec<RawArc>,
}

struct RawArc {
    tail: VertexId,
    arc:  Arc,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self { coords: Vec::new(), raw_arcs: Vec::new() }
    }

    /// Pre-allocate for the expected number of vertices and arcs.
    pub fn with_capacity(vertices: usize, arcs: usize) -> Self {
        Self {
            coords:   Vec::with_capacity(vertices),
            raw_arcs: Vec::with_capacity(arcs),
        }
    }

    /// Start with `vertices` vertices at `Coord::default()`, to be positioned
    /// later with [`set_coord`](Self::set_coord).  Used by the file loader,
    /// where the vertex count is known from the header before any coordinate.
    pub fn with_vertices(vertices: usize, arcs: usize) -> Self {
        Self {
            coords:   vec![Coord::default(); vertices],
            raw_arcs: Vec::with_capacity(arcs),
        }
    }

    /// Like [`with_vertices`](Self::with_vertices) with no arc capacity, but
    /// reports an allocation failure instead of aborting.  The loader sizes
    /// the builder from an untrusted header, so it goes through here.
    pub fn try_with_vertices(vertices: usize) -> Result<Self, TryReserveError> {
        let mut coords = Vec::new();
        coords.try_reserve_exact(vertices)?;
        coords.resize(vertices, Coord::default());
        Ok(Self { coords, raw_arcs: Vec::new() })
    }

    /// Add a vertex and return its `VertexId` (sequential from 0).
    pub fn add_vertex(&mut self, pos: Coord) -> VertexId {
        let id = VertexId(self.coords.len() as u32);
        self.coords.push(pos);
        id
    }

    /// Overwrite the coordinate of an existing vertex.
    ///
    /// # Panics
    ///
    /// If `v` has not been added.
    pub fn set_coord(&mut self, v: VertexId, pos: Coord) {
        self.coords[v.index()] = pos;
    }

    /// Add a **directed** arc `from → to`.
    ///
    /// # Panics
    ///
    /// If either endpoint has not been added.
    pub fn add_arc(&mut self, from: VertexId, to: VertexId, weight: Weight) {
        let n = self.coords.len();
        assert!(
            from.index() < n && to.index() < n,
            "arc {from} → {to} references a vertex outside 0..{n}"
        );
        self.raw_arcs.push(RawArc { tail: from, arc: Arc::new(to, weight) });
    }

    /// Reserve room for `additional` more arcs.
    pub fn reserve_arcs(&mut self, additional: usize) {
        self.raw_arcs.reserve(additional);
    }

    pub fn vertex_count(&self) -> usize { self.coords.len() }
    pub fn arc_count(&self) -> usize { self.raw_arcs.len() }

    /// Consume the builder and produce a [`Graph`].
    ///
    /// Time complexity: O(N + M) for the counting-sort CSR fill plus
    /// O(N log N) for the R-tree bulk load, where N = vertices, M = arcs.
    pub fn build(self) -> Graph {
        let vertex_count = self.coords.len();
        let arc_count    = self.raw_arcs.len();
        debug_assert!(arc_count <= u32::MAX as usize);

        // Row pointer: count arcs per tail, then prefix-sum.
        let mut first_out = vec![0u32; vertex_count + 1];
        for raw in &self.raw_arcs {
            first_out[raw.tail.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            first_out[i] += first_out[i - 1];
        }
        debug_assert_eq!(first_out[vertex_count] as usize, arc_count);

        // Stable fill: arcs land in their tail's slice in insertion order.
        let mut cursor: Vec<u32> = first_out[..vertex_count].to_vec();
        let mut arcs = vec![Arc::new(VertexId::INVALID, 0); arc_count];
        for raw in self.raw_arcs {
            let slot = &mut cursor[raw.tail.index()];
            arcs[*slot as usize] = raw.arc;
            *slot += 1;
        }

        // Bulk-load R-tree for O(N log N) construction (faster than N inserts).
        let entries: Vec<VertexEntry> = self
            .coords
            .iter()
            .enumerate()
            .map(|(i, &pos)| VertexEntry {
                point: VertexEntry::point_of(pos),
                id:    VertexId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Graph {
            coords: self.coords,
            first_out,
            arcs,
            spatial_idx,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
