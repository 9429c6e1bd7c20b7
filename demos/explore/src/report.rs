//! JSON reports printed by the CLI.
//!
//! Vertex ids leave the core 0-based; everything here is rendered 1-based to
//! match the DIMACS files the user loaded.

use serde::Serialize;

use sp_core::{BoundingBox, Coord, Distance, VertexId, Weight};
use sp_graph::Graph;
use sp_search::SearchOutcome;

/// Smallest half-width of a route frame, in micro-degrees (0.05°).
const MIN_FRAME_RADIUS: i64 = 50_000;

fn one_based(vertices: &[VertexId]) -> Vec<u64> {
    vertices.iter().map(|v| v.one_based()).collect()
}

// ── Route ─────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RouteReport {
    pub source:      u64,
    pub destination: u64,
    pub distance:    Option<Distance>,
    pub path:        Vec<u64>,
    pub settled:     usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_order: Option<Vec<u64>>,
    /// Map window a renderer would draw to show the whole exploration.
    pub frame: Option<BoundingBox>,
}

impl RouteReport {
    pub fn new(
        graph: &Graph,
        source: VertexId,
        destination: VertexId,
        outcome: &SearchOutcome,
        include_trace: bool,
    ) -> Self {
        Self {
            source:      source.one_based(),
            destination: destination.one_based(),
            distance:    outcome.distance,
            path:        one_based(&outcome.path),
            settled:     outcome.settled_count(),
            settlement_order: include_trace.then(|| one_based(&outcome.settlement_order)),
            frame: view_frame(graph, &outcome.settlement_order),
        }
    }
}

/// Square window centred on the explored area with a 10 % margin, never
/// narrower than [`MIN_FRAME_RADIUS`].
pub fn view_frame(graph: &Graph, vertices: &[VertexId]) -> Option<BoundingBox> {
    let explored = BoundingBox::enclosing(vertices.iter().map(|&v| graph.coord(v)))?;
    let span = explored.lat_span().max(explored.lon_span());
    let radius = (span * 11 / 20).max(MIN_FRAME_RADIUS);
    Some(BoundingBox::around(explored.center(), radius.min(i64::from(i32::MAX)) as i32))
}

// ── Vertex ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ArcReport {
    pub head:   u64,
    pub coord:  Coord,
    pub weight: Weight,
}

#[derive(Serialize)]
pub struct VertexReport {
    pub id:    u64,
    pub coord: Coord,
    pub arcs:  Vec<ArcReport>,
}

impl VertexReport {
    pub fn new(graph: &Graph, v: VertexId) -> Self {
        let arcs = graph
            .out_arcs(v)
            .iter()
            .map(|a| ArcReport {
                head:   a.head.one_based(),
                coord:  graph.coord(a.head),
                weight: a.weight,
            })
            .collect();
        Self { id: v.one_based(), coord: graph.coord(v), arcs }
    }
}

// ── Window ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct WindowReport {
    pub window:   BoundingBox,
    pub count:    usize,
    pub vertices: Vec<u64>,
}

impl WindowReport {
    pub fn new(graph: &Graph, window: BoundingBox) -> Self {
        let vertices = graph.vertices_within(&window);
        Self { window, count: vertices.len(), vertices: one_based(&vertices) }
    }
}
