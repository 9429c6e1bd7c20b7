//! Unit tests for sp-graph.
//!
//! Graphs are either hand-built with `GraphBuilder` or parsed from in-memory
//! DIMACS text, so no data files are needed.

#[cfg(test)]
mod helpers {
    use std::io::Cursor;

    use sp_core::{Coord, VertexId};
    use crate::{Graph, GraphBuilder, GraphResult, load_graph_from_readers};

    /// Small directed network.
    ///
    /// Vertices (lat, lon in micro-degrees):
    ///   0:(0,0)  1:(0,1000)  2:(1000,0)  3:(1000,1000)
    ///
    /// Arcs: 0→1 (5), 0→2 (2), 2→1 (1), 1→3 (2), 3→0 (7)
    pub fn square() -> (Graph, [VertexId; 4]) {
        let mut b = GraphBuilder::new();
        let v0 = b.add_vertex(Coord::new(0, 0));
        let v1 = b.add_vertex(Coord::new(0, 1_000));
        let v2 = b.add_vertex(Coord::new(1_000, 0));
        let v3 = b.add_vertex(Coord::new(1_000, 1_000));
        b.add_arc(v0, v1, 5);
        b.add_arc(v0, v2, 2);
        b.add_arc(v2, v1, 1);
        b.add_arc(v1, v3, 2);
        b.add_arc(v3, v0, 7);
        (b.build(), [v0, v1, v2, v3])
    }

    pub fn load(co: &str, gr: &str) -> GraphResult<Graph> {
        load_graph_from_readers(Cursor::new(co.to_owned()), Cursor::new(gr.to_owned()))
    }

    pub const CO_4: &str = "\
c four vertices
p aux sp co 4
v 1 -73530767 41085396
v 2 -73530538 41086098
v 3 -73519366 41048796
v 4 -73519377 41048654
";

    pub const GR_4: &str = "\
c four vertices, four arcs
p sp 4 4
a 1 2 5
a 1 3 2
a 3 2 1
a 2 4 2
";
}

// ── Builder & CSR structure ───────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use sp_core::{Arc, Coord, VertexId};
    use crate::{Graph, GraphBuilder};

    #[test]
    fn empty_build() {
        let g = GraphBuilder::new().build();
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.arc_count(), 0);
        assert!(g.is_empty());
        assert!(g.bounds().is_none());
    }

    #[test]
    fn preallocated_vertices_start_at_origin() {
        let mut b = GraphBuilder::try_with_vertices(3).unwrap();
        assert_eq!(b.vertex_count(), 3);
        b.set_coord(VertexId(2), Coord::new(7, 8));
        let g = b.build();
        assert_eq!(g.coord(VertexId(0)), Coord::default());
        assert_eq!(g.coord(VertexId(2)), Coord::new(7, 8));
    }

    #[test]
    fn degrees_and_arcs() {
        let (g, [v0, v1, v2, v3]) = super::helpers::square();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.arc_count(), 5);
        assert_eq!(g.out_degree(v0), 2);
        assert_eq!(g.out_degree(v1), 1);
        assert_eq!(g.out_degree(v2), 1);
        assert_eq!(g.out_degree(v3), 1);
        assert_eq!(g.out_arcs(v2), &[Arc::new(v1, 1)]);
    }

    #[test]
    fn arcs_are_directed() {
        let (g, [v0, v1, _, _]) = super::helpers::square();
        assert_eq!(g.arc_weight(v0, v1), Some(5));
        assert_eq!(g.arc_weight(v1, v0), None);
        assert_eq!(g.arc_weight(VertexId(99), v0), None);
    }

    #[test]
    fn out_arcs_keep_insertion_order_across_interleaved_tails() {
        let mut b = GraphBuilder::new();
        let vs: Vec<VertexId> = (0..4).map(|_| b.add_vertex(Coord::default())).collect();
        // Tails interleaved on purpose: CSR grouping must not reorder siblings.
        b.add_arc(vs[2], vs[3], 30);
        b.add_arc(vs[0], vs[3], 1);
        b.add_arc(vs[2], vs[0], 10);
        b.add_arc(vs[0], vs[1], 2);
        b.add_arc(vs[2], vs[1], 20);
        let g = b.build();

        let heads = |v: VertexId| g.out_arcs(v).iter().map(|a| a.head).collect::<Vec<_>>();
        assert_eq!(heads(vs[0]), vec![vs[3], vs[1]]);
        assert_eq!(heads(vs[2]), vec![vs[3], vs[0], vs[1]]);
        assert!(heads(vs[1]).is_empty());
        assert!(heads(vs[3]).is_empty());
    }

    #[test]
    fn parallel_arcs_report_smallest_weight() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex(Coord::default());
        let c = b.add_vertex(Coord::default());
        b.add_arc(a, c, 9);
        b.add_arc(a, c, 4);
        let g = b.build();
        assert_eq!(g.out_degree(a), 2);
        assert_eq!(g.arc_weight(a, c), Some(4));
    }

    #[test]
    fn zero_weight_self_loop_is_accepted() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex(Coord::default());
        b.add_arc(a, a, 0);
        let g = b.build();
        assert_eq!(g.arc_weight(a, a), Some(0));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn arc_to_unknown_vertex_panics() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex(Coord::default());
        b.add_arc(a, VertexId(1), 1);
    }

    #[test]
    fn graph_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Graph>();
    }
}

// ── Spatial queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod spatial {
    use sp_core::{BoundingBox, Coord};
    use crate::GraphBuilder;

    #[test]
    fn nearest_exact_and_between() {
        let (g, [v0, v1, _, v3]) = super::helpers::square();
        assert_eq!(g.nearest_vertex(Coord::new(0, 0)), Some(v0));
        assert_eq!(g.nearest_vertex(Coord::new(100, 900)), Some(v1));
        assert_eq!(g.nearest_vertex(Coord::new(5_000, 5_000)), Some(v3));
    }

    #[test]
    fn nearest_on_empty_graph() {
        let g = GraphBuilder::new().build();
        assert!(g.nearest_vertex(Coord::new(0, 0)).is_none());
    }

    #[test]
    fn window_query_is_inclusive_and_sorted() {
        let (g, [v0, v1, v2, _]) = super::helpers::square();
        let window = BoundingBox::from_corners(Coord::new(0, 0), Coord::new(1_000, 999));
        assert_eq!(g.vertices_within(&window), vec![v0, v2]);

        let window = BoundingBox::around(Coord::new(0, 500), 500);
        assert_eq!(g.vertices_within(&window), vec![v0, v1]);
    }

    #[test]
    fn window_query_matches_linear_scan() {
        let mut b = GraphBuilder::new();
        for lat in -10..10 {
            for lon in -10..10 {
                b.add_vertex(Coord::new(lat * 37_000, lon * 41_000));
            }
        }
        let g = b.build();
        let window = BoundingBox::from_corners(Coord::new(-120_000, -50_000), Coord::new(200_000, 333_000));
        let expected: Vec<_> = (0..g.vertex_count())
            .map(|i| sp_core::VertexId(i as u32))
            .filter(|&v| window.contains(g.coord(v)))
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(g.vertices_within(&window), expected);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let (g, _) = super::helpers::square();
        let bbox = g.bounds().unwrap();
        assert_eq!(bbox.min, Coord::new(0, 0));
        assert_eq!(bbox.max, Coord::new(1_000, 1_000));
    }
}

// ── DIMACS loader ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use sp_core::{Arc, Coord, VertexId};
    use crate::{GraphError, InputFile, load_graph};
    use super::helpers::{CO_4, GR_4, load};

    #[test]
    fn loads_four_vertex_graph() {
        let g = load(CO_4, GR_4).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.arc_count(), 4);
        // Longitude comes first in the file; Coord is (lat, lon).
        assert_eq!(g.coord(VertexId(0)), Coord::new(41_085_396, -73_530_767));
        assert_eq!(
            g.out_arcs(VertexId(0)),
            &[Arc::new(VertexId(1), 5), Arc::new(VertexId(2), 2)]
        );
        assert_eq!(g.out_arcs(VertexId(1)), &[Arc::new(VertexId(3), 2)]);
    }

    #[test]
    fn blank_lines_and_comments_are_ignored() {
        let co = "c a\n\np aux sp co 2\nc b\nv 1 10 20\n   \nv 2 30 40\n";
        let gr = "p sp 2 1\n\nc only arc\na 2 1 0\n";
        let g = load(co, gr).unwrap();
        assert_eq!(g.coord(VertexId(1)), Coord::new(40, 30));
        assert_eq!(g.arc_weight(VertexId(1), VertexId(0)), Some(0));
    }

    #[test]
    fn duplicate_coordinate_last_declaration_wins() {
        let co = "p aux sp co 2\nv 1 10 20\nv 2 30 40\nv 1 -5 -6\n";
        let gr = "p sp 2 0\n";
        let g = load(co, gr).unwrap();
        assert_eq!(g.coord(VertexId(0)), Coord::new(-6, -5));
        assert_eq!(g.coord(VertexId(1)), Coord::new(40, 30));
    }

    #[test]
    fn undeclared_coordinate_defaults_to_origin() {
        let co = "p aux sp co 2\nv 2 30 40\n";
        let gr = "p sp 2 0\n";
        let g = load(co, gr).unwrap();
        assert_eq!(g.coord(VertexId(0)), Coord::default());
    }

    #[test]
    fn arc_to_vertex_beyond_declared_count_is_malformed() {
        let gr = "p sp 4 1\na 1 5 3\n";
        let err = load(CO_4, gr).unwrap_err();
        assert!(
            matches!(err, GraphError::MalformedInput { file: InputFile::Arcs, line: 2, .. }),
            "got {err}"
        );
    }

    #[test]
    fn zero_vertex_id_is_malformed() {
        let co = "p aux sp co 1\nv 0 1 1\n";
        let err = load(co, "p sp 1 0\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { file: InputFile::Coordinates, line: 2, .. }));
    }

    #[test]
    fn vertex_id_beyond_declared_count_is_malformed() {
        let co = "p aux sp co 2\nv 3 1 1\n";
        let err = load(co, "p sp 2 0\n").unwrap_err();
        assert!(
            matches!(err, GraphError::MalformedInput { file: InputFile::Coordinates, line: 2, .. }),
            "got {err}"
        );
    }

    #[test]
    fn oversized_vertex_count_is_malformed() {
        let err = load("p aux sp co 18446744073709551615\n", "p sp 18446744073709551615 0\n")
            .unwrap_err();
        assert!(
            matches!(err, GraphError::MalformedInput { file: InputFile::Coordinates, line: 1, .. }),
            "got {err}"
        );

        // One past the last addressable id.
        let co = format!("c sentinel\np aux sp co {}\n", u64::from(u32::MAX) + 1);
        let err = load(&co, "p sp 1 0\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { file: InputFile::Coordinates, line: 2, .. }));
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let err = load(CO_4, "p sp 4 1\na 1 2\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { file: InputFile::Arcs, .. }));

        let err = load("p aux sp co 1\nv 1 2 3 4\n", "p sp 1 0\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { file: InputFile::Coordinates, .. }));
    }

    #[test]
    fn non_integer_fields_are_malformed() {
        let err = load(CO_4, "p sp 4 1\na 1 2 1.5\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { .. }));

        let err = load("p aux sp co 1\nv 1 east 3\n", "p sp 1 0\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { .. }));
    }

    #[test]
    fn negative_weight_is_malformed() {
        let err = load(CO_4, "p sp 4 1\na 1 2 -3\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { file: InputFile::Arcs, line: 2, .. }));
    }

    #[test]
    fn data_before_header_is_malformed() {
        let err = load("v 1 2 3\np aux sp co 1\n", "p sp 1 0\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn missing_header_is_malformed() {
        let err = load(CO_4, "c nothing here\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { file: InputFile::Arcs, .. }));
    }

    #[test]
    fn unknown_line_type_is_malformed() {
        let err = load(CO_4, "p sp 4 0\ne 1 2 3\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn arc_count_must_match_header() {
        let err = load(CO_4, "p sp 4 2\na 1 2 3\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { file: InputFile::Arcs, .. }));
    }

    #[test]
    fn vertex_count_mismatch_is_inconsistent() {
        let err = load(CO_4, "p sp 5 0\n").unwrap_err();
        assert!(matches!(
            err,
            GraphError::InconsistentGraph { coordinate_vertices: 4, arc_vertices: 5 }
        ));
    }

    #[test]
    fn missing_file_is_file_access() {
        let dir = std::env::temp_dir();
        let err = load_graph(dir.join("sp-graph-missing.co"), dir.join("sp-graph-missing.gr"))
            .unwrap_err();
        assert!(matches!(err, GraphError::FileAccess { file: InputFile::Coordinates, .. }));
    }

    #[test]
    fn loads_from_files_on_disk() {
        let dir = std::env::temp_dir();
        let co = dir.join(format!("sp-graph-{}.co", std::process::id()));
        let gr = dir.join(format!("sp-graph-{}.gr", std::process::id()));
        std::fs::write(&co, CO_4).unwrap();
        std::fs::write(&gr, GR_4).unwrap();

        let result = load_graph(&co, &gr);
        let _ = std::fs::remove_file(&co);
        let _ = std::fs::remove_file(&gr);

        let g = result.unwrap();
        assert_eq!((g.vertex_count(), g.arc_count()), (4, 4));
    }

    #[test]
    fn error_messages_name_file_and_line() {
        let err = load(CO_4, "p sp 4 1\na 1 9 3\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("arc file"), "{msg}");
        assert!(msg.contains("line 2"), "{msg}");
    }
}

// ── Round trip ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod round_trip {
    use std::fmt::Write as _;

    use rand::{Rng, SeedableRng, rngs::SmallRng};

    use sp_core::VertexId;
    use crate::{write_arcs, write_coordinates};
    use super::helpers::load;

    /// Generate DIMACS text for a random graph, returning (co, gr, n, m).
    fn random_dimacs(seed: u64) -> (String, String, usize, usize) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let n = rng.gen_range(1..60usize);
        let m = rng.gen_range(0..200usize);

        let mut co = format!("c seed {seed}\np aux sp co {n}\n");
        for id in 1..=n {
            let lon: i32 = rng.gen_range(-180_000_000..=180_000_000);
            let lat: i32 = rng.gen_range(-90_000_000..=90_000_000);
            writeln!(co, "v {id} {lon} {lat}").unwrap();
        }

        let mut gr = format!("c seed {seed}\np sp {n} {m}\n");
        for _ in 0..m {
            let from = rng.gen_range(1..=n);
            let to = rng.gen_range(1..=n);
            let w: u32 = rng.gen_range(0..10_000);
            writeln!(gr, "a {from} {to} {w}").unwrap();
        }
        (co, gr, n, m)
    }

    #[test]
    fn counts_reproduce_headers() {
        for seed in 0..25 {
            let (co, gr, n, m) = random_dimacs(seed);
            let g = load(&co, &gr).unwrap();
            assert_eq!(g.vertex_count(), n, "seed {seed}");
            assert_eq!(g.arc_count(), m, "seed {seed}");
        }
    }

    #[test]
    fn writers_reproduce_loaded_graph() {
        let (co, gr, _, _) = random_dimacs(7);
        let g = load(&co, &gr).unwrap();

        let mut co_out = Vec::new();
        let mut gr_out = Vec::new();
        write_coordinates(&g, &mut co_out).unwrap();
        write_arcs(&g, &mut gr_out).unwrap();

        let again = load(
            std::str::from_utf8(&co_out).unwrap(),
            std::str::from_utf8(&gr_out).unwrap(),
        )
        .unwrap();

        assert_eq!(again.coords(), g.coords());
        for v in 0..g.vertex_count() {
            let v = VertexId(v as u32);
            assert_eq!(again.out_arcs(v), g.out_arcs(v));
        }
    }
}
