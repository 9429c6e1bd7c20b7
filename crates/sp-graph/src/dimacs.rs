//! DIMACS road-network loader (and writer).
//!
//! # File formats
//!
//! Two companion text files, one record per line.  Lines starting with `c`
//! are comments; blank lines are ignored.
//!
//! Coordinate file (`.co`):
//!
//! ```text
//! c USA-road-d.LKS.co
//! p aux sp co 3
//! v 1 -73530767 41085396
//! v 2 -73530538 41086098
//! v 3 -73519366 41048796
//! ```
//!
//! Arc file (`.gr`):
//!
//! ```text
//! c USA-road-t.LKS.gr
//! p sp 3 2
//! a 1 2 803
//! a 2 1 803
//! ```
//!
//! Vertex ids in both files are **1-based**; the loader converts them to
//! 0-based [`VertexId`]s.  Coordinates are stored already scaled to integer
//! micro-degrees (longitude first, as in the published files) and are taken
//! as-is.
//!
//! # Policies
//!
//! | Situation                             | Outcome                          |
//! |---------------------------------------|----------------------------------|
//! | Same vertex declared twice in `.co`   | Last declaration wins            |
//! | Vertex never declared in `.co`        | Keeps `(0, 0)`, logged at `warn` |
//! | Arc count differs from `.gr` header   | `MalformedInput`                 |
//! | Vertex counts of the headers differ   | `InconsistentGraph`              |

use std::collections::TryReserveError;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info, warn};

use sp_core::{Coord, VertexId, Weight};

use crate::{Graph, GraphBuilder, GraphError, GraphResult, InputFile};

/// Upper bound on arc storage reserved up front from the header alone, so a
/// corrupt header cannot trigger a huge allocation before any arc is read.
const MAX_ARC_PREALLOC: usize = 1 << 27;

/// Largest vertex count a header may declare: every id must stay below the
/// `VertexId::INVALID` sentinel.
const MAX_VERTICES: usize = VertexId::INVALID.0 as usize;

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a graph from a DIMACS coordinate file and arc file.
///
/// The returned graph is owned by the caller; nothing is published globally.
pub fn load_graph(
    coordinate_path: impl AsRef<Path>,
    arc_path: impl AsRef<Path>,
) -> GraphResult<Graph> {
    let coordinate_path = coordinate_path.as_ref();
    let arc_path        = arc_path.as_ref();
    info!(
        coordinates = %coordinate_path.display(),
        arcs = %arc_path.display(),
        "loading road network"
    );

    let coordinates = File::open(coordinate_path)
        .map_err(|source| GraphError::FileAccess { file: InputFile::Coordinates, source })?;
    let arcs = File::open(arc_path)
        .map_err(|source| GraphError::FileAccess { file: InputFile::Arcs, source })?;

    load_graph_from_readers(BufReader::new(coordinates), BufReader::new(arcs))
}

/// Like [`load_graph`] but accepts any buffered reader.
///
/// Useful for testing (pass a `std::io::Cursor`) or for loading from
/// decompression streams.
pub fn load_graph_from_readers<C: BufRead, A: BufRead>(
    coordinates: C,
    arcs: A,
) -> GraphResult<Graph> {
    let builder = read_coordinates(coordinates)?;
    let builder = read_arcs(arcs, builder)?;
    let graph = builder.build();
    info!(
        vertices = graph.vertex_count(),
        arcs = graph.arc_count(),
        "road network loaded"
    );
    Ok(graph)
}

/// Write the coordinate table of `graph` in `.co` format.
pub fn write_coordinates<W: Write>(graph: &Graph, mut out: W) -> std::io::Result<()> {
    writeln!(out, "c coordinates written by sp-graph")?;
    writeln!(out, "p aux sp co {}", graph.vertex_count())?;
    for (i, c) in graph.coords().iter().enumerate() {
        writeln!(out, "v {} {} {}", i + 1, c.lon, c.lat)?;
    }
    out.flush()
}

/// Write the arcs of `graph` in `.gr` format, grouped by tail vertex.
pub fn write_arcs<W: Write>(graph: &Graph, mut out: W) -> std::io::Result<()> {
    writeln!(out, "c arcs written by sp-graph")?;
    writeln!(out, "p sp {} {}", graph.vertex_count(), graph.arc_count())?;
    for tail in 0..graph.vertex_count() {
        let tail = VertexId(tail as u32);
        for arc in graph.out_arcs(tail) {
            writeln!(out, "a {} {} {}", tail.one_based(), arc.head.one_based(), arc.weight)?;
        }
    }
    out.flush()
}

// ── Coordinate file ───────────────────────────────────────────────────────────

fn read_coordinates<R: BufRead>(reader: R) -> GraphResult<GraphBuilder> {
    const FILE: InputFile = InputFile::Coordinates;

    let mut builder: Option<GraphBuilder> = None;
    let mut declared: Vec<bool> = Vec::new();
    let mut line_no = 0;

    for line in reader.lines() {
        line_no += 1;
        let line = line.map_err(|source| GraphError::FileAccess { file: FILE, source })?;
        let Some(record) = Record::classify(&line) else { continue };

        match record {
            Record::Header(text) => {
                if builder.is_some() {
                    return Err(GraphError::malformed(FILE, line_no, "duplicate header line"));
                }
                let [_, aux, sp, co, n] = split_fields::<5>(text, FILE, line_no)?;
                if (aux, sp, co) != ("aux", "sp", "co") {
                    return Err(GraphError::malformed(
                        FILE,
                        line_no,
                        format!("expected header \"p aux sp co <n>\", found {text:?}"),
                    ));
                }
                let n: usize = parse_number(n, FILE, line_no, "vertex count")?;
                if n > MAX_VERTICES {
                    return Err(GraphError::malformed(
                        FILE,
                        line_no,
                        format!("vertex count {n} exceeds the maximum of {MAX_VERTICES}"),
                    ));
                }
                debug!(vertices = n, "coordinate header");
                let unallocatable = |e: TryReserveError| {
                    GraphError::malformed(FILE, line_no, format!("cannot allocate {n} vertices: {e}"))
                };
                builder = Some(GraphBuilder::try_with_vertices(n).map_err(unallocatable)?);
                declared.try_reserve_exact(n).map_err(unallocatable)?;
                declared.resize(n, false);
            }
            Record::Data("v", text) => {
                let Some(b) = builder.as_mut() else {
                    return Err(GraphError::malformed(FILE, line_no, "data line before header"));
                };
                let [_, id, lon, lat] = split_fields::<4>(text, FILE, line_no)?;
                let v   = parse_vertex(id, b.vertex_count(), FILE, line_no)?;
                let lon = parse_number::<i32>(lon, FILE, line_no, "longitude")?;
                let lat = parse_number::<i32>(lat, FILE, line_no, "latitude")?;
                // Last declaration wins.
                b.set_coord(v, Coord::new(lat, lon));
                declared[v.index()] = true;
            }
            Record::Data(tag, _) => {
                return Err(GraphError::malformed(
                    FILE,
                    line_no,
                    format!("unexpected line type {tag:?}"),
                ));
            }
        }
    }

    let builder = builder
        .ok_or_else(|| GraphError::malformed(FILE, line_no, "missing \"p aux sp co\" header"))?;

    let missing = declared.iter().filter(|&&d| !d).count();
    if missing > 0 {
        warn!(missing, "vertices without a coordinate line default to (0, 0)");
    }
    Ok(builder)
}

// ── Arc file ──────────────────────────────────────────────────────────────────

fn read_arcs<R: BufRead>(reader: R, mut builder: GraphBuilder) -> GraphResult<GraphBuilder> {
    const FILE: InputFile = InputFile::Arcs;

    let vertex_count = builder.vertex_count();
    let mut declared_arcs: Option<usize> = None;
    let mut line_no = 0;

    for line in reader.lines() {
        line_no += 1;
        let line = line.map_err(|source| GraphError::FileAccess { file: FILE, source })?;
        let Some(record) = Record::classify(&line) else { continue };

        match record {
            Record::Header(text) => {
                if declared_arcs.is_some() {
                    return Err(GraphError::malformed(FILE, line_no, "duplicate header line"));
                }
                let [_, sp, n, m] = split_fields::<4>(text, FILE, line_no)?;
                if sp != "sp" {
                    return Err(GraphError::malformed(
                        FILE,
                        line_no,
                        format!("expected header \"p sp <n> <m>\", found {text:?}"),
                    ));
                }
                let n: usize = parse_number(n, FILE, line_no, "vertex count")?;
                let m: usize = parse_number(m, FILE, line_no, "arc count")?;
                debug!(vertices = n, arcs = m, "arc header");
                if n != vertex_count {
                    return Err(GraphError::InconsistentGraph {
                        coordinate_vertices: vertex_count,
                        arc_vertices:        n,
                    });
                }
                builder.reserve_arcs(m.min(MAX_ARC_PREALLOC));
                declared_arcs = Some(m);
            }
            Record::Data("a", text) => {
                if declared_arcs.is_none() {
                    return Err(GraphError::malformed(FILE, line_no, "data line before header"));
                }
                let [_, from, to, weight] = split_fields::<4>(text, FILE, line_no)?;
                let from   = parse_vertex(from, vertex_count, FILE, line_no)?;
                let to     = parse_vertex(to, vertex_count, FILE, line_no)?;
                let weight = parse_number::<Weight>(weight, FILE, line_no, "weight")?;
                builder.add_arc(from, to, weight);
            }
            Record::Data(tag, _) => {
                return Err(GraphError::malformed(
                    FILE,
                    line_no,
                    format!("unexpected line type {tag:?}"),
                ));
            }
        }
    }

    let declared = declared_arcs
        .ok_or_else(|| GraphError::malformed(FILE, line_no, "missing \"p sp\" header"))?;
    if builder.arc_count() != declared {
        return Err(GraphError::malformed(
            FILE,
            line_no,
            format!("header declares {declared} arcs but file contains {}", builder.arc_count()),
        ));
    }
    Ok(builder)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A non-blank, non-comment line.
enum Record<'a> {
    /// `p ...`: the whole line.
    Header(&'a str),
    /// Any other line, tagged by its first token.
    Data(&'a str, &'a str),
}

impl<'a> Record<'a> {
    fn classify(line: &'a str) -> Option<Record<'a>> {
        let text = line.trim();
        if text.is_empty() || text.starts_with('c') {
            return None;
        }
        let tag = text.split_ascii_whitespace().next()?;
        if tag == "p" {
            Some(Record::Header(text))
        } else {
            Some(Record::Data(tag, text))
        }
    }
}

/// Split `text` into exactly `K` whitespace-separated fields.
fn split_fields<const K: usize>(
    text: &str,
    file: InputFile,
    line: usize,
) -> GraphResult<[&str; K]> {
    let mut fields = [""; K];
    let mut iter = text.split_ascii_whitespace();
    let mut found = 0;
    for slot in fields.iter_mut() {
        match iter.next() {
            Some(f) => {
                *slot = f;
                found += 1;
            }
            None => break,
        }
    }
    let extra = iter.count();
    if found < K || extra > 0 {
        return Err(GraphError::malformed(
            file,
            line,
            format!("expected {K} fields, found {}", found + extra),
        ));
    }
    Ok(fields)
}

fn parse_number<T: FromStr>(
    field: &str,
    file: InputFile,
    line: usize,
    what: &str,
) -> GraphResult<T> {
    field.parse::<T>().map_err(|_| {
        GraphError::malformed(file, line, format!("invalid {what} {field:?}"))
    })
}

/// Parse a 1-based vertex id and check it against the declared count.
fn parse_vertex(
    field: &str,
    vertex_count: usize,
    file: InputFile,
    line: usize,
) -> GraphResult<VertexId> {
    let id: u64 = parse_number(field, file, line, "vertex id")?;
    VertexId::from_one_based(id)
        .filter(|v| v.index() < vertex_count)
        .ok_or_else(|| {
            GraphError::malformed(
                file,
                line,
                format!("vertex id {id} outside declared range 1..={vertex_count}"),
            )
        })
}
