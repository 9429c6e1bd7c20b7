//! `sp-search`: single-source shortest paths with a replayable trace.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`dijkstra`] | `search`, `explore`, `run`, `SearchOutcome`, `PathEngine`, `Dijkstra` |
//! | [`state`]    | `SearchState` (per-query working arrays), `VertexState`    |
//! | [`queue`]    | `StableQueue` (min-heap with insertion-order tie-breaking) |
//! | [`error`]    | `SearchError`, `SearchResult<T>`                           |
//!
//! # Determinism
//!
//! Equal tentative distances are popped in insertion order, and arcs are
//! relaxed in the graph's stored order, so the same query on the same graph
//! always yields the same path and the same settlement order.
//!
//! # Concurrency
//!
//! Every call allocates its own [`SearchState`] and only reads the
//! [`sp_graph::Graph`], so any number of searches may run in parallel on one
//! shared graph.

pub mod dijkstra;
pub mod error;
pub mod queue;
pub mod state;


pub use dijkstra::{Dijkstra, PathEngine, SearchOutcome, explore, run, search};
pub use error::{SearchError, SearchResult};
pub use queue::StableQueue;
pub use state::{SearchState, VertexState};
