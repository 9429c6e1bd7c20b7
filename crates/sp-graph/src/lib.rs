//! `sp-graph`: the read-only road network store.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`graph`]   | `Graph` (CSR + R-tree), `GraphBuilder`                       |
//! | [`dimacs`]  | `load_graph`, `load_graph_from_readers`, DIMACS writers      |
//! | [`error`]   | `GraphError`, `GraphResult<T>`, `InputFile`                  |
//!
//! # Sharing
//!
//! A [`Graph`] has no interior mutability and no `&mut self` methods, so it
//! is `Send + Sync`.  Load it once at startup and hand out
//! `std::sync::Arc<Graph>` clones to every query thread.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on the `sp-core` types.    |

pub mod dimacs;
pub mod error;
pub mod graph;

#[cfg(test)]
mod tests;

pub use dimacs::{load_graph, load_graph_from_readers, write_arcs, write_coordinates};
pub use error::{GraphError, GraphResult, InputFile};
pub use graph::{Graph, GraphBuilder};
