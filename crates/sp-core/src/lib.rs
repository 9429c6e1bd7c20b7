//! `sp-core`: foundational types shared by the graph store and the search
//! engine.
//!
//! This crate has no `sp-*` dependencies and a single required external one
//! (`thiserror`), plus optional `serde`.
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `VertexId`                                                |
//! | [`geo`]    | `Coord` (micro-degree fixed point), `BoundingBox`         |
//! | [`arc`]    | `Arc`, `Weight`, `Distance`                               |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod arc;
pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use arc::{Arc, Distance, Weight};
pub use error::{CoreError, CoreResult};
pub use geo::{BoundingBox, Coord, MICRO_DEGREES};
pub use ids::VertexId;
