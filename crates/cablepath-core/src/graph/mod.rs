//! Connection graph engine.
//!
//! # Overview
//!
//! A directed multigraph whose vertices are electrical connections and whose
//! edges are physical links between them. Bidirectional links are stored as
//! two directed edges: the normal edge and an explicit *complement* edge in
//! the opposite direction.
//!
//! ## Pipeline
//!
//! ```text
//! Link { start, end, weight, is_complement }
//!        ↓  engine::GraphImpl::add_edge()
//! GraphImpl (arena of vertices + edges, hashed connection index)
//!        ↓  traversal::breadth_first()
//! BfsWalk (discovered connections, examined links)
//!        ↓  traversal::shortest_path()   (via petgraph projection)
//! Vec<Connection>
//! ```
//!
//! ## Handles
//!
//! [`Vertex`] and [`Edge`] are plain index values tagged with the graph's
//! generation. [`GraphImpl::clear`] bumps the generation, so handles taken
//! before a clear resolve to nothing afterwards instead of aliasing new data.

pub mod engine;
pub mod traversal;
pub mod types;

pub use engine::{GraphError, GraphImpl};
pub use traversal::{BfsWalk, ShortestPath, breadth_first, shortest_path, to_petgraph};
pub use types::{Connection, Edge, Link, Vertex};
