//! Adjacency-list multigraph keyed by connection id.
//!
//! # Storage
//!
//! Vertices and edges live in dense arenas (`Vec`). A `HashMap` maps each
//! [`Connection`] to its vertex slot, and a second map keyed on the ordered
//! `(start, end)` vertex pair makes edge insertion idempotent. Both lookups
//! are O(1) amortized, which keeps loading a link list of thousands of rows
//! linear in the row count.
//!
//! Removed edges leave a tombstone in the edge arena; their slot is never
//! reused within a generation, so a stale [`Edge`] handle can never alias a
//! newer edge.
//!
//! # Edge Identity
//!
//! Edge identity is the ordered vertex pair only. Re-adding `(a, b)` with a
//! different weight or complement flag returns the existing edge and keeps
//! the first weight. The complement flag is the exception: once any
//! non-complement link is added for the pair, the edge stays physical.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use super::traversal;
use super::types::{Connection, Edge, Link, Vertex};

/// Errors from connection graph queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The queried connection was never added to the graph.
    #[error("connection not found in graph: {0}")]
    UnknownConnection(Connection),
}

// ---------------------------------------------------------------------------
// Internal storage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct VertexData {
    connection: Connection,
    /// Outgoing edge slots, in insertion order.
    out_edges: Vec<usize>,
}

#[derive(Debug, Clone)]
struct EdgeData {
    link: Link,
    start: usize,
    end: usize,
}

// ---------------------------------------------------------------------------
// GraphImpl
// ---------------------------------------------------------------------------

/// Directed multigraph over connections.
///
/// All mutating operations are total: they never fail. Lookups on unknown
/// connections return `None` or [`GraphError::UnknownConnection`].
#[derive(Debug, Clone, Default)]
pub struct GraphImpl {
    vertices: Vec<VertexData>,
    vertex_index: HashMap<Connection, usize>,
    edges: Vec<Option<EdgeData>>,
    edge_index: HashMap<(usize, usize), usize>,
    edge_count: usize,
    generation: u32,
}

impl GraphImpl {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `vertices` and `edges`.
    #[must_use]
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            vertex_index: HashMap::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
            edge_index: HashMap::with_capacity(edges),
            edge_count: 0,
            generation: 0,
        }
    }

    // -- vertices -----------------------------------------------------------

    /// Return the vertex for `connection`, creating it on first reference.
    ///
    /// Never returns a null handle.
    pub fn add_vertex(&mut self, connection: Connection) -> Vertex {
        let index = self.vertex_slot_or_insert(connection);
        Vertex::new(index, self.generation)
    }

    /// Look up the vertex for `connection` without creating it.
    #[must_use]
    pub fn vertex(&self, connection: Connection) -> Option<Vertex> {
        self.vertex_index
            .get(&connection)
            .map(|&index| Vertex::new(index, self.generation))
    }

    /// Returns `true` if `connection` has a vertex in the graph.
    #[must_use]
    pub fn contains(&self, connection: Connection) -> bool {
        self.vertex_index.contains_key(&connection)
    }

    /// Number of distinct vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Presence probe: 1 if `connection` has a vertex, 0 otherwise.
    #[must_use]
    pub fn get_vertex_count(&self, connection: Connection) -> usize {
        usize::from(self.contains(connection))
    }

    /// Resolve a vertex handle back to its connection.
    ///
    /// Null handles and handles from before the last [`clear`](Self::clear)
    /// return `None`.
    #[must_use]
    pub fn connection(&self, vertex: Vertex) -> Option<Connection> {
        let slot = vertex.slot()?;
        if slot.generation != self.generation {
            return None;
        }
        self.vertices.get(slot.index).map(|v| v.connection)
    }

    // -- edges --------------------------------------------------------------

    /// Add a directed edge for `link`, creating missing endpoint vertices.
    ///
    /// If an edge with the same ordered `(start, end)` pair exists, its
    /// handle is returned and the graph is unchanged.
    pub fn add_edge(&mut self, link: Link) -> Edge {
        let start = self.vertex_slot_or_insert(link.start);
        let end = self.vertex_slot_or_insert(link.end);

        if let Some(&existing) = self.edge_index.get(&(start, end)) {
            // A physical link landing on a complement edge makes it physical.
            if !link.is_complement
                && let Some(data) = self.edges[existing].as_mut()
            {
                data.link.is_complement = false;
            }
            return Edge::new(existing, self.generation);
        }

        let index = self.edges.len();
        self.edges.push(Some(EdgeData { link, start, end }));
        self.edge_index.insert((start, end), index);
        self.vertices[start].out_edges.push(index);
        self.edge_count += 1;

        Edge::new(index, self.generation)
    }

    /// Look up the edge `start → end`.
    #[must_use]
    pub fn find_edge(&self, start: Connection, end: Connection) -> Option<Edge> {
        let s = *self.vertex_index.get(&start)?;
        let e = *self.vertex_index.get(&end)?;
        self.edge_index
            .get(&(s, e))
            .map(|&index| Edge::new(index, self.generation))
    }

    /// Number of live edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Remove exactly the edge designated by `edge`.
    ///
    /// Endpoint vertices are kept even if they become isolated. Removing a
    /// null, stale, or already removed edge is a no-op that returns `false`.
    pub fn remove_edge(&mut self, edge: Edge) -> bool {
        let Some(index) = self.live_edge_index(edge) else {
            return false;
        };
        let Some(data) = self.edges[index].take() else {
            return false;
        };

        self.edge_index.remove(&(data.start, data.end));
        self.vertices[data.start].out_edges.retain(|&e| e != index);
        self.edge_count -= 1;
        true
    }

    /// Resolve an edge handle to the link it carries.
    #[must_use]
    pub fn link(&self, edge: Edge) -> Option<Link> {
        let index = self.live_edge_index(edge)?;
        self.edges[index].as_ref().map(|data| data.link)
    }

    /// Outgoing links of `connection`, in insertion order.
    ///
    /// Empty when the connection is unknown.
    pub fn out_links(&self, connection: Connection) -> impl Iterator<Item = Link> + '_ {
        let out_edges = self
            .vertex_index
            .get(&connection)
            .map_or(&[] as &[usize], |&v| self.vertices[v].out_edges.as_slice());
        out_edges
            .iter()
            .filter_map(|&e| self.edges[e].as_ref().map(|data| data.link))
    }

    /// Every live link, in insertion order.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.edges.iter().flatten().map(|data| data.link)
    }

    /// Every connection with a vertex, in insertion order.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        self.vertices.iter().map(|v| v.connection)
    }

    // -- whole graph --------------------------------------------------------

    /// Remove all vertices and edges and invalidate every handle.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.vertex_index.clear();
        self.edges.clear();
        self.edge_index.clear();
        self.edge_count = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Connections reachable from `connection`, breadth-first.
    ///
    /// The start connection comes first, then each reachable connection once,
    /// in discovery order. Complement edges are followed like any other edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownConnection`] if `connection` was never
    /// added.
    pub fn get_linked_connections(&self, connection: Connection) -> Result<Vec<Connection>, GraphError> {
        traversal::breadth_first(self, connection).map(|walk| walk.connections)
    }

    /// Links examined by a breadth-first walk from `connection`, in
    /// examination order. Complement edges are included.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownConnection`] if `connection` was never
    /// added.
    pub fn visited_links(&self, connection: Connection) -> Result<Vec<Link>, GraphError> {
        traversal::breadth_first(self, connection).map(|walk| walk.links)
    }

    /// Minimum-weight route from `from` to `to`; see [`traversal::shortest_path`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownConnection`] if either endpoint is absent.
    pub fn shortest_path(
        &self,
        from: Connection,
        to: Connection,
    ) -> Result<Option<traversal::ShortestPath>, GraphError> {
        traversal::shortest_path(self, from, to)
    }

    /// Project the graph into a petgraph `DiGraph` (node `i` = vertex slot `i`).
    #[must_use]
    pub fn to_petgraph(&self) -> petgraph::graph::DiGraph<Connection, Link> {
        traversal::to_petgraph(self)
    }

    // -- crate-internal accessors for traversal -----------------------------

    pub(crate) fn vertex_slot(&self, connection: Connection) -> Option<usize> {
        self.vertex_index.get(&connection).copied()
    }

    pub(crate) fn vertex_connection(&self, index: usize) -> Connection {
        self.vertices[index].connection
    }

    /// Outgoing `(link, end_slot)` pairs of the vertex at `index`.
    pub(crate) fn out_edges_of(&self, index: usize) -> impl Iterator<Item = (Link, usize)> + '_ {
        self.vertices[index]
            .out_edges
            .iter()
            .filter_map(|&e| self.edges[e].as_ref().map(|data| (data.link, data.end)))
    }

    /// Live edges as `(start_slot, end_slot, link)`.
    pub(crate) fn edge_slots(&self) -> impl Iterator<Item = (usize, usize, Link)> + '_ {
        self.edges
            .iter()
            .flatten()
            .map(|data| (data.start, data.end, data.link))
    }

    // -- helpers ------------------------------------------------------------

    fn vertex_slot_or_insert(&mut self, connection: Connection) -> usize {
        if let Some(&index) = self.vertex_index.get(&connection) {
            return index;
        }
        let index = self.vertices.len();
        self.vertices.push(VertexData {
            connection,
            out_edges: Vec::new(),
        });
        self.vertex_index.insert(connection, index);
        index
    }

    fn live_edge_index(&self, edge: Edge) -> Option<usize> {
        let slot = edge.slot()?;
        if slot.generation != self.generation {
            return None;
        }
        match self.edges.get(slot.index) {
            Some(Some(_)) => Some(slot.index),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
