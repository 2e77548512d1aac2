//! Breadth-first reachability and weighted shortest paths.
//!
//! # Algorithm
//!
//! [`breadth_first`] is a plain FIFO-queue BFS with a visited set indexed by
//! vertex slot. Each vertex is enqueued at most once, so the walk is
//! O(V + E) over the reachable part of the graph. Traversal order is fully
//! determined by edge insertion order: out-edges are examined in the order
//! they were added.
//!
//! While walking, every examined edge is recorded (including edges leading
//! back to already discovered vertices). That edge list is what path
//! projections consume: they keep the non-complement links so each physical
//! wire is reported once.
//!
//! [`shortest_path`] projects the graph into a [`petgraph`] `DiGraph` and runs
//! A* with a zero heuristic, which is Dijkstra over the `u32` link weights.

use std::collections::VecDeque;

use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;

use super::engine::{GraphError, GraphImpl};
use super::types::{Connection, Link};

// ---------------------------------------------------------------------------
// BFS
// ---------------------------------------------------------------------------

/// Result of a breadth-first walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsWalk {
    /// Discovered connections, start first, each at most once.
    pub connections: Vec<Connection>,
    /// Every examined link, in examination order.
    pub links: Vec<Link>,
}

/// Walk the graph breadth-first from `start`.
///
/// # Errors
///
/// Returns [`GraphError::UnknownConnection`] if `start` has no vertex.
pub fn breadth_first(graph: &GraphImpl, start: Connection) -> Result<BfsWalk, GraphError> {
    let Some(root) = graph.vertex_slot(start) else {
        return Err(GraphError::UnknownConnection(start));
    };

    let mut visited = vec![false; graph.vertex_count()];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut connections = vec![start];
    let mut links = Vec::new();

    visited[root] = true;
    queue.push_back(root);

    while let Some(current) = queue.pop_front() {
        for (link, next) in graph.out_edges_of(current) {
            links.push(link);
            if !visited[next] {
                visited[next] = true;
                connections.push(graph.vertex_connection(next));
                queue.push_back(next);
            }
        }
    }

    Ok(BfsWalk { connections, links })
}

// ---------------------------------------------------------------------------
// petgraph projection
// ---------------------------------------------------------------------------

/// Project `graph` into a petgraph `DiGraph`.
///
/// Node `i` of the projection is vertex slot `i` of `graph`, so the node
/// index of a connection is stable for a given graph state.
#[must_use]
pub fn to_petgraph(graph: &GraphImpl) -> DiGraph<Connection, Link> {
    let mut projection = DiGraph::with_capacity(graph.vertex_count(), graph.edge_count());
    for connection in graph.connections() {
        projection.add_node(connection);
    }
    for (start, end, link) in graph.edge_slots() {
        projection.add_edge(NodeIndex::new(start), NodeIndex::new(end), link);
    }
    projection
}

// ---------------------------------------------------------------------------
// Shortest path
// ---------------------------------------------------------------------------

/// A minimum-weight route between two connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPath {
    /// Sum of link weights along the route.
    pub cost: u64,
    /// Connections from source to destination, both included.
    pub connections: Vec<Connection>,
}

/// Find the minimum-weight directed route from `from` to `to`.
///
/// Returns `Ok(None)` when `to` is not reachable from `from`. A route from a
/// connection to itself has cost 0 and a single element.
///
/// # Errors
///
/// Returns [`GraphError::UnknownConnection`] if either endpoint has no vertex.
pub fn shortest_path(
    graph: &GraphImpl,
    from: Connection,
    to: Connection,
) -> Result<Option<ShortestPath>, GraphError> {
    let source = graph
        .vertex_slot(from)
        .ok_or(GraphError::UnknownConnection(from))?;
    let target = graph
        .vertex_slot(to)
        .ok_or(GraphError::UnknownConnection(to))?;

    let projection = to_petgraph(graph);
    let goal = NodeIndex::new(target);

    let route = astar(
        &projection,
        NodeIndex::new(source),
        |n| n == goal,
        |e| u64::from(e.weight().weight),
        |_| 0,
    );

    Ok(route.map(|(cost, nodes)| ShortestPath {
        cost,
        connections: nodes.into_iter().map(|n| projection[n]).collect(),
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
