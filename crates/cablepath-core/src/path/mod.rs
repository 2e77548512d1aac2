//! Link-list loading and connectivity queries.
//!
//! # Overview
//!
//! [`PathGraph`] owns one [`GraphImpl`] for the duration of a loaded link
//! list. Loading always starts from an empty graph: every record becomes a
//! directed edge, and bidirectional records also get a complement edge in
//! the opposite direction.
//!
//! ## Pipeline
//!
//! ```text
//! LinkSource (SQL view, in-memory list, …)
//!        ↓  PathGraph::load_from_source() / load_link_list()
//! GraphImpl (normal + complement edges)
//!        ↓  get_linked_connection_id_list()  → Vec<Connection>
//!        ↓  get_linked_connector_id_list()   → Vec<ConnectorId>  (via ConnectorDirectory)
//!        ↓  shortest_path() / visited_links() / to_dot()
//! ```
//!
//! ## Atomic Loads
//!
//! A record with a missing endpoint rejects the whole load and leaves the
//! graph empty. Callers never observe a half-populated graph.

pub mod connector;
pub mod source;

use std::collections::{HashMap, HashSet};

use anyhow::Context;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use tracing::{debug, instrument, trace, warn};

use crate::error::ErrorCode;
use crate::graph::{Connection, Edge, GraphError, GraphImpl, Link, ShortestPath};

pub use connector::{ConnectorDirectory, ConnectorId, MemoryConnectorDirectory};
pub use source::{Endpoint, LinkDirection, LinkRecord, LinkSource};

/// Weight given to loaded links when none is configured.
pub const DEFAULT_LINK_WEIGHT: u32 = 1;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading or querying a [`PathGraph`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathGraphError {
    /// A link record is missing an endpoint id. The load was rejected.
    #[error("cannot load link list: row {row} has no {missing} connection id")]
    MalformedRecord { row: usize, missing: Endpoint },

    /// The connector directory could not answer a membership lookup.
    #[error("connector lookup failed: {0}")]
    ConnectorLookup(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl PathGraphError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedRecord { .. } => ErrorCode::MalformedLinkRecord,
            Self::ConnectorLookup(_) => ErrorCode::ConnectorLookupFailed,
            Self::Graph(GraphError::UnknownConnection(_)) => ErrorCode::ConnectionNotFound,
        }
    }
}

// ---------------------------------------------------------------------------
// LoadSummary
// ---------------------------------------------------------------------------

/// Counts reported after a successful load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Records read from the source.
    pub records: usize,
    /// Records that produced a complement edge.
    pub bidirectional: usize,
    pub vertices: usize,
    pub edges: usize,
}

// ---------------------------------------------------------------------------
// PathGraph
// ---------------------------------------------------------------------------

/// Connection graph loaded from a link list.
#[derive(Debug, Clone)]
pub struct PathGraph {
    graph: GraphImpl,
    link_weight: u32,
}

impl Default for PathGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl PathGraph {
    /// Create an empty path graph using [`DEFAULT_LINK_WEIGHT`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: GraphImpl::new(),
            link_weight: DEFAULT_LINK_WEIGHT,
        }
    }

    /// Use `weight` for every link added by subsequent loads.
    #[must_use]
    pub fn with_link_weight(mut self, weight: u32) -> Self {
        self.link_weight = weight;
        self
    }

    /// Read access to the underlying graph.
    #[must_use]
    pub const fn graph(&self) -> &GraphImpl {
        &self.graph
    }

    /// Drop every vertex and edge.
    pub fn clear(&mut self) {
        self.graph.clear();
    }

    // -- loading ------------------------------------------------------------

    /// Rebuild the graph from `records`.
    ///
    /// Previous content is discarded first. Each record adds a start→end
    /// edge; bidirectional records also add the complement end→start edge.
    ///
    /// # Errors
    ///
    /// Returns [`PathGraphError::MalformedRecord`] for the first record with
    /// a missing endpoint. The graph is then left empty.
    #[instrument(skip_all)]
    pub fn load_link_list<I>(&mut self, records: I) -> Result<LoadSummary, PathGraphError>
    where
        I: IntoIterator<Item = LinkRecord>,
    {
        self.graph.clear();

        let mut summary = LoadSummary::default();
        for (row, record) in records.into_iter().enumerate() {
            let (start, end) = match record.endpoints(row) {
                Ok(endpoints) => endpoints,
                Err(err) => {
                    warn!(row, error = %err, "rejecting link list");
                    self.graph.clear();
                    return Err(err);
                }
            };
            let bidirectional = record.direction.is_bidirectional();
            trace!(row, %start, %end, bidirectional, "adding link");

            self.add_link(start, end, bidirectional, self.link_weight);
            summary.records += 1;
            if bidirectional {
                summary.bidirectional += 1;
            }
        }

        summary.vertices = self.graph.vertex_count();
        summary.edges = self.graph.edge_count();
        debug!(
            records = summary.records,
            vertices = summary.vertices,
            edges = summary.edges,
            "link list loaded"
        );
        Ok(summary)
    }

    /// Fetch records from `source` and rebuild the graph from them.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read (the graph is left
    /// empty) or if a record is malformed (see [`Self::load_link_list`]).
    pub fn load_from_source<S>(&mut self, source: &S) -> anyhow::Result<LoadSummary>
    where
        S: LinkSource + ?Sized,
    {
        self.graph.clear();
        let records = source
            .link_records()
            .context("cannot load link list from source")?;
        Ok(self.load_link_list(records)?)
    }

    /// Add one physical link.
    ///
    /// Returns the handle of the start→end edge. When `bidirectional` is
    /// set, the complement end→start edge is added as well.
    pub fn add_link(&mut self, start: Connection, end: Connection, bidirectional: bool, weight: u32) -> Edge {
        let link = Link::new(start, end, weight, false);
        let edge = self.graph.add_edge(link);
        if bidirectional {
            self.graph.add_edge(link.complement());
        }
        edge
    }

    /// Returns `true` if `connection` appears in the loaded link list.
    #[must_use]
    pub fn connection_exists(&self, connection: Connection) -> bool {
        self.graph.contains(connection)
    }

    // -- queries ------------------------------------------------------------

    /// Connections linked to `from`, excluding `from` itself, in
    /// breadth-first discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`PathGraphError::Graph`] if `from` is not in the graph.
    pub fn get_linked_connection_id_list(&self, from: Connection) -> Result<Vec<Connection>, PathGraphError> {
        let reachable = self.graph.get_linked_connections(from)?;
        Ok(reachable.into_iter().skip(1).collect())
    }

    /// Connectors linked to any connection of `from_connector`.
    ///
    /// Member connections listed in `ignore` are skipped, as are members
    /// that do not appear in the link list. Linked connections without a
    /// connector are dropped. Each connector appears once, in first-seen
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`PathGraphError::ConnectorLookup`] if a directory lookup
    /// fails.
    #[instrument(skip(self, ignore, directory))]
    pub fn get_linked_connector_id_list<D>(
        &self,
        from_connector: ConnectorId,
        ignore: &[Connection],
        directory: &D,
    ) -> Result<Vec<ConnectorId>, PathGraphError>
    where
        D: ConnectorDirectory + ?Sized,
    {
        let members = directory
            .connections_of_connector(from_connector)
            .map_err(|err| {
                PathGraphError::ConnectorLookup(format!("connections of connector {from_connector}: {err:#}"))
            })?;
        let ignore: HashSet<Connection> = ignore.iter().copied().collect();

        let mut seen: HashSet<ConnectorId> = HashSet::new();
        let mut connectors = Vec::new();

        for member in members.into_iter().filter(|c| !ignore.contains(c)) {
            if !self.connection_exists(member) {
                debug!(%member, "connector member has no links");
                continue;
            }
            for linked in self.get_linked_connection_id_list(member)? {
                let owner = directory.connector_of_connection(linked).map_err(|err| {
                    PathGraphError::ConnectorLookup(format!("connector of connection {linked}: {err:#}"))
                })?;
                if let Some(connector) = owner {
                    if seen.insert(connector) {
                        connectors.push(connector);
                    }
                }
            }
        }

        Ok(connectors)
    }

    /// Minimum-weight route from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`PathGraphError::Graph`] if either connection is unknown.
    pub fn shortest_path(&self, from: Connection, to: Connection) -> Result<Option<ShortestPath>, PathGraphError> {
        Ok(self.graph.shortest_path(from, to)?)
    }

    /// Physical links reached from `from`, in breadth-first examination
    /// order. Complement edges are left out so each wire appears once.
    ///
    /// # Errors
    ///
    /// Returns [`PathGraphError::Graph`] if `from` is not in the graph.
    pub fn visited_links(&self, from: Connection) -> Result<Vec<Link>, PathGraphError> {
        let links = self.graph.visited_links(from)?;
        Ok(links.into_iter().filter(|l| !l.is_complement).collect())
    }

    /// Graphviz DOT text of the links reached from `from`.
    ///
    /// Nodes are labelled with connection ids, edges with link weights.
    ///
    /// # Errors
    ///
    /// Returns [`PathGraphError::Graph`] if `from` is not in the graph.
    pub fn to_dot(&self, from: Connection) -> Result<String, PathGraphError> {
        let links = self.visited_links(from)?;

        let mut drawing: DiGraph<Connection, u32> = DiGraph::new();
        let mut nodes: HashMap<Connection, NodeIndex> = HashMap::new();
        nodes.insert(from, drawing.add_node(from));

        for link in links {
            let start = *nodes
                .entry(link.start)
                .or_insert_with(|| drawing.add_node(link.start));
            let end = *nodes
                .entry(link.end)
                .or_insert_with(|| drawing.add_node(link.end));
            drawing.add_edge(start, end, link.weight);
        }

        Ok(Dot::new(&drawing).to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ste(a: i64, b: i64) -> LinkRecord {
        LinkRecord::new(a, b, LinkDirection::StartToEnd)
    }

    fn bid(a: i64, b: i64) -> LinkRecord {
        LinkRecord::new(a, b, LinkDirection::Bidirectional)
    }

    fn ids(connections: &[Connection]) -> Vec<i64> {
        connections.iter().map(|c| c.id()).collect()
    }

    #[test]
    fn linked_connections_exclude_start() {
        let mut pg = PathGraph::new();
        pg.load_link_list([ste(1, 2), ste(2, 3)]).expect("load");

        let linked = pg.get_linked_connection_id_list(Connection(1)).expect("query");
        assert_eq!(ids(&linked), vec![2, 3]);

        // Lower-level primitive still includes the start.
        let raw = pg.graph().get_linked_connections(Connection(1)).expect("query");
        assert_eq!(ids(&raw), vec![1, 2, 3]);
    }

    #[test]
    fn bidirectional_records_add_complements() {
        let mut pg = PathGraph::new();
        let summary = pg.load_link_list([bid(1, 2), ste(2, 3)]).expect("load");

        assert_eq!(summary.records, 2);
        assert_eq!(summary.bidirectional, 1);
        assert_eq!(summary.vertices, 3);
        assert_eq!(summary.edges, 3);

        let complement = pg
            .graph()
            .find_edge(Connection(2), Connection(1))
            .and_then(|e| pg.graph().link(e))
            .expect("complement edge");
        assert!(complement.is_complement);

        let from_3 = pg.get_linked_connection_id_list(Connection(3)).expect("query");
        assert!(from_3.is_empty(), "3 -> 2 is one-way");
        let from_2 = pg.get_linked_connection_id_list(Connection(2)).expect("query");
        assert_eq!(ids(&from_2), vec![1, 3]);
    }

    #[test]
    fn end_to_start_is_loaded_as_single_edge() {
        let mut pg = PathGraph::new();
        pg.load_link_list([LinkRecord::new(1, 2, LinkDirection::EndToStart)])
            .expect("load");
        assert_eq!(pg.graph().edge_count(), 1);
        assert!(pg.graph().find_edge(Connection(1), Connection(2)).is_some());
    }

    #[test]
    fn malformed_record_leaves_graph_empty() {
        let mut pg = PathGraph::new();
        pg.load_link_list([ste(7, 8)]).expect("first load");

        let bad = LinkRecord {
            start: Some(3),
            end: None,
            direction: LinkDirection::StartToEnd,
        };
        let err = pg
            .load_link_list([ste(1, 2), bad, ste(4, 5)])
            .expect_err("row 1 is malformed");

        assert_eq!(
            err,
            PathGraphError::MalformedRecord {
                row: 1,
                missing: Endpoint::End
            }
        );
        assert_eq!(err.code(), ErrorCode::MalformedLinkRecord);
        assert_eq!(pg.graph().vertex_count(), 0);
        assert_eq!(pg.graph().edge_count(), 0);
        assert!(!pg.connection_exists(Connection(7)));
    }

    #[test]
    fn reload_replaces_previous_graph() {
        let mut pg = PathGraph::new();
        pg.load_link_list([ste(1, 2)]).expect("load");
        pg.load_link_list([ste(3, 4)]).expect("reload");

        assert!(!pg.connection_exists(Connection(1)));
        assert!(pg.connection_exists(Connection(3)));
        assert_eq!(pg.graph().edge_count(), 1);
    }

    #[test]
    fn unknown_connection_query_is_error() {
        let pg = PathGraph::new();
        let err = pg
            .get_linked_connection_id_list(Connection(5))
            .expect_err("empty graph");
        assert_eq!(err, PathGraphError::Graph(GraphError::UnknownConnection(Connection(5))));
        assert_eq!(err.code(), ErrorCode::ConnectionNotFound);
    }

    #[test]
    fn configured_weight_applies_to_loaded_links() {
        let mut pg = PathGraph::new().with_link_weight(4);
        pg.load_link_list([ste(1, 2)]).expect("load");
        let link = pg.graph().links().next().expect("one link");
        assert_eq!(link.weight, 4);
    }

    #[test]
    fn source_failure_is_reported_and_graph_cleared() {
        struct Broken;
        impl LinkSource for Broken {
            fn link_records(&self) -> anyhow::Result<Vec<LinkRecord>> {
                anyhow::bail!("view missing")
            }
        }

        let mut pg = PathGraph::new();
        pg.load_link_list([ste(1, 2)]).expect("load");

        let err = pg.load_from_source(&Broken).expect_err("source fails");
        assert!(format!("{err:#}").contains("view missing"));
        assert_eq!(pg.graph().vertex_count(), 0);
    }

    #[test]
    fn malformed_record_from_source_keeps_typed_error() {
        let records = vec![LinkRecord {
            start: None,
            end: Some(1),
            direction: LinkDirection::Unknown,
        }];
        let mut pg = PathGraph::new();
        let err = pg.load_from_source(&records).expect_err("malformed");
        let typed = err.downcast_ref::<PathGraphError>().expect("typed error");
        assert_eq!(typed.code(), ErrorCode::MalformedLinkRecord);
    }

    #[test]
    fn failing_directory_is_typed_error() {
        struct Offline;
        impl ConnectorDirectory for Offline {
            fn connections_of_connector(&self, _: ConnectorId) -> anyhow::Result<Vec<Connection>> {
                anyhow::bail!("table missing")
            }
            fn connector_of_connection(&self, _: Connection) -> anyhow::Result<Option<ConnectorId>> {
                Ok(None)
            }
        }

        let mut pg = PathGraph::new();
        pg.load_link_list([bid(1, 2)]).expect("load");
        let err = pg
            .get_linked_connector_id_list(ConnectorId(1), &[], &Offline)
            .expect_err("directory offline");
        assert_eq!(err.code(), ErrorCode::ConnectorLookupFailed);
        assert!(err.to_string().contains("table missing"));
    }

    #[test]
    fn visited_links_skip_complements() {
        let mut pg = PathGraph::new();
        pg.load_link_list([bid(1, 2), bid(2, 3)]).expect("load");

        let from_3: Vec<(i64, i64)> = pg
            .visited_links(Connection(3))
            .expect("query")
            .iter()
            .map(|l| (l.start.id(), l.end.id()))
            .collect();
        // Walk from 3 reaches 2 then 1 via complements; only the two
        // physical wires are reported.
        assert_eq!(from_3, vec![(2, 3), (1, 2)]);
    }

    #[test]
    fn dot_output_lists_reached_connections() {
        let mut pg = PathGraph::new();
        pg.load_link_list([bid(1, 2), ste(2, 3), ste(8, 9)]).expect("load");

        let dot = pg.to_dot(Connection(1)).expect("dot");
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("label = \"3\""));
        assert!(!dot.contains("label = \"9\""));
        assert_eq!(dot.matches("->").count(), 2);
    }

    #[test]
    fn dot_edges_carry_link_weight() {
        let mut pg = PathGraph::new();
        pg.add_link(Connection(1), Connection(2), false, 7);

        let dot = pg.to_dot(Connection(1)).expect("dot");
        assert!(dot.contains("0 -> 1 [ label = \"7\" ]"), "{dot}");
    }

    #[test]
    fn one_way_record_after_bidirectional_is_reported() {
        let mut pg = PathGraph::new();
        pg.load_link_list([bid(1, 2), ste(2, 1)]).expect("load");
        assert_eq!(pg.graph().edge_count(), 2);

        let from_1: Vec<(i64, i64)> = pg
            .visited_links(Connection(1))
            .expect("query")
            .iter()
            .map(|l| (l.start.id(), l.end.id()))
            .collect();
        assert_eq!(from_1, vec![(1, 2), (2, 1)]);
        assert_eq!(pg.to_dot(Connection(1)).expect("dot").matches("->").count(), 2);
    }

    #[test]
    fn shortest_path_through_facade() {
        let mut pg = PathGraph::new();
        pg.load_link_list([bid(1, 2), bid(2, 3)]).expect("load");

        let path = pg
            .shortest_path(Connection(3), Connection(1))
            .expect("known")
            .expect("reachable through complements");
        assert_eq!(ids(&path.connections), vec![3, 2, 1]);
        assert_eq!(path.cost, 2);
    }
}
