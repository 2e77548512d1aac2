use cablepath_core::graph::{Connection, Edge, GraphImpl, Link};
use proptest::prelude::*;

fn link(a: i64, b: i64) -> Link {
    Link::new(Connection(a), Connection(b), 1, false)
}

fn ids(connections: &[Connection]) -> Vec<i64> {
    connections.iter().map(|c| c.id()).collect()
}

fn graph_of(pairs: &[(i64, i64)]) -> GraphImpl {
    let mut graph = GraphImpl::new();
    for &(a, b) in pairs {
        graph.add_edge(link(a, b));
    }
    graph
}

// ---------------------------------------------------------------------------
// Fixed scenarios
// ---------------------------------------------------------------------------

#[test]
fn chain_reaches_forward_only() {
    let graph = graph_of(&[(1, 2), (2, 3)]);

    let from_1 = graph.get_linked_connections(Connection(1)).expect("known");
    assert_eq!(ids(&from_1), vec![1, 2, 3]);

    let from_3 = graph.get_linked_connections(Connection(3)).expect("known");
    assert_eq!(ids(&from_3), vec![3]);
}

#[test]
fn complements_make_chain_walkable_backwards() {
    let mut graph = graph_of(&[(1, 2), (2, 3)]);
    graph.add_edge(link(1, 2).complement());
    graph.add_edge(link(2, 3).complement());

    let from_1 = graph.get_linked_connections(Connection(1)).expect("known");
    assert_eq!(ids(&from_1), vec![1, 2, 3]);

    let from_3 = graph.get_linked_connections(Connection(3)).expect("known");
    assert_eq!(ids(&from_3), vec![3, 2, 1]);
}

#[test]
fn disconnected_components_never_cross() {
    let graph = graph_of(&[(1, 2), (2, 3), (4, 5)]);

    let from_1 = graph.get_linked_connections(Connection(1)).expect("known");
    assert_eq!(ids(&from_1), vec![1, 2, 3]);

    let from_4 = graph.get_linked_connections(Connection(4)).expect("known");
    assert_eq!(ids(&from_4), vec![4, 5]);
}

#[test]
fn duplicate_link_keeps_one_edge() {
    let mut graph = GraphImpl::new();
    let first = graph.add_edge(link(1, 2));
    let second = graph.add_edge(link(1, 2));

    assert_eq!(first, second);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn cleared_graph_forgets_old_handles() {
    let mut graph = GraphImpl::new();
    let vertex = graph.add_vertex(Connection(1));
    let edge = graph.add_edge(link(1, 2));

    graph.clear();

    assert_eq!(graph.vertex_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.connection(vertex), None);
    assert_eq!(graph.link(edge), None);
    assert!(!graph.remove_edge(edge));

    // A fresh edge in the same slot is not reachable through the old handle.
    let fresh = graph.add_edge(link(1, 2));
    assert_ne!(fresh, edge);
    assert_eq!(graph.link(edge), None);
}

#[test]
fn null_handles_resolve_to_nothing() {
    let mut graph = graph_of(&[(1, 2)]);
    assert!(Edge::null().is_null());
    assert_eq!(graph.link(Edge::null()), None);
    assert!(!graph.remove_edge(Edge::null()));
    assert_eq!(graph.edge_count(), 1);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_pairs() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..20, 0i64..20), 0..60)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn vertex_insertion_is_idempotent(id in any::<i64>(), pairs in arb_pairs()) {
        let mut graph = graph_of(&pairs);
        let first = graph.add_vertex(Connection(id));
        let count = graph.vertex_count();
        let second = graph.add_vertex(Connection(id));

        prop_assert_eq!(first, second);
        prop_assert_eq!(graph.vertex_count(), count);
        prop_assert_eq!(graph.get_vertex_count(Connection(id)), 1);
    }

    #[test]
    fn edge_insertion_is_idempotent(a in 0i64..20, b in 0i64..20, pairs in arb_pairs()) {
        let mut graph = graph_of(&pairs);
        let first = graph.add_edge(link(a, b));
        let (vertices, edges) = (graph.vertex_count(), graph.edge_count());
        let second = graph.add_edge(link(a, b));

        prop_assert_eq!(first, second);
        prop_assert_eq!(graph.vertex_count(), vertices);
        prop_assert_eq!(graph.edge_count(), edges);
    }

    #[test]
    fn edge_insertion_adds_only_missing_vertices(a in 0i64..40, b in 0i64..40, pairs in arb_pairs()) {
        let mut graph = graph_of(&pairs);
        let before = graph.vertex_count();
        let mut missing = usize::from(!graph.contains(Connection(a)));
        if a != b && !graph.contains(Connection(b)) {
            missing += 1;
        }

        graph.add_edge(link(a, b));
        prop_assert_eq!(graph.vertex_count(), before + missing);
    }

    #[test]
    fn removal_preserves_vertices(pairs in arb_pairs(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!pairs.is_empty());
        let mut graph = graph_of(&pairs);
        let (a, b) = pairs[pick.index(pairs.len())];
        let edge = graph.find_edge(Connection(a), Connection(b)).expect("inserted");
        let (vertices, edges) = (graph.vertex_count(), graph.edge_count());

        prop_assert!(graph.remove_edge(edge));
        prop_assert_eq!(graph.vertex_count(), vertices);
        prop_assert_eq!(graph.edge_count(), edges - 1);
        prop_assert!(graph.find_edge(Connection(a), Connection(b)).is_none());
        prop_assert!(!graph.remove_edge(edge));
    }

    #[test]
    fn clear_resets_counts(pairs in arb_pairs()) {
        let mut graph = graph_of(&pairs);
        graph.clear();
        prop_assert_eq!(graph.vertex_count(), 0);
        prop_assert_eq!(graph.edge_count(), 0);
        prop_assert_eq!(graph.connections().count(), 0);
    }

    #[test]
    fn reachable_set_starts_with_origin_and_has_no_duplicates(pairs in arb_pairs()) {
        prop_assume!(!pairs.is_empty());
        let graph = graph_of(&pairs);
        let origin = Connection(pairs[0].0);
        let reached = graph.get_linked_connections(origin).expect("known");

        prop_assert_eq!(reached[0], origin);
        let mut sorted = reached.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), reached.len());
    }
}
