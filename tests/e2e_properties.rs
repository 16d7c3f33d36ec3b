//! Property tests for graph-core invariants over random edge lists.

use std::collections::HashSet;

use proptest::prelude::*;
use social_graph::{restore, snapshot, Digraph, DirectGraph, Relationship, SocialGraph, User, UserId, VertexRef};

fn build(n: u32, links: &[(u32, u32)]) -> (SocialGraph, Vec<VertexRef>) {
    let mut g = DirectGraph::new();
    let refs: Vec<VertexRef> = (0..n)
        .map(|i| g.insert_vertex(User::new(UserId(i), format!("u{i}"))).unwrap())
        .collect();
    for &(a, b) in links {
        g.insert_edge(refs[(a % n) as usize], refs[(b % n) as usize], Relationship::Simple)
            .unwrap();
    }
    (g, refs)
}

fn links() -> impl Strategy<Value = (u32, Vec<(u32, u32)>)> {
    (1u32..12).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..40)))
}

proptest! {
    #[test]
    fn edge_count_matches_distinct_pairs((n, pairs) in links()) {
        let (g, _) = build(n, &pairs);
        let distinct: HashSet<_> = pairs.iter().copied().collect();
        prop_assert_eq!(g.edge_count(), distinct.len());
    }

    #[test]
    fn every_edge_is_outbound_at_source_and_incident_at_target((n, pairs) in links()) {
        let (g, _) = build(n, &pairs);
        for e in g.edges() {
            let (s, t) = g.endpoints(e).unwrap();
            prop_assert!(g.outbound_edges(s).unwrap().contains(&e));
            prop_assert!(g.incident_edges(t).unwrap().contains(&e));
            if s != t {
                prop_assert!(!g.outbound_edges(t).unwrap().contains(&e));
            }
        }
    }

    #[test]
    fn removing_a_vertex_drops_exactly_its_edges((n, pairs) in links(), victim in 0u32..12) {
        let (mut g, refs) = build(n, &pairs);
        let v = refs[(victim % n) as usize];
        let touching: HashSet<_> = g.outbound_edges(v).unwrap().into_iter()
            .chain(g.incident_edges(v).unwrap())
            .collect();
        let before = g.edge_count();

        g.remove_vertex(v).unwrap();
        prop_assert_eq!(g.edge_count(), before - touching.len());
        prop_assert_eq!(g.vertex_count(), n as usize - 1);
        for e in touching {
            prop_assert!(g.payload(e).is_err());
        }
    }

    #[test]
    fn shortest_path_is_a_chain_of_edges((n, pairs) in links(), from in 0u32..12, to in 0u32..12) {
        let (g, refs) = build(n, &pairs);
        let (a, b) = (refs[(from % n) as usize], refs[(to % n) as usize]);
        match g.shortest_path(a, b) {
            Ok(path) => {
                prop_assert_eq!(path.vertices.len(), path.cost + 1);
                prop_assert_eq!(path.hops(), path.cost);
                prop_assert_eq!(path.start(), Some(a));
                prop_assert_eq!(path.end(), Some(b));
                for hop in path.vertices.windows(2) {
                    let linked = g.outbound_edges(hop[0]).unwrap().into_iter()
                        .any(|e| g.endpoints(e).unwrap().1 == hop[1]);
                    prop_assert!(linked);
                }
            }
            Err(err) => prop_assert!(err.is_no_path()),
        }
    }

    #[test]
    fn snapshot_round_trip_keeps_counts((n, pairs) in links()) {
        let (g, _) = build(n, &pairs);
        let restored = restore(&snapshot(&g).unwrap()).unwrap();
        prop_assert_eq!(restored.vertex_count(), g.vertex_count());
        prop_assert_eq!(restored.edge_count(), g.edge_count());
    }
}
