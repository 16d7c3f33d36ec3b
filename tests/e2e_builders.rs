//! End-to-end tests for graph construction through `SocialNetwork`.
//!
//! Covers the total and iterative strategies, indirect annotation, the
//! event sink, and the statistics facade on the resulting graphs.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use social_graph::stats;
use social_graph::{
    Dataset, Digraph, Error, Interest, InterestId, MemorySink, NetworkEvent, Relationship,
    RelationshipKind, SocialNetwork, Tag, UserId,
};

// ============================================================================
// Helper: six users.
//
//   1 → 2, 1 → 3, 2 → 4, 3 → 4, 4 → 5       (6 has no relations)
//   chess: 1, 4, 6    jazz: 2, 4    golf: 1, 2
// ============================================================================

fn dataset() -> Dataset {
    Dataset::new()
        .with_user(UserId(1), "Ana")
        .with_user(UserId(2), "Rui")
        .with_user(UserId(3), "Eva")
        .with_user(UserId(4), "Ivo")
        .with_user(UserId(5), "Lia")
        .with_user(UserId(6), "Tom")
        .with_relation(UserId(1), UserId(2))
        .with_relation(UserId(1), UserId(3))
        .with_relation(UserId(2), UserId(4))
        .with_relation(UserId(3), UserId(4))
        .with_relation(UserId(4), UserId(5))
        .with_interest(Interest::new(InterestId(1), "chess").with_members([UserId(1), UserId(4), UserId(6)]))
        .with_interest(Interest::new(InterestId(2), "jazz").with_members([UserId(2), UserId(4)]))
        .with_interest(Interest::new(InterestId(3), "golf").with_members([UserId(1), UserId(2)]))
}

fn payload_between(net: &SocialNetwork, from: u32, to: u32) -> Option<Relationship> {
    let g = net.graph();
    let a = g.find_vertex(&UserId(from))?;
    let b = g.find_vertex(&UserId(to))?;
    g.outbound_edges(a)
        .ok()?
        .into_iter()
        .find(|&e| g.endpoints(e).map(|(_, t)| t == b).unwrap_or(false))
        .and_then(|e| g.payload(e).ok().cloned())
}

// ============================================================================
// 1. Total strategy
// ============================================================================

#[test]
fn test_total_build_materializes_everything() {
    let mut net = SocialNetwork::new(dataset());
    net.build_total().unwrap();

    assert_eq!(net.graph().vertex_count(), 6);
    assert_eq!(net.graph().edge_count(), 5);
    assert_eq!(
        payload_between(&net, 1, 2),
        Some(Relationship::Indirect([InterestId(3)].into_iter().collect()))
    );
    assert_eq!(
        payload_between(&net, 2, 4),
        Some(Relationship::Indirect([InterestId(2)].into_iter().collect()))
    );
    assert_eq!(payload_between(&net, 1, 3), Some(Relationship::Simple));
    assert_eq!(payload_between(&net, 2, 1), None);

    let route = net.shortest_path(UserId(1), UserId(5)).unwrap();
    assert_eq!(route.cost, 3);
    assert_eq!(route.users.first().map(|u| u.id), Some(UserId(1)));
    assert_eq!(route.users.last().map(|u| u.id), Some(UserId(5)));

    assert!(net.shortest_path(UserId(1), UserId(6)).unwrap_err().is_no_path());
}

#[test]
fn test_total_build_twice_fails_fast() {
    let mut net = SocialNetwork::new(dataset());
    net.build_total().unwrap();

    let err = net.build_total().unwrap_err();
    assert!(matches!(err, Error::DuplicateVertex(_)));
    assert_eq!(net.graph().vertex_count(), 6);
    assert_eq!(net.graph().edge_count(), 5);
}

// ============================================================================
// 2. Iterative strategy
// ============================================================================

#[test]
fn test_iterative_growth() {
    let mut net = SocialNetwork::new(dataset());

    let first = net.expand_from(UserId(1)).unwrap();
    assert_eq!(first.included, vec![UserId(2), UserId(3)]);
    assert_eq!(net.graph().vertex_count(), 3);
    assert_eq!(net.graph().edge_count(), 2);

    // 4 is expanded directly; 3 → 4 does not exist until 3 itself is expanded
    net.expand_from(UserId(4)).unwrap();
    assert_eq!(net.graph().vertex_count(), 5);
    assert!(payload_between(&net, 4, 5).is_some());
    assert!(payload_between(&net, 3, 4).is_none());

    let missing: Vec<UserId> = net.users_not_inserted().iter().map(|u| u.id).collect();
    assert_eq!(missing, vec![UserId(6)]);
}

#[test]
fn test_iterative_expansion_is_idempotent() {
    let mut net = SocialNetwork::new(dataset());
    net.expand_from(UserId(1)).unwrap();
    net.expand_from(UserId(4)).unwrap();
    let before = (net.graph().vertex_count(), net.graph().edge_count());

    net.expand_from(UserId(4)).unwrap();
    assert_eq!((net.graph().vertex_count(), net.graph().edge_count()), before);
}

#[test]
fn test_promotion_lifecycle() {
    let mut net = SocialNetwork::new(dataset());
    net.expand_from(UserId(1)).unwrap();

    let tag = |net: &SocialNetwork, id: u32| {
        let g = net.graph();
        g.element(g.find_vertex(&UserId(id)).unwrap()).unwrap().tag
    };
    assert_eq!(tag(&net, 3), Tag::Included);

    let promoted = net.expand_from(UserId(3)).unwrap();
    assert!(promoted.promoted);
    assert_eq!(tag(&net, 3), Tag::Added);
    assert!(net.graph().find_vertex(&UserId(4)).is_none());

    let expanded = net.expand_from(UserId(3)).unwrap();
    assert!(!expanded.promoted);
    assert_eq!(expanded.included, vec![UserId(4)]);
}

#[test]
fn test_indirect_relationships_only_add_edges() {
    let mut net = SocialNetwork::new(dataset());
    net.build_total().unwrap();

    // 1 and 4: undeclared, share chess. 1 and 6: undeclared, share chess.
    let linked = net.add_indirect_relationships(UserId(1)).unwrap();
    assert_eq!(linked, 2);
    assert_eq!(net.graph().vertex_count(), 6);
    assert_eq!(net.graph().edge_count(), 7);

    let chess = Relationship::Indirect([InterestId(1)].into_iter().collect());
    assert_eq!(payload_between(&net, 1, 4), Some(chess.clone()));
    assert_eq!(payload_between(&net, 1, 6), Some(chess));
    // declared edges keep their payload
    assert_eq!(payload_between(&net, 1, 3), Some(Relationship::Simple));

    // the new edges open a shortcut
    assert_eq!(net.shortest_path(UserId(1), UserId(5)).unwrap().cost, 2);
}

// ============================================================================
// 3. Events
// ============================================================================

#[test]
fn test_events_reach_the_sink() {
    let sink = Arc::new(MemorySink::new());
    let mut net = SocialNetwork::new(dataset()).with_sink(Arc::clone(&sink));

    net.expand_from(UserId(2)).unwrap();
    net.add_indirect_relationships(UserId(2)).unwrap();

    let events = sink.events();
    assert!(events.contains(&NetworkEvent::UserIncluded { by: UserId(2), user: UserId(4) }));
    assert!(events.contains(&NetworkEvent::DirectRelationship { from: UserId(2), to: UserId(4), shared: 1 }));
    assert!(events.contains(&NetworkEvent::InterestRecorded { user: UserId(2), interest: InterestId(3) }));
    assert!(!events.iter().any(|e| matches!(e, NetworkEvent::IndirectRelationship { .. })));
}

// ============================================================================
// 4. Statistics
// ============================================================================

#[test]
fn test_statistics_after_iterative_build() {
    let mut net = SocialNetwork::new(dataset());
    net.expand_from(UserId(1)).unwrap();
    net.expand_from(UserId(2)).unwrap();
    net.expand_from(UserId(2)).unwrap();

    let g = net.graph();
    assert_eq!(stats::added_count(g).unwrap(), 2);
    assert_eq!(stats::included_count(g).unwrap(), 2);

    let groups = stats::included_by_added(g).unwrap();
    assert_eq!(groups[&UserId(1)], vec![UserId(3)]);
    assert_eq!(groups[&UserId(2)], vec![UserId(4)]);

    assert_eq!(stats::most_out_degree(g).unwrap(), Some((UserId(1), 2)));
    assert_eq!(stats::most_shared_interest(g).unwrap(), Some((InterestId(2), 1)));

    let summary = net.summary().unwrap();
    assert_eq!(summary.users, 4);
    assert_eq!(summary.relationships, 3);
}

#[test]
fn test_relationship_kinds_for_presentation() {
    let mut net = SocialNetwork::new(dataset());
    net.build_total().unwrap();

    let g = net.graph();
    let mut kinds: Vec<RelationshipKind> = g.edges().into_iter().map(|e| g.payload(e).unwrap().kind()).collect();
    kinds.sort_by_key(|k| matches!(k, RelationshipKind::Indirect));
    assert_eq!(
        kinds,
        vec![
            RelationshipKind::Simple,
            RelationshipKind::Simple,
            RelationshipKind::Simple,
            RelationshipKind::Indirect,
            RelationshipKind::Indirect,
        ]
    );
}
