//! Snapshot / restore and undo history.
//!
//! A snapshot is an opaque byte image of the whole graph. The only promise
//! is that `restore(snapshot(g))` yields the same users (with their tags)
//! and the same `(source, target, payload)` edges. Handles are not
//! preserved: the restored graph is a new instance.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::Digraph;
use crate::model::{Relationship, User, UserId};
use crate::{Error, Result, SocialGraph};

#[derive(Debug, Serialize, Deserialize)]
struct GraphImage {
    users: Vec<User>,
    relationships: Vec<EdgeImage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EdgeImage {
    source: UserId,
    target: UserId,
    relationship: Relationship,
}

pub fn snapshot<G>(graph: &G) -> Result<Vec<u8>>
where
    G: Digraph<User, Relationship>,
{
    let mut users = Vec::with_capacity(graph.vertex_count());
    for v in graph.vertices() {
        users.push(graph.element(v)?.clone());
    }
    users.sort_by_key(|u| u.id);

    let mut relationships = Vec::with_capacity(graph.edge_count());
    for e in graph.edges() {
        let (source, target) = graph.endpoints(e)?;
        relationships.push(EdgeImage {
            source: graph.element(source)?.id,
            target: graph.element(target)?.id,
            relationship: graph.payload(e)?.clone(),
        });
    }
    relationships.sort_by_key(|r| (r.source, r.target));

    Ok(serde_json::to_vec(&GraphImage { users, relationships })?)
}

pub fn restore(bytes: &[u8]) -> Result<SocialGraph> {
    let image: GraphImage = serde_json::from_slice(bytes)?;
    let mut graph = SocialGraph::with_capacity(image.users.len(), image.relationships.len());

    for user in image.users {
        graph.insert_vertex(user)?;
    }
    for edge in image.relationships {
        let source = graph
            .find_vertex(&edge.source)
            .ok_or_else(|| Error::InvalidVertex(format!("snapshot edge source {} is missing", edge.source)))?;
        let target = graph
            .find_vertex(&edge.target)
            .ok_or_else(|| Error::InvalidVertex(format!("snapshot edge target {} is missing", edge.target)))?;
        if matches!(&edge.relationship, Relationship::Indirect(shared) if shared.is_empty()) {
            return Err(Error::InvalidEdge(format!(
                "snapshot edge {} -> {} is Indirect with no shared interests",
                edge.source, edge.target
            )));
        }
        graph.insert_edge(source, target, edge.relationship)?;
    }

    debug!(vertices = graph.vertex_count(), edges = graph.edge_count(), "graph restored");
    Ok(graph)
}

// ============================================================================
// History
// ============================================================================

/// Bounded stack of snapshots. The oldest checkpoint is dropped when full.
#[derive(Debug, Clone)]
pub struct History {
    checkpoints: VecDeque<Vec<u8>>,
    depth: usize,
}

impl History {
    pub fn new(depth: usize) -> Self {
        Self { checkpoints: VecDeque::with_capacity(depth), depth }
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn checkpoint<G>(&mut self, graph: &G) -> Result<()>
    where
        G: Digraph<User, Relationship>,
    {
        if self.depth == 0 {
            return Ok(());
        }
        let image = snapshot(graph)?;
        if self.checkpoints.len() == self.depth {
            self.checkpoints.pop_front();
        }
        self.checkpoints.push_back(image);
        Ok(())
    }

    /// Pop the most recent checkpoint and rebuild it. `None` when empty.
    pub fn undo(&mut self) -> Result<Option<SocialGraph>> {
        match self.checkpoints.pop_back() {
            Some(image) => restore(&image).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InterestId, Tag};

    fn sample() -> SocialGraph {
        let mut g = SocialGraph::new();
        let a = g.insert_vertex(User::new(UserId(1), "Ana")).unwrap();
        let b = g.insert_vertex(User::new(UserId(2), "Rui").included(UserId(1))).unwrap();
        g.insert_edge(a, b, Relationship::Indirect([InterestId(4)].into_iter().collect())).unwrap();
        g.insert_edge(b, a, Relationship::Simple).unwrap();
        g
    }

    #[test]
    fn test_round_trip() {
        let g = sample();
        let restored = restore(&snapshot(&g).unwrap()).unwrap();

        assert_ne!(restored.id(), g.id());
        assert_eq!(restored.vertex_count(), 2);
        assert_eq!(restored.edge_count(), 2);

        let b = restored.find_vertex(&UserId(2)).unwrap();
        assert_eq!(restored.element(b).unwrap().tag, Tag::Included);
        let out = restored.outbound_edges(b).unwrap();
        assert_eq!(restored.payload(out[0]).unwrap(), &Relationship::Simple);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(restore(b"not a graph"), Err(Error::Snapshot(_))));
    }

    #[test]
    fn test_empty_indirect_is_rejected() {
        let image = br#"{
            "users": [
                {"id": 1, "name": "Ana", "tag": "Added", "included_by": null},
                {"id": 2, "name": "Rui", "tag": "Added", "included_by": null}
            ],
            "relationships": [
                {"source": 1, "target": 2, "relationship": {"kind": "Indirect", "shared": []}}
            ]
        }"#;
        let err = restore(image).unwrap_err();
        assert!(matches!(err, Error::InvalidEdge(_)));
        assert!(err.to_string().contains("1 -> 2"));
    }

    #[test]
    fn test_zero_depth_keeps_nothing() {
        let mut history = History::new(0);
        history.checkpoint(&sample()).unwrap();
        assert!(history.is_empty());
        assert!(history.undo().unwrap().is_none());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut g = sample();
        let mut history = History::new(2);

        history.checkpoint(&g).unwrap();
        let v = g.insert_vertex(User::new(UserId(3), "Eva")).unwrap();
        history.checkpoint(&g).unwrap();
        g.remove_vertex(v).unwrap();
        g.insert_vertex(User::new(UserId(4), "Ivo")).unwrap();
        history.checkpoint(&g).unwrap();
        assert_eq!(history.len(), 2);

        let last = history.undo().unwrap().unwrap();
        assert!(last.find_vertex(&UserId(4)).is_some());
        let first = history.undo().unwrap().unwrap();
        assert!(first.find_vertex(&UserId(3)).is_some());
        assert!(history.undo().unwrap().is_none());
    }
}
