//! Vertex and edge handles.
//!
//! A handle is only meaningful to the graph instance that minted it. Each
//! instance draws a process-unique `GraphId`, and every handle carries it,
//! so a foreign handle is rejected instead of aliasing a local slot.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one graph instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphId(pub u64);

impl GraphId {
    pub(crate) fn next() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Reference to a vertex owned by a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexRef {
    pub(crate) graph: u64,
    pub(crate) slot: u64,
}

/// Reference to an edge owned by a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeRef {
    pub(crate) graph: u64,
    pub(crate) slot: u64,
}

impl VertexRef {
    pub(crate) fn new(graph: GraphId, slot: u64) -> Self {
        Self { graph: graph.0, slot }
    }

    pub fn graph(&self) -> GraphId {
        GraphId(self.graph)
    }
}

impl EdgeRef {
    pub(crate) fn new(graph: GraphId, slot: u64) -> Self {
        Self { graph: graph.0, slot }
    }

    pub fn graph(&self) -> GraphId {
        GraphId(self.graph)
    }
}

impl std::fmt::Display for VertexRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}@g{}", self.slot, self.graph)
    }
}

impl std::fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}@g{}", self.slot, self.graph)
    }
}

/// Which side of an edge a vertex sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The vertex is the source.
    Outgoing,
    /// The vertex is the target.
    Incoming,
}
